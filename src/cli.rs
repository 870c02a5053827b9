use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pokedash::data::derive::{LoadOptions, DEFAULT_IMAGE_URL_TEMPLATE};
use pokedash::data::filter::ALL;
use pokedash::data::model::Stat;

#[derive(Parser, Debug)]
#[command(name = "pokedash")]
#[command(version, about = "Explore a Pokémon stats table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the dashboard window (default)
    View {
        /// Pokédex file to load on startup (.csv, .tsv, .json, .parquet)
        path: Option<PathBuf>,

        #[command(flatten)]
        axes: AxisArgs,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Print record counts and average stats for a selection as JSON
    Summary {
        /// Pokédex file (.csv, .tsv, .json, .parquet)
        path: PathBuf,

        /// Generation to keep, e.g. "3" or "Gen 3"
        #[arg(short, long, default_value = ALL)]
        generation: String,

        /// Type to keep (matches primary or secondary type)
        #[arg(short = 't', long = "type", default_value = ALL)]
        pokemon_type: String,

        #[command(flatten)]
        load: LoadArgs,
    },
}

/// Initial scatter axes, e.g. `--x-stat special-attack`.
#[derive(Args, Debug, Clone)]
pub struct AxisArgs {
    #[arg(long, default_value = "attack")]
    pub x_stat: Stat,

    #[arg(long, default_value = "defense")]
    pub y_stat: Stat,
}

impl Default for AxisArgs {
    fn default() -> Self {
        Self {
            x_stat: Stat::Attack,
            y_stat: Stat::Defense,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Sprite URL template used when the file has no image_url column
    #[arg(long, default_value = DEFAULT_IMAGE_URL_TEMPLATE)]
    pub image_url_template: String,
}

impl Default for LoadArgs {
    fn default() -> Self {
        Self {
            image_url_template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
        }
    }
}

impl LoadArgs {
    pub fn options(&self) -> LoadOptions {
        LoadOptions {
            image_url_template: self.image_url_template.clone(),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
