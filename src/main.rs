mod app;
mod cli;
mod color;
mod state;
mod summary;
mod ui;

use anyhow::{Context, Result};
use eframe::egui;
use pokedash::data::filter::PokemonFilter;
use pokedash::data::loader::load_with;

use app::PokedashApp;
use cli::{AxisArgs, Cli, Commands, LoadArgs};
use state::AppState;
use summary::Summary;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse_args();

    match cli.command {
        None => run_viewer(None, AxisArgs::default(), LoadArgs::default()),
        Some(Commands::View { path, axes, load }) => run_viewer(path, axes, load),
        Some(Commands::Summary {
            path,
            generation,
            pokemon_type,
            load,
        }) => {
            let selection = PokemonFilter::from_labels(&generation, &pokemon_type)
                .map_err(anyhow::Error::msg)
                .context("parsing selection")?;
            let dex = load_with(&path, &load.options())
                .with_context(|| format!("loading {}", path.display()))?;
            let summary = Summary::compute(&dex, &selection);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}

fn run_viewer(path: Option<std::path::PathBuf>, axes: AxisArgs, load: LoadArgs) -> Result<()> {
    let mut state = AppState::with_options(load.options());
    state.x_stat = axes.x_stat;
    state.y_stat = axes.y_stat;
    if let Some(path) = path {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pokedash – Pokémon Stats",
        options,
        Box::new(|_cc| Ok(Box::new(PokedashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
