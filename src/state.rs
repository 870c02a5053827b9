use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use pokedash::data::derive::LoadOptions;
use pokedash::data::filter::{filtered_indices, PokemonFilter};
use pokedash::data::loader::load_with;
use pokedash::data::model::{Generation, Pokedex, Pokemon, Stat};
use pokedash::data::stats::average_stats;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Selector enums
// ---------------------------------------------------------------------------

/// Which chart fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Scatter,
    Radar,
    Table,
}

impl View {
    pub const ALL: [View; 3] = [View::Scatter, View::Radar, View::Table];

    pub fn label(self) -> &'static str {
        match self {
            View::Scatter => "Scatter",
            View::Radar => "Average stats",
            View::Table => "Table",
        }
    }
}

/// Category used to colour scatter points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBy {
    PrimaryType,
    Generation,
}

impl ColorBy {
    pub fn label(self) -> &'static str {
        match self {
            ColorBy::PrimaryType => "Primary type",
            ColorBy::Generation => "Generation",
        }
    }

    /// Category of one record under this colouring.
    pub fn category(self, pokemon: &Pokemon) -> String {
        match self {
            ColorBy::PrimaryType => pokemon
                .primary_type
                .clone()
                .unwrap_or_else(|| "Untyped".to_string()),
            ColorBy::Generation => pokemon.generation.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded); never mutated once set.
    pub dataset: Option<Arc<Pokedex>>,

    /// Generation / type selection.
    pub filter: PokemonFilter,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Averages over the visible records (cached).
    pub averages: BTreeMap<Stat, f64>,

    /// Scatter axes.
    pub x_stat: Stat,
    pub y_stat: Stat,

    pub view: View,
    pub color_by: ColorBy,
    pub color_map: Option<ColorMap>,

    /// Options for loads triggered from the UI.
    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: PokemonFilter::default(),
            visible_indices: Vec::new(),
            averages: average_stats(std::iter::empty()),
            x_stat: Stat::Attack,
            y_stat: Stat::Defense,
            view: View::Scatter,
            color_by: ColorBy::PrimaryType,
            color_map: None,
            load_options: LoadOptions::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn with_options(load_options: LoadOptions) -> Self {
        Self {
            load_options,
            ..Self::default()
        }
    }

    /// Load a file; on failure the previous dataset stays in place and the
    /// error is shown in the status bar.
    pub fn load_path(&mut self, path: &Path) {
        match load_with(path, &self.load_options) {
            Ok(dex) => {
                log::info!(
                    "Loaded {} pokémon, {} types, {} generations",
                    dex.len(),
                    dex.types.len(),
                    dex.generations.len()
                );
                self.set_dataset(dex);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset the filter and colours.
    pub fn set_dataset(&mut self, dataset: Pokedex) {
        let dataset = Arc::new(dataset);
        self.filter = PokemonFilter::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_color_map();
        self.refilter();
    }

    /// Records passing the current filter, in file order.
    pub fn visible(&self) -> impl Iterator<Item = &Pokemon> {
        let records = self
            .dataset
            .as_deref()
            .map(|ds| ds.records.as_slice())
            .unwrap_or_default();
        self.visible_indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Recompute `visible_indices` and `averages` after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => filtered_indices(ds, &self.filter),
            None => Vec::new(),
        };
        self.averages = average_stats(self.visible());
    }

    pub fn set_generation(&mut self, generation: Option<Generation>) {
        if self.filter.generation != generation {
            self.filter.generation = generation;
            self.refilter();
        }
    }

    pub fn set_type(&mut self, pokemon_type: Option<String>) {
        if self.filter.pokemon_type != pokemon_type {
            self.filter.pokemon_type = pokemon_type;
            self.refilter();
        }
    }

    pub fn set_color_by(&mut self, color_by: ColorBy) {
        if self.color_by != color_by {
            self.color_by = color_by;
            self.rebuild_color_map();
        }
    }

    /// Rebuild the colour map over every category of the full table, so
    /// colours stay stable while filtering.
    pub fn rebuild_color_map(&mut self) {
        self.color_map = self.dataset.as_deref().map(|ds| match self.color_by {
            ColorBy::PrimaryType => {
                let mut labels: Vec<String> = ds
                    .records
                    .iter()
                    .map(|p| self.color_by.category(p))
                    .collect();
                labels.sort();
                labels.dedup();
                ColorMap::new(labels)
            }
            ColorBy::Generation => ColorMap::new(ds.generations.iter().map(|g| g.to_string())),
        });
    }
}
