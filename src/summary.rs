use std::collections::BTreeMap;

use serde::Serialize;

use pokedash::data::filter::{filter, PokemonFilter};
use pokedash::data::model::{Pokedex, Stat};
use pokedash::data::stats::average_stats;

/// Headless report printed by `pokedash summary`.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    pub generation: Option<u8>,
    #[serde(rename = "type")]
    pub pokemon_type: Option<String>,
    pub averages: BTreeMap<Stat, f64>,
}

impl Summary {
    pub fn compute(dex: &Pokedex, selection: &PokemonFilter) -> Self {
        let matched = filter(&dex.records, selection);
        Summary {
            total: dex.len(),
            matched: matched.len(),
            generation: selection.generation.map(|g| g.number()),
            pokemon_type: selection.pokemon_type.clone(),
            averages: average_stats(matched),
        }
    }
}
