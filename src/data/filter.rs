use std::str::FromStr;

use super::model::{Generation, Pokedex, Pokemon};

/// Label that the selectors use for "no filter".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter predicate: selected generation and type
// ---------------------------------------------------------------------------

/// Current selector state. `None` on either field means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonFilter {
    pub generation: Option<Generation>,
    pub pokemon_type: Option<String>,
}

impl PokemonFilter {
    /// Build a filter from selector labels; `"All"` or an empty label
    /// disables that criterion.
    pub fn from_labels(generation: &str, pokemon_type: &str) -> Result<Self, String> {
        let generation = if is_all(generation) {
            None
        } else {
            Some(Generation::from_str(generation)?)
        };
        let pokemon_type = (!is_all(pokemon_type)).then(|| pokemon_type.trim().to_string());
        Ok(Self {
            generation,
            pokemon_type,
        })
    }

    /// A record passes when its generation equals the selected one and
    /// either of its types equals the selected type.
    ///
    /// A record without any type never matches a specific type, but is kept
    /// when the type criterion is "All".
    pub fn matches(&self, pokemon: &Pokemon) -> bool {
        if let Some(generation) = self.generation {
            if pokemon.generation != generation {
                return false;
            }
        }
        match &self.pokemon_type {
            Some(t) => pokemon.has_type(t),
            None => true,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.generation.is_none() && self.pokemon_type.is_none()
    }
}

fn is_all(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || label.eq_ignore_ascii_case(ALL)
}

/// Return the records passing `filter`, in input order.
pub fn filter<'a, I>(records: I, filter: &PokemonFilter) -> Vec<&'a Pokemon>
where
    I: IntoIterator<Item = &'a Pokemon>,
{
    records.into_iter().filter(|p| filter.matches(p)).collect()
}

/// Return indices of records passing `filter`, in input order.
pub fn filtered_indices(dex: &Pokedex, filter: &PokemonFilter) -> Vec<usize> {
    if filter.is_unfiltered() {
        return (0..dex.len()).collect();
    }
    dex.records
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.matches(p))
        .map(|(i, _)| i)
        .collect()
}
