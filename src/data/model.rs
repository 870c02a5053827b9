use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Stat – one of the six battle stats
// ---------------------------------------------------------------------------

/// The six numeric stats parsed out of the packed `stats` column.
///
/// Declaration order is the canonical display order (and the `Ord` order used
/// as map key in [`crate::data::stats::average_stats`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
    ];

    /// Column-style key, e.g. `special_attack`.
    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::SpecialAttack => "special_attack",
            Stat::SpecialDefense => "special_defense",
            Stat::Speed => "speed",
        }
    }

    /// Short human label for axes and legends.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Atk",
            Stat::SpecialDefense => "Sp. Def",
            Stat::Speed => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stat {
    type Err = String;

    /// Accepts the key (`special_attack`), its hyphenated form
    /// (`special-attack`) or the label (`Sp. Atk`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Stat::ALL
            .into_iter()
            .find(|stat| {
                norm == stat.key() || norm == stat.label().to_ascii_lowercase().replace(' ', "_")
            })
            .ok_or_else(|| format!("unknown stat '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Generation – game generation inferred from the national dex id
// ---------------------------------------------------------------------------

/// Inclusive national-dex id ranges of generations 1 through 9.
pub const GENERATION_RANGES: [(i64, i64); 9] = [
    (1, 151),
    (152, 251),
    (252, 386),
    (387, 493),
    (494, 649),
    (650, 721),
    (722, 809),
    (810, 905),
    (906, 1025),
];

/// A generation number 1–9, or [`Generation::UNKNOWN`] (99) for ids outside
/// every known range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u8);

impl Generation {
    pub const UNKNOWN: Generation = Generation(99);

    /// Map a dex id onto its generation.
    pub fn from_id(id: i64) -> Self {
        GENERATION_RANGES
            .iter()
            .position(|&(lo, hi)| (lo..=hi).contains(&id))
            .map(|i| Generation(i as u8 + 1))
            .unwrap_or(Generation::UNKNOWN)
    }

    /// Build from a raw number; only 1–9 and 99 are valid.
    pub fn new(number: u8) -> Option<Self> {
        match number {
            1..=9 | 99 => Some(Generation(number)),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        self != Generation::UNKNOWN
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "Gen {}", self.0)
        } else {
            write!(f, "Unknown")
        }
    }
}

impl FromStr for Generation {
    type Err = String;

    /// Accepts `3`, `Gen 3`, `99` or `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unknown") {
            return Ok(Generation::UNKNOWN);
        }
        let digits = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("gen") => trimmed[3..].trim(),
            _ => trimmed,
        };
        digits
            .parse::<u8>()
            .ok()
            .and_then(Generation::new)
            .ok_or_else(|| format!("unknown generation '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Pokemon – one enriched row
// ---------------------------------------------------------------------------

/// One species after the load-time derivations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub stats_raw: String,
    pub hp: Option<u32>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub special_attack: Option<u32>,
    pub special_defense: Option<u32>,
    pub speed: Option<u32>,
    pub types_raw: String,
    pub primary_type: Option<String>,
    pub secondary_type: Option<String>,
    pub generation: Generation,
}

impl Pokemon {
    /// Typed column lookup used for chart axes.
    pub fn stat(&self, stat: Stat) -> Option<u32> {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Primary then secondary type, skipping absent ones.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.primary_type
            .as_deref()
            .into_iter()
            .chain(self.secondary_type.as_deref())
    }

    pub fn has_type(&self, pokemon_type: &str) -> bool {
        self.types().any(|t| t == pokemon_type)
    }
}

// ---------------------------------------------------------------------------
// Pokedex – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with pre-computed selector indices.
/// Built once per file and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Pokedex {
    /// All species, in file order.
    pub records: Vec<Pokemon>,
    /// Every type name that occurs as primary or secondary type.
    pub types: BTreeSet<String>,
    /// Every generation that occurs in the table.
    pub generations: BTreeSet<Generation>,
}

impl Pokedex {
    pub fn from_records(records: Vec<Pokemon>) -> Self {
        let mut types = BTreeSet::new();
        let mut generations = BTreeSet::new();
        for pokemon in &records {
            types.extend(pokemon.types().map(str::to_string));
            generations.insert(pokemon.generation);
        }
        Pokedex {
            records,
            types,
            generations,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
