use std::sync::LazyLock;

use regex::Regex;

use super::error::{MalformedInput, Result};
use super::model::{Generation, Pokemon, Stat};

/// Sprite URL used when the source has no `image_url` column.
pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";

/// Knobs for the load-time derivations.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// URL template for synthesised sprite links; `{id}` is replaced by the dex id.
    pub image_url_template: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            image_url_template: DEFAULT_IMAGE_URL_TEMPLATE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row as read from the file, before derivation
// ---------------------------------------------------------------------------

/// Text cells of a single input row. Absent cells (null / missing column)
/// are `None`.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub id: String,
    pub name: String,
    pub stats: Option<String>,
    pub types: Option<String>,
    pub image_url: Option<String>,
}

impl RawRecord {
    /// Run every derivation and produce the enriched record.
    /// `row` is the 0-based data row, used in error messages only.
    pub fn normalize(self, row: usize, options: &LoadOptions) -> Result<Pokemon> {
        let id = parse_id(&self.id, row)?;

        let image_url = match self.image_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => image_url_for(&options.image_url_template, id),
        };

        let stats_raw = self.stats.unwrap_or_default();
        let [hp, attack, defense, special_attack, special_defense, speed] =
            parse_stats(&stats_raw, row)?;

        let types_raw = self.types.unwrap_or_default();
        let (primary_type, secondary_type) = split_types(&types_raw, row);

        Ok(Pokemon {
            id,
            name: self.name,
            image_url,
            stats_raw,
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
            types_raw,
            primary_type,
            secondary_type,
            generation: Generation::from_id(id),
        })
    }
}

fn parse_id(raw: &str, row: usize) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        MalformedInput::InvalidId {
            row,
            value: raw.to_string(),
        }
        .into()
    })
}

/// Fill `{id}` in the sprite URL template.
pub fn image_url_for(template: &str, id: i64) -> String {
    template.replace("{id}", &id.to_string())
}

// ---------------------------------------------------------------------------
// Stats: `hp=45,attack=49,...`
// ---------------------------------------------------------------------------

/// One pattern per stat, in `Stat::ALL` order. A key only matches at a token
/// start, so `attack=` does not fire inside `special_attack=`.
static STAT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Stat::ALL
        .iter()
        .map(|stat| {
            let key = stat.key().replace('_', "[-_]");
            Regex::new(&format!(r"(?i)(?:^|[^a-z0-9_-]){key}\s*=\s*(\d+)"))
                .expect("stat pattern is a valid regex")
        })
        .collect()
});

/// Extract all six stats; a key missing from `raw` yields `None`.
pub fn parse_stats(raw: &str, row: usize) -> Result<[Option<u32>; 6]> {
    let mut values = [None; 6];
    for ((slot, stat), re) in values.iter_mut().zip(Stat::ALL).zip(STAT_PATTERNS.iter()) {
        let Some(caps) = re.captures(raw) else {
            continue;
        };
        let digits = &caps[1];
        let value = digits.parse::<u32>().map_err(|_| MalformedInput::InvalidStat {
            row,
            stat: stat.key(),
            value: digits.to_string(),
        })?;
        *slot = Some(value);
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Types: `Grass, Poison`
// ---------------------------------------------------------------------------

/// Split the comma-separated type list into primary and secondary type.
pub fn split_types(raw: &str, row: usize) -> (Option<String>, Option<String>) {
    let mut tokens = raw.split(',').map(str::trim).filter(|t| !t.is_empty());
    let primary = tokens.next().map(str::to_string);
    let secondary = tokens.next().map(str::to_string);
    let extra: Vec<&str> = tokens.collect();
    if !extra.is_empty() {
        log::warn!("row {row}: ignoring extra types {extra:?} in '{raw}'");
    }
    (primary, secondary)
}
