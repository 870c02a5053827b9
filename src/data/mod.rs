/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawRecord rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  image url, stats, types, generation → Pokemon
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Pokedex  │  Vec<Pokemon>, type / generation index
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │  stats    │
///   └──────────┘   └──────────┘
/// ```

pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
