//! Pokédex loading, filtering and aggregation for the pokedash viewer.
//!
//! The entry point is [`data::loader::load`]; the viewer binary builds on
//! [`data::model::Pokedex`], [`data::filter`] and [`data::stats`].

pub mod data;
