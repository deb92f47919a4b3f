//! Data-driven encounter content and loaders.
//!
//! This crate reads the static data an encounter is seeded from:
//! - Reaction table (data-driven via RON)
//! - Player roster (data-driven via RON)
//! - Enemy catalog (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is read once when an encounter is built and never written back.
//!
//! All loaders deserialize combat-core types directly, except the reaction
//! table which goes through a file-friendly row format.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ClearSpec, ConfigLoader, ContentFactory, EnemyLoader, LoadResult, ReactionLoader,
    ReactionSpec, RosterLoader,
};
