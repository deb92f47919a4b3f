//! Read-only inputs consumed at the edges of an encounter.
//!
//! The roster and enemy catalog are owned by external collaborators and read
//! once when an encounter is built. The RNG oracle is the only source of
//! nondeterminism and is injected into every engine call.
mod rng;
mod roster;

pub use rng::{PcgRng, RngOracle, compute_seed, context};
pub use roster::{EnemyTemplate, PlayerRecord};
