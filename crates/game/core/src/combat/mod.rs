//! Combat resolution helpers.
//!
//! Pure functions over a single [`crate::CombatEntity`]:
//!
//! - `calculate_damage` / `resolve_damage`: defense, shields, immunity, HP loss
//! - `apply_heal`: the single upward HP path
//! - `tick_status`: per-turn debuff, DoT, shield and spore bookkeeping
//! - `status_report`: read-only status summary

pub mod damage;
pub mod status;

pub use damage::{DamageOutcome, apply_heal, calculate_damage, resolve_damage};
pub use status::{SPORES_BURST_PERCENT, status_report, tick_status};
