//! Elemental reactions.
//!
//! [`ReactionTable`] decides which single reaction (if any) an attack triggers;
//! [`resolve_attack`] applies the element, runs the reaction's behavior and
//! clears tags afterwards.

mod defaults;
mod resolve;
mod table;

pub use defaults::default_definitions;
pub use resolve::resolve_attack;
pub use table::{
    ClearRule, MatchContext, ReactionDefinition, ReactionKind, ReactionRequirement, ReactionTable,
};
