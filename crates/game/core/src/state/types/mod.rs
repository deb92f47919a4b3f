pub mod common;
pub mod element;
pub mod entity;
pub mod status;
pub mod turn;

pub use common::{EntityId, Side};
pub use element::{ELEMENT_COUNT, Element, ElementList, ElementMask};
pub use entity::{ActionBlock, CombatEntity, EntityStats, PlayerProfile};
pub use status::{Debuff, DebuffKind, DebuffState, Debuffs, Shield, ShieldKind};
pub use turn::{TurnOrder, TurnPhase};
