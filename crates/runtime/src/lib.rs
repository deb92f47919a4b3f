//! Runtime orchestration for a single elemental combat encounter.
//!
//! This crate wires content loading, raw input parsing and the combat engine
//! into a synchronous [`Session`] API. Front ends embed a [`Session`], feed it
//! commands, and render [`Session::recent_lines`].
//!
//! Modules are organized by responsibility:
//! - [`session`] owns the encounter and routes commands
//! - [`input`] turns raw form fields into commands
//! - [`config`] and [`error`] hold the runtime configuration and error types
//!
//! Subscriber setup for the `tracing` output is left to the embedding binary.
pub mod config;
pub mod error;
pub mod input;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use input::{AttackInput, parse_damage, parse_element};
pub use session::{Session, SessionBuilder};
