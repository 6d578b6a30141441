//! The game orchestrator: setup, action processing and events.
//!
//! `Game` is the single owner of a running game. Front ends and AI clients
//! submit `Action`s through `Game::apply` and read the resulting
//! `GameState` and `GameEvent`s.

pub mod builder;
pub mod engine;
pub mod event;

pub use builder::GameBuilder;
pub use engine::{ActionError, Game};
pub use event::GameEvent;
