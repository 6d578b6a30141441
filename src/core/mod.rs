//! Core engine types: players, state, actions, RNG, configuration.
//!
//! Everything here is rule-agnostic. Rule sets read these types; only the
//! `Game` orchestrator mutates them.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{DiceRoller, GameRng, ScriptedDice};
pub use config::{Ability, AbilityId, Assets, AssetsError, Race, RaceId};
pub use action::{Action, ActionRecord};
pub use state::{Combo, GameState, TurnProgress, TurnStage};
