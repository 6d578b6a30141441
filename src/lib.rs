//! # conquest-engine
//!
//! A rules engine for territory-conquest board games in the style of
//! Small World.
//!
//! ## Design Principles
//!
//! 1. **Rules Are Pluggable**: Legality and game policy (conquest costs,
//!    rewards, combo prices) live behind the `Rules` trait. The orchestrator
//!    never decides legality itself.
//!
//! 2. **Check Before Mutate**: Every action is validated first. A rejected
//!    action leaves the state untouched and reports every violation found.
//!
//! 3. **N-Player First**: Every API takes the player count from the assets.
//!    No convenience methods that assume 2 players.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Cheap cloning via `im-rs` so AI
//!   clients can explore futures from a snapshot.
//!
//! - **Injectable Dice**: The reinforcement dice sit behind `DiceRoller`.
//!   Games are reproducible from a seed, or scripted in tests.
//!
//! ## Modules
//!
//! - `map`: Regions, terrain, symbols and the adjacency graph
//! - `core`: Players, assets, actions, state, RNG
//! - `rules`: The `Rules` trait, violations and the standard rule set
//! - `game`: The `Game` orchestrator, its builder and events

pub mod core;
pub mod game;
pub mod map;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Ability, AbilityId, Action, ActionRecord, Assets, AssetsError, Combo, DiceRoller, GameRng,
    GameState, Player, PlayerId, PlayerMap, Race, RaceId, ScriptedDice, TurnProgress, TurnStage,
};

pub use crate::game::{ActionError, Game, GameBuilder, GameEvent};

pub use crate::map::{Map, MapError, RegionId, Symbol, Terrain, Tile};

pub use crate::rules::{ComboPrice, DefaultRules, Rules, RulesConfig, Violation, Violations};
