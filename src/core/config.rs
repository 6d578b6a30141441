//! Static game configuration: races, abilities and the asset bundle.
//!
//! `Assets` are supplied fully formed by the front end (parsed from any
//! serde format) and validated once when a game is built. After that they
//! are shared read-only between `GameState` clones.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rng::GameRng;
use crate::map::Map;

/// Race identifier: the index of a race in `Assets::races`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceId(pub u16);

impl RaceId {
    /// Get the index into `Assets::races`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Race({})", self.0)
    }
}

/// Ability identifier: the index of an ability in `Assets::abilities`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AbilityId(pub u16);

impl AbilityId {
    /// Get the index into `Assets::abilities`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ability({})", self.0)
    }
}

/// A race banner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Race {
    /// Human-readable name.
    pub name: String,
    /// Tokens granted when the race is selected (before the ability bonus).
    pub n_tokens: u32,
    /// Tokens of this race that exist in the game.
    pub max_n_tokens: u32,
}

impl Race {
    /// Create a race.
    pub fn new(name: impl Into<String>, n_tokens: u32, max_n_tokens: u32) -> Self {
        Self {
            name: name.into(),
            n_tokens,
            max_n_tokens,
        }
    }
}

/// An ability banner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    /// Human-readable name.
    pub name: String,
    /// Token bonus added to the race's tokens.
    pub n_tokens: u32,
}

impl Ability {
    /// Create an ability.
    pub fn new(name: impl Into<String>, n_tokens: u32) -> Self {
        Self {
            name: name.into(),
            n_tokens,
        }
    }
}

/// Asset preconditions that make a game impossible to build.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssetsError {
    #[error("a game needs at least 1 player and at most 255, got {0}")]
    PlayerCount(usize),
    #[error("at least 1 combo must be selectable")]
    NoSelectableCombos,
    #[error("a game needs at least 1 turn")]
    NoTurns,
    #[error("not enough races for {n_players} players and {n_combos} combos: need at least {required}, got {actual}")]
    NotEnoughRaces {
        n_players: usize,
        n_combos: usize,
        required: usize,
        actual: usize,
    },
    #[error("not enough abilities for {n_players} players and {n_combos} combos: need at least {required}, got {actual}")]
    NotEnoughAbilities {
        n_players: usize,
        n_combos: usize,
        required: usize,
        actual: usize,
    },
    #[error("race {name:?} has {n_tokens} tokens but at most {max_n_tokens}")]
    InvalidRaceTokens {
        name: String,
        n_tokens: u32,
        max_n_tokens: u32,
    },
}

/// Complete static configuration of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Human-readable name of the asset set.
    #[serde(default)]
    pub name: String,
    /// Number of players (1-255).
    pub n_players: usize,
    /// Coins each player starts with.
    pub n_coins_on_start: u32,
    /// Size of the visible combo pool.
    pub n_selectable_combos: usize,
    /// The game ends after this many full rounds.
    pub n_turns: u32,
    /// Race banners. The first `n_selectable_combos` are revealed at start.
    pub races: Vec<Race>,
    /// Ability banners. The first `n_selectable_combos` are revealed at start.
    pub abilities: Vec<Ability>,
    /// The game map.
    pub map: Map,
}

impl Assets {
    /// Create assets for `map` with no races or abilities.
    ///
    /// Defaults: 2 players, 5 starting coins, 6 selectable combos, 10 turns.
    pub fn new(map: Map) -> Self {
        Self {
            name: String::new(),
            n_players: 2,
            n_coins_on_start: 5,
            n_selectable_combos: 6,
            n_turns: 10,
            races: Vec::new(),
            abilities: Vec::new(),
            map,
        }
    }

    /// Set the asset set name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, n_players: usize) -> Self {
        self.n_players = n_players;
        self
    }

    /// Set the starting coins.
    #[must_use]
    pub fn with_coins_on_start(mut self, coins: u32) -> Self {
        self.n_coins_on_start = coins;
        self
    }

    /// Set the size of the visible combo pool.
    #[must_use]
    pub fn with_selectable_combos(mut self, n_combos: usize) -> Self {
        self.n_selectable_combos = n_combos;
        self
    }

    /// Set the number of turns.
    #[must_use]
    pub fn with_turns(mut self, n_turns: u32) -> Self {
        self.n_turns = n_turns;
        self
    }

    /// Append a race.
    #[must_use]
    pub fn with_race(mut self, race: Race) -> Self {
        self.races.push(race);
        self
    }

    /// Append an ability.
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Get a race by ID.
    #[must_use]
    pub fn race(&self, id: RaceId) -> Option<&Race> {
        self.races.get(id.index())
    }

    /// Get an ability by ID.
    #[must_use]
    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.abilities.get(id.index())
    }

    /// Check the preconditions for building a game.
    ///
    /// The race and ability counts guarantee that the combo pool can always
    /// be refilled: races may be held active or in decline by every player
    /// at once, abilities only while active.
    ///
    /// # Errors
    ///
    /// Returns the first [`AssetsError`] found.
    pub fn validate(&self) -> Result<(), AssetsError> {
        let n_players = self.n_players;
        let n_combos = self.n_selectable_combos;

        if n_players == 0 || n_players > 255 {
            return Err(AssetsError::PlayerCount(n_players));
        }
        if n_combos == 0 {
            return Err(AssetsError::NoSelectableCombos);
        }
        if self.n_turns == 0 {
            return Err(AssetsError::NoTurns);
        }

        let required = 2 * n_players + n_combos;
        if self.races.len() < required {
            return Err(AssetsError::NotEnoughRaces {
                n_players,
                n_combos,
                required,
                actual: self.races.len(),
            });
        }

        let required = n_players + n_combos;
        if self.abilities.len() < required {
            return Err(AssetsError::NotEnoughAbilities {
                n_players,
                n_combos,
                required,
                actual: self.abilities.len(),
            });
        }

        if let Some(race) = self
            .races
            .iter()
            .find(|r| r.n_tokens == 0 || r.n_tokens > r.max_n_tokens)
        {
            return Err(AssetsError::InvalidRaceTokens {
                name: race.name.clone(),
                n_tokens: race.n_tokens,
                max_n_tokens: race.max_n_tokens,
            });
        }

        Ok(())
    }

    /// Return a copy with races and abilities in random order.
    #[must_use]
    pub fn shuffled(&self, rng: &mut GameRng) -> Self {
        let mut assets = self.clone();
        rng.shuffle(&mut assets.races);
        rng.shuffle(&mut assets.abilities);
        assets
    }
}
