//! Live game state.
//!
//! ## GameState
//!
//! Everything that changes during a game:
//! - Players and their holdings
//! - Current player, turn counter and turn stage
//! - Visible combos and the hidden race/ability queues
//! - Remaining lost tribes
//! - Per-race token storage
//!
//! Static data (map, races, abilities) is shared through an `Arc<Assets>`.
//! All queries are pure. Mutation is crate-private and driven by `Game`.
//!
//! ## Token conservation
//!
//! For every race, at all times:
//!
//! ```text
//! tokens_on_board(race) + tokens_on_hand(race) + tokens_in_storage(race) == max_n_tokens
//! ```

use std::sync::Arc;

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::config::{AbilityId, Assets, RaceId};
use super::player::{Player, PlayerId, PlayerMap};
use crate::map::{Map, RegionId};

/// Stage of the current player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStage {
    /// The player has no active ability and must select a combo.
    SelectCombo,
    /// The player may conquer, abandon, deploy, decline or end the turn.
    Active,
    /// Conquests are over; only deploying and ending the turn remain.
    Redeployment,
    /// Pseudo-turn given to a player who must place tokens after an attack.
    RedeploymentTurn,
    /// The game has ended. No action is accepted.
    GameOver,
}

impl TurnStage {
    /// Check whether this is one of the two redeployment stages.
    #[must_use]
    pub fn is_redeployment(self) -> bool {
        matches!(self, Self::Redeployment | Self::RedeploymentTurn)
    }
}

impl std::fmt::Display for TurnStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// What the current player has already done this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnProgress {
    /// The active race acted this turn (selected, deployed, conquered or
    /// abandoned). Declining is no longer possible.
    pub race_used: bool,
    /// At least one conquest succeeded. Abandoning is no longer possible.
    pub conquered: bool,
    /// The reinforcement dice were rolled. No more conquests.
    pub dice_used: bool,
}

/// A race+ability pair offered for selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combo {
    pub race: RaceId,
    pub ability: AbilityId,
    /// Tokens granted on selection: race + ability, capped at the race maximum.
    pub n_tokens: u32,
    /// Coins placed on this combo by players who selected a later one.
    pub coins: u32,
}

/// Complete live state of a game.
///
/// Uses `im` persistent collections, so cloning is cheap enough for AI
/// look-ahead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) assets: Arc<Assets>,

    // === Players ===
    pub(crate) players: PlayerMap<Player>,
    pub(crate) current: PlayerId,
    pub(crate) next_player: PlayerId,

    // === Turn ===
    pub(crate) turn: u32,
    pub(crate) stage: TurnStage,
    pub(crate) progress: TurnProgress,

    // === Banners ===
    pub(crate) combos: Vector<Combo>,
    pub(crate) hidden_races: Vector<RaceId>,
    pub(crate) hidden_abilities: Vector<AbilityId>,

    // === Board ===
    pub(crate) lost_tribes: OrdSet<RegionId>,
    pub(crate) storage: Vector<u32>,
}

impl GameState {
    /// Create the initial state: player 0 to select a combo on turn 1.
    ///
    /// Assumes `assets` passed [`Assets::validate`].
    #[must_use]
    pub fn new(assets: Arc<Assets>) -> Self {
        let n_combos = assets.n_selectable_combos;
        let n_races = assets.races.len();
        let n_abilities = assets.abilities.len();

        let hidden_races = (0..n_races as u16).map(RaceId).collect();
        let hidden_abilities = (0..n_abilities as u16).map(AbilityId).collect();

        let lost_tribes = assets
            .map
            .regions()
            .filter(|&region| {
                assets
                    .map
                    .tile(region)
                    .is_some_and(|tile| tile.has_lost_tribe())
            })
            .collect();

        let storage = assets.races.iter().map(|race| race.max_n_tokens).collect();
        let n_players = assets.n_players;
        let coins = assets.n_coins_on_start;

        let mut state = Self {
            players: PlayerMap::new(n_players, |_| Player::new(coins)),
            current: PlayerId::new(0),
            next_player: PlayerId::new(0).next(n_players),
            turn: 1,
            stage: TurnStage::SelectCombo,
            progress: TurnProgress::default(),
            combos: Vector::new(),
            hidden_races,
            hidden_abilities,
            lost_tribes,
            storage,
            assets,
        };

        for _ in 0..n_combos {
            state.reveal_combo();
        }

        state
    }

    // === Static data ===

    /// The shared asset bundle.
    #[must_use]
    pub fn assets(&self) -> &Arc<Assets> {
        &self.assets
    }

    /// The game map.
    #[must_use]
    pub fn map(&self) -> &Map {
        &self.assets.map
    }

    // === Players ===

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player in control (possibly during a redeployment pseudo-turn).
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    /// The player in control.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The player whose regular turn comes next.
    #[must_use]
    pub fn next_player_id(&self) -> PlayerId {
        self.next_player
    }

    // === Turn ===

    /// The current turn, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Total number of turns.
    #[must_use]
    pub fn n_turns(&self) -> u32 {
        self.assets.n_turns
    }

    /// Check whether the game is over.
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.turn > self.assets.n_turns
    }

    /// The current turn stage.
    #[must_use]
    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    /// What the current player has done this turn.
    #[must_use]
    pub fn progress(&self) -> TurnProgress {
        self.progress
    }

    // === Combos ===

    /// Visible combos, in price order.
    #[must_use]
    pub fn combos(&self) -> &Vector<Combo> {
        &self.combos
    }

    /// Get a visible combo.
    #[must_use]
    pub fn combo(&self, index: usize) -> Option<&Combo> {
        self.combos.get(index)
    }

    // === Regions ===

    /// The player holding `region`, actively or in decline.
    #[must_use]
    pub fn owner_of(&self, region: RegionId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, player)| player.is_owning(region))
            .map(|(id, _)| id)
    }

    /// Check whether a neutral lost tribe still occupies `region`.
    #[must_use]
    pub fn has_lost_tribe(&self, region: RegionId) -> bool {
        self.lost_tribes.contains(&region)
    }

    /// Regions still occupied by lost tribes.
    #[must_use]
    pub fn lost_tribes(&self) -> &OrdSet<RegionId> {
        &self.lost_tribes
    }

    /// Check whether the current player may launch a conquest at `region`.
    ///
    /// Without active regions only border tiles are reachable; otherwise the
    /// target must share a border with one of the active regions. Out-of-range
    /// regions are never reachable.
    #[must_use]
    pub fn is_reachable(&self, region: RegionId) -> bool {
        let map = self.map();
        if !map.contains(region) {
            return false;
        }
        let active = &self.current_player().active_regions;
        if active.is_empty() {
            map.is_border(region)
        } else {
            active.keys().any(|&own| map.is_adjacent(own, region))
        }
    }

    // === Tokens ===

    /// Tokens of `race` on the map.
    #[must_use]
    pub fn tokens_on_board(&self, race: RaceId) -> u32 {
        self.players
            .values()
            .map(|player| {
                let mut n = 0;
                if player.active_race == Some(race) {
                    n += player.active_tokens_on_board();
                }
                if player.decline_race == Some(race) {
                    n += player.decline_regions.len() as u32;
                }
                n
            })
            .sum()
    }

    /// Tokens of `race` in players' reserves.
    #[must_use]
    pub fn tokens_on_hand(&self, race: RaceId) -> u32 {
        self.players
            .values()
            .filter(|player| player.active_race == Some(race))
            .map(|player| player.tokens_on_hand)
            .sum()
    }

    /// Unused tokens of `race`.
    #[must_use]
    pub fn tokens_in_storage(&self, race: RaceId) -> u32 {
        self.storage.get(race.index()).copied().unwrap_or(0)
    }

    // === Crate-private mutation ===

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    pub(crate) fn return_to_storage(&mut self, race: RaceId, n_tokens: u32) {
        if let Some(stored) = self.storage.get_mut(race.index()) {
            *stored += n_tokens;
        }
    }

    pub(crate) fn take_from_storage(&mut self, race: RaceId, n_tokens: u32) {
        if let Some(stored) = self.storage.get_mut(race.index()) {
            *stored = stored.saturating_sub(n_tokens);
        }
    }

    /// Pair the front of both hidden queues into a new visible combo.
    pub(crate) fn reveal_combo(&mut self) {
        let (Some(race), Some(ability)) = (self.hidden_races.pop_front(), self.hidden_abilities.pop_front()) else {
            return;
        };
        let n_tokens = match (self.assets.race(race), self.assets.ability(ability)) {
            (Some(r), Some(a)) => (r.n_tokens + a.n_tokens).min(r.max_n_tokens),
            _ => 0,
        };
        self.combos.push_back(Combo {
            race,
            ability,
            n_tokens,
            coins: 0,
        });
    }
}
