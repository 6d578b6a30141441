//! Player identification, per-player storage and holdings.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! What a single player holds: coins, a token reserve, the active
//! race/ability pair, active regions with their token counts and the set of
//! regions held by a declined race.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::{AbilityId, RaceId};
use crate::map::RegionId;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use conquest_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The player seated after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seating order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Everything a single player holds.
///
/// Fields are read-only outside the crate; only `Game` mutates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) coins: u32,
    pub(crate) tokens_on_hand: u32,
    pub(crate) active_race: Option<RaceId>,
    pub(crate) active_ability: Option<AbilityId>,
    pub(crate) decline_race: Option<RaceId>,
    pub(crate) active_regions: OrdMap<RegionId, u32>,
    pub(crate) decline_regions: OrdSet<RegionId>,
}

impl Player {
    /// A player with no race and `coins` coins.
    #[must_use]
    pub fn new(coins: u32) -> Self {
        Self {
            coins,
            tokens_on_hand: 0,
            active_race: None,
            active_ability: None,
            decline_race: None,
            active_regions: OrdMap::new(),
            decline_regions: OrdSet::new(),
        }
    }

    /// Coin balance.
    #[must_use]
    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Reserve tokens not yet placed on the board.
    #[must_use]
    pub fn tokens_on_hand(&self) -> u32 {
        self.tokens_on_hand
    }

    /// The active race, if any.
    #[must_use]
    pub fn active_race(&self) -> Option<RaceId> {
        self.active_race
    }

    /// The active ability, if any.
    #[must_use]
    pub fn active_ability(&self) -> Option<AbilityId> {
        self.active_ability
    }

    /// The race currently in decline, if any.
    #[must_use]
    pub fn decline_race(&self) -> Option<RaceId> {
        self.decline_race
    }

    /// Regions held by the active race, with their token counts.
    #[must_use]
    pub fn active_regions(&self) -> &OrdMap<RegionId, u32> {
        &self.active_regions
    }

    /// Regions held by the declined race (one token each).
    #[must_use]
    pub fn decline_regions(&self) -> &OrdSet<RegionId> {
        &self.decline_regions
    }

    /// A player without an active ability must select a combo before acting.
    #[must_use]
    pub fn is_in_decline(&self) -> bool {
        self.active_ability.is_none()
    }

    /// Check whether the player holds `region`, actively or in decline.
    #[must_use]
    pub fn is_owning(&self, region: RegionId) -> bool {
        self.active_regions.contains_key(&region) || self.decline_regions.contains(&region)
    }

    /// Total active-race tokens on the board.
    #[must_use]
    pub fn active_tokens_on_board(&self) -> u32 {
        self.active_regions.values().sum()
    }

    /// Pick up tokens from active regions, leaving one in each.
    pub(crate) fn pick_up_tokens(&mut self) -> u32 {
        let picked: u32 = self.active_regions.values().map(|n| n.saturating_sub(1)).sum();
        self.active_regions = self.active_regions.keys().map(|&region| (region, 1u32)).collect();
        self.tokens_on_hand += picked;
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).next(1), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<u32> = PlayerMap::new(4, |p| p.index() as u32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<u32> = PlayerMap::new(2, |_| 0);

        map[PlayerId::new(1)] = 20;
        *map.get_mut(PlayerId::new(0)) += 5;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &5), (PlayerId::new(1), &20)]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u32> = PlayerMap::new(0, |_| 0);
    }

    #[test]
    fn test_new_player() {
        let player = Player::new(5);

        assert_eq!(player.coins(), 5);
        assert_eq!(player.tokens_on_hand(), 0);
        assert!(player.is_in_decline());
        assert!(player.active_regions().is_empty());
        assert!(!player.is_owning(RegionId(0)));
    }

    #[test]
    fn test_pick_up_tokens_leaves_one() {
        let mut player = Player::new(0);
        player.active_regions.insert(RegionId(0), 3);
        player.active_regions.insert(RegionId(1), 1);
        player.active_regions.insert(RegionId(4), 5);
        player.tokens_on_hand = 2;

        assert_eq!(player.pick_up_tokens(), 6);
        assert_eq!(player.tokens_on_hand(), 8);
        assert!(player.active_regions().values().all(|&n| n == 1));
        assert_eq!(player.active_tokens_on_board(), 3);
    }

    #[test]
    fn test_is_owning_decline() {
        let mut player = Player::new(0);
        player.decline_regions.insert(RegionId(2));

        assert!(player.is_owning(RegionId(2)));
        assert!(!player.is_owning(RegionId(3)));
    }
}
