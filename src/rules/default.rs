//! The standard rule set.
//!
//! Covers combo selection, conquest, dice, abandon, decline and
//! redeployment, without race- or ability-specific powers. Terrain and
//! defence numbers come from [`RulesConfig`].

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::engine::{ComboPrice, Rules};
use super::violation::{Violation, Violations};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, TurnStage};
use crate::map::{RegionId, Symbol, Terrain};

/// Tunable numbers of the standard rule set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Tokens needed to conquer an empty region on plain terrain.
    pub base_conquest_cost: u32,
    /// Extra tokens needed per terrain kind.
    pub terrain_surcharge: Vec<(Terrain, u32)>,
    /// Terrain that can never be conquered.
    pub unconquerable: Vec<Terrain>,
    /// Defence of a region still occupied by a lost tribe.
    pub lost_tribe_defense: u32,
    /// Highest face of the reinforcement dice.
    pub max_dice_roll: u32,
    /// Extra coins per active region carrying a symbol.
    pub symbol_bonus: Vec<(Symbol, u32)>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_conquest_cost: 1,
            terrain_surcharge: vec![(Terrain::Mountain, 1)],
            unconquerable: vec![Terrain::Sea, Terrain::Lake],
            lost_tribe_defense: 1,
            max_dice_roll: 6,
            symbol_bonus: Vec::new(),
        }
    }
}

impl RulesConfig {
    /// Set the base conquest cost.
    #[must_use]
    pub fn with_base_conquest_cost(mut self, cost: u32) -> Self {
        self.base_conquest_cost = cost;
        self
    }

    /// Set (or replace) the surcharge for a terrain kind.
    #[must_use]
    pub fn with_terrain_surcharge(mut self, terrain: Terrain, surcharge: u32) -> Self {
        self.terrain_surcharge.retain(|(t, _)| *t != terrain);
        self.terrain_surcharge.push((terrain, surcharge));
        self
    }

    /// Set the unconquerable terrain kinds.
    #[must_use]
    pub fn with_unconquerable(mut self, terrain: impl IntoIterator<Item = Terrain>) -> Self {
        self.unconquerable = terrain.into_iter().collect();
        self
    }

    /// Set the lost tribe defence.
    #[must_use]
    pub fn with_lost_tribe_defense(mut self, defense: u32) -> Self {
        self.lost_tribe_defense = defense;
        self
    }

    /// Set the highest dice face.
    #[must_use]
    pub fn with_max_dice_roll(mut self, max_roll: u32) -> Self {
        self.max_dice_roll = max_roll;
        self
    }

    /// Pay `coins` per active region carrying `symbol`.
    #[must_use]
    pub fn with_symbol_bonus(mut self, symbol: Symbol, coins: u32) -> Self {
        self.symbol_bonus.retain(|(s, _)| *s != symbol);
        self.symbol_bonus.push((symbol, coins));
        self
    }

    /// Surcharge for `terrain`, 0 if none is configured.
    #[must_use]
    pub fn surcharge(&self, terrain: Terrain) -> u32 {
        self.terrain_surcharge
            .iter()
            .find(|(t, _)| *t == terrain)
            .map_or(0, |(_, n)| *n)
    }

    /// Check whether `terrain` can be conquered at all.
    #[must_use]
    pub fn is_conquerable(&self, terrain: Terrain) -> bool {
        !self.unconquerable.contains(&terrain)
    }
}

/// The standard rule set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRules {
    config: RulesConfig,
}

impl DefaultRules {
    /// Standard rules with the default numbers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard rules with custom numbers.
    #[must_use]
    pub fn with_config(config: RulesConfig) -> Self {
        Self { config }
    }

    /// The numbers in use.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Push `RegionOutOfRange` if needed and report whether `region` exists.
    fn check_region_index(state: &GameState, region: RegionId, out: &mut Violations) -> bool {
        let n_regions = state.map().len();
        let exists = region.index() < n_regions;
        if !exists {
            out.push(Violation::RegionOutOfRange { region, n_regions });
        }
        exists
    }

    fn check_redeployment(state: &GameState, out: &mut Violations) {
        if state.stage().is_redeployment() {
            out.push(Violation::ForbiddenDuringRedeployment);
        }
    }

    fn check_active_race(state: &GameState, out: &mut Violations) {
        if state.current_player().active_race().is_none() {
            out.push(Violation::NoActiveRace);
        }
    }

    /// Coins paid for holding symbols with the active race.
    fn symbol_bonus(&self, state: &GameState, player: PlayerId) -> u32 {
        if self.config.symbol_bonus.is_empty() {
            return 0;
        }
        let map = state.map();
        state
            .player(player)
            .active_regions()
            .keys()
            .filter_map(|&region| map.tile(region))
            .flat_map(|tile| {
                self.config
                    .symbol_bonus
                    .iter()
                    .filter(|(symbol, _)| tile.has_symbol(*symbol))
                    .map(|(_, coins)| *coins)
            })
            .sum()
    }
}

impl Rules for DefaultRules {
    fn check_select_combo(&self, state: &GameState, combo: usize) -> Violations {
        let mut violations = Violations::new();

        let n_combos = state.combos().len();
        if combo >= n_combos {
            violations.push(Violation::ComboOutOfRange { index: combo, n_combos });
        }
        if state.has_ended() {
            violations.push(Violation::GameEnded);
            return violations;
        }

        match state.stage() {
            TurnStage::SelectCombo => {}
            TurnStage::Redeployment | TurnStage::RedeploymentTurn => {
                violations.push(Violation::ForbiddenDuringRedeployment);
            }
            TurnStage::Active | TurnStage::GameOver => violations.push(Violation::SelectingWhenActive),
        }

        if let Some(offered) = state.combo(combo) {
            let price = self.combo_price(state, combo);
            let coins = state.current_player().coins();
            if price.cost > coins + offered.coins {
                violations.push(Violation::NotEnoughCoins {
                    coins,
                    price: price.cost,
                });
            }
        }

        violations
    }

    fn check_decline(&self, state: &GameState) -> Violations {
        if state.has_ended() {
            return smallvec![Violation::GameEnded];
        }

        let mut violations = Violations::new();
        Self::check_redeployment(state, &mut violations);
        if state.current_player().active_race().is_none() {
            violations.push(Violation::NoActiveRace);
        } else if state.progress().race_used {
            violations.push(Violation::DecliningWhenActive);
        }
        violations
    }

    fn check_conquer(&self, state: &GameState, region: RegionId, use_dice: bool) -> Violations {
        let mut violations = Violations::new();

        let exists = Self::check_region_index(state, region, &mut violations);
        if state.has_ended() {
            violations.push(Violation::GameEnded);
            return violations;
        }

        Self::check_active_race(state, &mut violations);
        Self::check_redeployment(state, &mut violations);
        if state.progress().dice_used {
            violations.push(Violation::AlreadyUsedDice);
        }
        if !exists {
            return violations;
        }

        let player = state.current_player();
        if player.active_regions().contains_key(&region) {
            violations.push(Violation::ConqueringOwnRegion);
            return violations;
        }
        if !state.is_reachable(region) {
            if player.active_regions().is_empty() {
                violations.push(Violation::NotAtBorder);
            } else {
                violations.push(Violation::NonAdjacentRegion);
            }
        }
        if let Some(tile) = state.map().tile(region) {
            if !self.config.is_conquerable(tile.terrain) {
                violations.push(Violation::UnconquerableTerrain(tile.terrain));
                return violations;
            }
        }

        let tokens_on_hand = player.tokens_on_hand();
        let cost = self.conquest_cost(state, region);
        if use_dice {
            if tokens_on_hand < 1 {
                violations.push(Violation::RollingWithoutTokens);
            }
            let max_roll = self.max_dice_roll();
            if tokens_on_hand.saturating_add(max_roll) < cost {
                violations.push(Violation::NotEnoughTokensToRoll {
                    tokens_on_hand,
                    minimum_required: cost - max_roll,
                });
            }
        } else if tokens_on_hand < cost {
            violations.push(Violation::NotEnoughTokensToConquer {
                tokens_on_hand,
                tokens_required: cost,
            });
        }

        violations
    }

    fn check_abandon(&self, state: &GameState, region: RegionId) -> Violations {
        let mut violations = Violations::new();

        let exists = Self::check_region_index(state, region, &mut violations);
        if state.has_ended() {
            violations.push(Violation::GameEnded);
            return violations;
        }

        Self::check_active_race(state, &mut violations);
        Self::check_redeployment(state, &mut violations);
        let progress = state.progress();
        if progress.conquered || progress.dice_used {
            violations.push(Violation::AbandoningAfterConquests);
        }
        if exists && !state.current_player().active_regions().contains_key(&region) {
            violations.push(Violation::NonControlledRegion);
        }

        violations
    }

    fn check_start_redeployment(&self, state: &GameState) -> Violations {
        if state.has_ended() {
            return smallvec![Violation::GameEnded];
        }

        let mut violations = Violations::new();
        Self::check_active_race(state, &mut violations);
        Self::check_redeployment(state, &mut violations);
        if state.current_player().active_regions().is_empty() {
            violations.push(Violation::NoActiveRegions);
        }
        violations
    }

    fn check_deploy(&self, state: &GameState, region: RegionId, n_tokens: u32) -> Violations {
        let mut violations = Violations::new();

        if n_tokens == 0 {
            violations.push(Violation::NonPositiveTokenCount);
        }
        let exists = Self::check_region_index(state, region, &mut violations);
        if state.has_ended() {
            violations.push(Violation::GameEnded);
            return violations;
        }

        Self::check_active_race(state, &mut violations);
        let player = state.current_player();
        if exists && !player.active_regions().contains_key(&region) {
            violations.push(Violation::NonControlledRegion);
        }
        let tokens_on_hand = player.tokens_on_hand();
        if n_tokens > tokens_on_hand {
            violations.push(Violation::NotEnoughTokensToDeploy { tokens_on_hand });
        }

        violations
    }

    fn check_end_turn(&self, state: &GameState) -> Violations {
        if state.has_ended() {
            return smallvec![Violation::GameEnded];
        }

        let tokens_on_hand = state.current_player().tokens_on_hand();
        match state.stage() {
            TurnStage::SelectCombo => smallvec![Violation::EndBeforeSelect],
            TurnStage::Redeployment | TurnStage::RedeploymentTurn if tokens_on_hand > 0 => {
                smallvec![Violation::UndeployedTokens { tokens_on_hand }]
            }
            _ => Violations::new(),
        }
    }

    fn conquest_cost(&self, state: &GameState, region: RegionId) -> u32 {
        let Some(tile) = state.map().tile(region) else {
            return self.config.base_conquest_cost;
        };

        let defense = match state.owner_of(region) {
            Some(owner) => state
                .player(owner)
                .active_regions()
                .get(&region)
                .copied()
                .unwrap_or(1),
            None if state.has_lost_tribe(region) => self.config.lost_tribe_defense,
            None => 0,
        };

        self.config.base_conquest_cost + self.config.surcharge(tile.terrain) + defense
    }

    fn turn_reward(&self, state: &GameState, player: PlayerId) -> u32 {
        let holdings = state.player(player);
        let n_regions = holdings.active_regions().len() + holdings.decline_regions().len();
        n_regions as u32 + self.symbol_bonus(state, player)
    }

    fn combo_price(&self, _state: &GameState, combo: usize) -> ComboPrice {
        ComboPrice {
            cost: combo as u32,
            placements: (0..combo).map(|skipped| (skipped, 1)).collect::<SmallVec<_>>(),
        }
    }

    fn max_dice_roll(&self) -> u32 {
        self.config.max_dice_roll
    }
}
