//! The game orchestrator.
//!
//! `Game` owns a `GameState`, a rule set and the dice. It is the only place
//! where state changes:
//!
//! 1. `apply` asks the rules to `check` the action
//! 2. any violation rejects the action and leaves the state untouched
//! 3. otherwise the action is performed and the turn-stage machine advances
//!
//! ## Turn stages
//!
//! ```text
//! SelectCombo --select--> Active --end turn (reserve, regions)--> Redeployment --end turn--> next player
//!                           |  \--start redeployment------------------^
//!                           |--decline / end turn-----------------------------------------> next player
//! ```
//!
//! Before the next regular turn starts, every other player who was attacked
//! and holds reserve tokens plus an active region gets a `RedeploymentTurn`.

use std::sync::Arc;

use im::Vector;
use thiserror::Error;
use tracing::{debug, info, trace};

use super::event::GameEvent;
use crate::core::action::{Action, ActionRecord};
use crate::core::config::{Assets, AssetsError};
use crate::core::rng::{DiceRoller, GameRng};
use crate::core::state::{GameState, TurnProgress, TurnStage};
use crate::map::RegionId;
use crate::rules::{DefaultRules, Rules, Violation, Violations};

/// Why `Game::apply` refused an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game is over. Calling `apply` again is a caller bug.
    #[error("the game is over, no more actions are accepted")]
    GameEnded,
    /// The rules found problems with the action.
    #[error("action rejected with {} violation(s)", .0.len())]
    Rejected(Violations),
}

impl ActionError {
    /// The violations behind a rejection. Empty for `GameEnded`.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::GameEnded => &[],
            Self::Rejected(violations) => violations,
        }
    }
}

/// A running game.
pub struct Game<R: Rules = DefaultRules> {
    state: GameState,
    rules: R,
    dice: Box<dyn DiceRoller + Send>,
    history: Vector<ActionRecord>,
}

impl<R: Rules> std::fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

impl<R: Rules> Game<R> {
    /// Start a game with assets in their given order and seeded dice.
    ///
    /// Use [`GameBuilder`](super::GameBuilder) for shuffling or scripted dice.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetsError`] if the assets can't support a game.
    pub fn new(assets: Assets, rules: R, seed: u64) -> Result<Self, AssetsError> {
        assets.validate()?;
        let dice = GameRng::new(seed).for_context("dice");
        Ok(Self::from_parts(Arc::new(assets), rules, Box::new(dice)))
    }

    /// Assumes `assets` are validated.
    pub(crate) fn from_parts(assets: Arc<Assets>, rules: R, dice: Box<dyn DiceRoller + Send>) -> Self {
        info!(
            assets = %assets.name,
            n_players = assets.n_players,
            n_turns = assets.n_turns,
            "Game started"
        );
        Self {
            state: GameState::new(assets),
            rules,
            dice,
            history: Vector::new(),
        }
    }

    // === Queries ===

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The rule set in use.
    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Every accepted action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Check whether the game is over.
    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.state.has_ended()
    }

    /// Dry run: the violations `action` would cause right now.
    ///
    /// Never mutates anything.
    #[must_use]
    pub fn check(&self, action: &Action) -> Violations {
        self.rules.check(&self.state, action)
    }

    /// Every action that currently passes `check`.
    ///
    /// Deploy actions are listed for every token count up to the reserve.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.state.has_ended() {
            return Vec::new();
        }

        let mut candidates = vec![Action::Decline, Action::StartRedeployment, Action::EndTurn];
        candidates.extend((0..self.state.combos().len()).map(|combo| Action::SelectCombo { combo }));
        for region in self.state.map().regions() {
            candidates.push(Action::conquer(region));
            candidates.push(Action::conquer_with_dice(region));
            candidates.push(Action::Abandon { region });
        }
        let player = self.state.current_player();
        for &region in player.active_regions().keys() {
            candidates.extend((1..=player.tokens_on_hand()).map(|n_tokens| Action::Deploy { region, n_tokens }));
        }

        candidates.retain(|action| self.check(action).is_empty());
        candidates
    }

    // === Actions ===

    /// Perform an action.
    ///
    /// On success returns the transitions it caused, in order. On failure
    /// the state is unchanged.
    ///
    /// # Errors
    ///
    /// - [`ActionError::GameEnded`] after the last turn
    /// - [`ActionError::Rejected`] with every violation found by the rules
    pub fn apply(&mut self, action: Action) -> Result<Vec<GameEvent>, ActionError> {
        if self.state.has_ended() {
            return Err(ActionError::GameEnded);
        }

        let player = self.state.current_player_id();
        let violations = self.check(&action);
        if !violations.is_empty() {
            debug!(
                %player,
                %action,
                n_violations = violations.len(),
                "Action rejected"
            );
            return Err(ActionError::Rejected(violations));
        }

        let turn = self.state.turn();
        let mut events = Vec::new();
        match action {
            Action::SelectCombo { combo } => self.select_combo(combo, &mut events),
            Action::Decline => self.decline(&mut events),
            Action::Conquer { region, use_dice } => self.conquer(region, use_dice, &mut events),
            Action::Abandon { region } => self.abandon(region, &mut events),
            Action::StartRedeployment => self.start_redeployment(&mut events),
            Action::Deploy { region, n_tokens } => self.deploy(region, n_tokens, &mut events),
            Action::EndTurn => self.end_turn(&mut events),
        }

        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(player, action, turn, sequence));
        debug!(%player, %action, n_events = events.len(), "Action applied");

        Ok(events)
    }

    fn select_combo(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        debug_assert!(index < self.state.combos.len(), "combo index checked by the rules");

        let price = self.rules.combo_price(&self.state, index);
        for &(skipped, coins) in &price.placements {
            if skipped != index {
                if let Some(other) = self.state.combos.get_mut(skipped) {
                    other.coins += coins;
                }
            }
        }
        let combo = self.state.combos.remove(index);

        let player_id = self.state.current_player_id();
        self.state.take_from_storage(combo.race, combo.n_tokens);
        let player = self.state.current_player_mut();
        player.coins = (player.coins + combo.coins).saturating_sub(price.cost);
        player.active_race = Some(combo.race);
        player.active_ability = Some(combo.ability);
        player.tokens_on_hand += combo.n_tokens;

        self.state.reveal_combo();
        self.state.stage = TurnStage::Active;
        self.state.progress.race_used = true;

        events.push(GameEvent::ComboSelected {
            player: player_id,
            combo: index,
            race: combo.race,
            ability: combo.ability,
            n_tokens: combo.n_tokens,
            coins_paid: price.cost,
            coins_collected: combo.coins,
        });
    }

    fn decline(&mut self, events: &mut Vec<GameEvent>) {
        let player_id = self.state.current_player_id();
        let player = self.state.current_player_mut();

        let race = player.active_race.take();
        let ability = player.active_ability.take();
        let old_race = player.decline_race.take();
        let n_old_regions = player.decline_regions.len() as u32;

        let active_regions = std::mem::take(&mut player.active_regions);
        let freed = (player.tokens_on_hand + active_regions.values().sum::<u32>())
            .saturating_sub(active_regions.len() as u32);
        player.decline_regions = active_regions.keys().copied().collect();
        player.tokens_on_hand = 0;
        player.decline_race = race;
        let n_regions = player.decline_regions.len();

        if let Some(old_race) = old_race {
            self.state.return_to_storage(old_race, n_old_regions);
            self.state.hidden_races.push_back(old_race);
        }
        if let Some(ability) = ability {
            self.state.hidden_abilities.push_back(ability);
        }
        if let Some(race) = race {
            self.state.return_to_storage(race, freed);
            events.push(GameEvent::Declined {
                player: player_id,
                race,
                n_regions,
            });
        }

        self.finish_turn(0, events);
    }

    fn conquer(&mut self, region: RegionId, use_dice: bool, events: &mut Vec<GameEvent>) {
        let player = self.state.current_player_id();
        let cost = self.rules.conquest_cost(&self.state, region);
        self.state.progress.race_used = true;

        if !use_dice {
            self.occupy(region, cost, events);
            return;
        }

        let value = self.dice.roll(self.rules.max_dice_roll());
        self.state.progress.dice_used = true;
        trace!(%player, %region, value, cost, "Dice rolled");
        events.push(GameEvent::DiceRolled { player, value });

        let needed = cost.saturating_sub(value).max(1);
        if needed <= self.state.current_player().tokens_on_hand() {
            self.occupy(region, needed, events);
        } else {
            events.push(GameEvent::ConquestFailed { player, region, cost });
        }
    }

    /// Move `n_tokens` from the current player's reserve into `region`,
    /// driving out whoever held it.
    fn occupy(&mut self, region: RegionId, n_tokens: u32, events: &mut Vec<GameEvent>) {
        let lost_tribe = self.state.lost_tribes.remove(&region).is_some();
        let defender = self.state.owner_of(region);

        if let Some(defender) = defender {
            let holder = &mut self.state.players[defender];
            // The defender keeps all but one token of an active region
            let lost = if let Some(n_defending) = holder.active_regions.remove(&region) {
                holder.tokens_on_hand += n_defending.saturating_sub(1);
                holder.active_race.map(|race| (race, n_defending.min(1)))
            } else if holder.decline_regions.remove(&region).is_some() {
                holder.decline_race.map(|race| (race, 1))
            } else {
                None
            };
            if let Some((race, n_tokens)) = lost {
                self.state.return_to_storage(race, n_tokens);
            }
        }

        let player_id = self.state.current_player_id();
        let player = self.state.current_player_mut();
        player.tokens_on_hand = player.tokens_on_hand.saturating_sub(n_tokens);
        player.active_regions.insert(region, n_tokens);
        self.state.progress.conquered = true;

        trace!(player = %player_id, %region, n_tokens, ?defender, "Region conquered");
        events.push(GameEvent::RegionConquered {
            player: player_id,
            region,
            n_tokens,
            defender,
            lost_tribe,
        });
    }

    fn abandon(&mut self, region: RegionId, events: &mut Vec<GameEvent>) {
        let player_id = self.state.current_player_id();
        let player = self.state.current_player_mut();
        let n_tokens = player.active_regions.remove(&region).unwrap_or(0);
        player.tokens_on_hand += n_tokens;
        self.state.progress.race_used = true;

        events.push(GameEvent::RegionAbandoned {
            player: player_id,
            region,
            n_tokens,
        });
    }

    fn start_redeployment(&mut self, events: &mut Vec<GameEvent>) {
        let player_id = self.state.current_player_id();
        let tokens_on_hand = {
            let player = self.state.current_player_mut();
            player.pick_up_tokens();
            player.tokens_on_hand
        };
        self.state.stage = TurnStage::Redeployment;
        self.state.progress.race_used = true;

        events.push(GameEvent::RedeploymentStarted {
            player: player_id,
            tokens_on_hand,
        });
    }

    fn deploy(&mut self, region: RegionId, n_tokens: u32, events: &mut Vec<GameEvent>) {
        let player_id = self.state.current_player_id();
        let player = self.state.current_player_mut();
        let n_tokens = n_tokens.min(player.tokens_on_hand);
        let on_region = player.active_regions.get(&region).copied().unwrap_or(0);
        player.tokens_on_hand -= n_tokens;
        player.active_regions.insert(region, on_region + n_tokens);
        self.state.progress.race_used = true;

        trace!(player = %player_id, %region, n_tokens, "Tokens deployed");
        events.push(GameEvent::TokensDeployed {
            player: player_id,
            region,
            n_tokens,
        });
    }

    fn end_turn(&mut self, events: &mut Vec<GameEvent>) {
        let player_id = self.state.current_player_id();

        match self.state.stage {
            TurnStage::RedeploymentTurn => {
                self.switch_player(events);
                return;
            }
            TurnStage::Active => {
                let player = self.state.current_player();
                let tokens_on_hand = player.tokens_on_hand();
                if tokens_on_hand > 0 {
                    if !player.active_regions().is_empty() {
                        self.state.stage = TurnStage::Redeployment;
                        events.push(GameEvent::RedeploymentStarted {
                            player: player_id,
                            tokens_on_hand,
                        });
                        return;
                    }
                    if let Some(race) = player.active_race() {
                        self.state.return_to_storage(race, tokens_on_hand);
                    }
                    self.state.current_player_mut().tokens_on_hand = 0;
                }
            }
            _ => {}
        }

        let reward = self.rules.turn_reward(&self.state, player_id);
        self.finish_turn(reward, events);
    }

    /// Pay `reward` to the current player and pass control on.
    fn finish_turn(&mut self, reward: u32, events: &mut Vec<GameEvent>) {
        let player = self.state.current_player_id();
        self.state.current_player_mut().coins += reward;
        info!(%player, turn = self.state.turn, reward, "Turn ended");
        events.push(GameEvent::TurnEnded { player, reward });
        self.switch_player(events);
    }

    fn switch_player(&mut self, events: &mut Vec<GameEvent>) {
        self.state.progress = TurnProgress::default();

        let next = self.state.next_player;
        let redeploying = self
            .state
            .players
            .iter()
            .find(|(id, p)| *id != next && p.tokens_on_hand > 0 && !p.active_regions.is_empty())
            .map(|(id, p)| (id, p.tokens_on_hand));
        if let Some((player, tokens_on_hand)) = redeploying {
            self.state.current = player;
            self.state.stage = TurnStage::RedeploymentTurn;
            info!(%player, tokens_on_hand, "Redeployment turn started");
            events.push(GameEvent::RedeploymentTurnStarted { player, tokens_on_hand });
            return;
        }

        self.state.current = next;
        self.state.next_player = next.next(self.state.player_count());
        if next.index() == 0 {
            self.state.turn += 1;
        }

        if self.state.has_ended() {
            self.state.stage = TurnStage::GameOver;
            let coins: Vec<u32> = self.state.players.values().map(|p| p.coins).collect();
            info!(?coins, "Game ended");
            events.push(GameEvent::GameEnded { coins });
            return;
        }

        let player = self.state.current_player_mut();
        let tokens_picked_up = player.pick_up_tokens();
        let in_decline = player.is_in_decline();
        self.state.stage = if in_decline {
            TurnStage::SelectCombo
        } else {
            TurnStage::Active
        };

        let turn = self.state.turn;
        info!(player = %next, turn, "Turn started");
        events.push(GameEvent::TurnStarted {
            player: next,
            turn,
            tokens_picked_up,
        });
    }
}
