//! Rules trait for rule-set implementations.
//!
//! A rule set decides:
//! - Whether an action is legal in a given state (`check_*`)
//! - Policy numbers the orchestrator needs (conquest cost, turn reward,
//!   combo price, dice ceiling)
//!
//! Rule sets never mutate state. `Game` calls `check` before every action
//! and only mutates when it returns no violations.
//!
//! ## Composition
//!
//! A custom rule set wraps a base rule set, returns it from
//! [`Rules::base`] and overrides only what it changes. Every method it
//! leaves alone delegates to the base:
//!
//! ```
//! use conquest_engine::core::GameState;
//! use conquest_engine::map::RegionId;
//! use conquest_engine::rules::{DefaultRules, Rules, Violation, Violations};
//!
//! /// Forbids the reinforcement dice.
//! struct NoDice(DefaultRules);
//!
//! impl Rules for NoDice {
//!     fn base(&self) -> Option<&dyn Rules> {
//!         Some(&self.0)
//!     }
//!
//!     fn check_conquer(&self, state: &GameState, region: RegionId, use_dice: bool) -> Violations {
//!         let mut violations = self.0.check_conquer(state, region, use_dice);
//!         if use_dice {
//!             violations.push(Violation::Custom("dice are disabled".into()));
//!         }
//!         violations
//!     }
//! }
//!
//! assert_eq!(NoDice(DefaultRules::new()).max_dice_roll(), 6);
//! ```
//!
//! A rule set without a base delegates to the standard [`DefaultRules`].

use std::sync::LazyLock;

use smallvec::SmallVec;

use super::default::DefaultRules;
use super::violation::Violations;
use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::map::RegionId;

/// What selecting a combo costs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComboPrice {
    /// Coins the player pays.
    pub cost: u32,
    /// Coins placed on other visible combos, as `(combo index, coins)`.
    ///
    /// Their sum must not exceed `cost`.
    pub placements: SmallVec<[(usize, u32); 6]>,
}

/// Rules trait.
///
/// All methods take the state by shared reference and must be pure:
/// calling them any number of times has no observable effect.
///
/// ## Implementation Notes
///
/// - `check_*`: Return every violation found, not just the first
/// - `check_*`: Report structural problems (out-of-range indices) as
///   violations, never panic on them
/// - Policy methods (`conquest_cost`, `combo_price`) may assume their
///   arguments already passed the matching `check_*`
pub trait Rules {
    /// Check any action.
    ///
    /// The default implementation dispatches to the per-action checks.
    fn check(&self, state: &GameState, action: &Action) -> Violations {
        match *action {
            Action::SelectCombo { combo } => self.check_select_combo(state, combo),
            Action::Decline => self.check_decline(state),
            Action::Conquer { region, use_dice } => self.check_conquer(state, region, use_dice),
            Action::Abandon { region } => self.check_abandon(state, region),
            Action::StartRedeployment => self.check_start_redeployment(state),
            Action::Deploy { region, n_tokens } => self.check_deploy(state, region, n_tokens),
            Action::EndTurn => self.check_end_turn(state),
        }
    }

    /// Rule set consulted for every method this one doesn't override.
    ///
    /// `None` falls back to the standard rules.
    fn base(&self) -> Option<&dyn Rules> {
        None
    }

    /// Check selecting the visible combo at index `combo`.
    fn check_select_combo(&self, state: &GameState, combo: usize) -> Violations {
        delegate(self).check_select_combo(state, combo)
    }

    /// Check putting the active race in decline.
    fn check_decline(&self, state: &GameState) -> Violations {
        delegate(self).check_decline(state)
    }

    /// Check conquering `region`, with or without the dice.
    fn check_conquer(&self, state: &GameState, region: RegionId, use_dice: bool) -> Violations {
        delegate(self).check_conquer(state, region, use_dice)
    }

    /// Check abandoning `region`.
    fn check_abandon(&self, state: &GameState, region: RegionId) -> Violations {
        delegate(self).check_abandon(state, region)
    }

    /// Check starting redeployment.
    fn check_start_redeployment(&self, state: &GameState) -> Violations {
        delegate(self).check_start_redeployment(state)
    }

    /// Check deploying `n_tokens` from the reserve to `region`.
    fn check_deploy(&self, state: &GameState, region: RegionId, n_tokens: u32) -> Violations {
        delegate(self).check_deploy(state, region, n_tokens)
    }

    /// Check ending the turn.
    fn check_end_turn(&self, state: &GameState) -> Violations {
        delegate(self).check_end_turn(state)
    }

    /// Tokens the current player needs to conquer `region`.
    fn conquest_cost(&self, state: &GameState, region: RegionId) -> u32 {
        delegate(self).conquest_cost(state, region)
    }

    /// Coins `player` earns at the end of a regular turn.
    fn turn_reward(&self, state: &GameState, player: PlayerId) -> u32 {
        delegate(self).turn_reward(state, player)
    }

    /// Price of the visible combo at index `combo`.
    fn combo_price(&self, state: &GameState, combo: usize) -> ComboPrice {
        delegate(self).combo_price(state, combo)
    }

    /// Highest face of the reinforcement dice.
    fn max_dice_roll(&self) -> u32 {
        delegate(self).max_dice_roll()
    }
}

static STANDARD: LazyLock<DefaultRules> = LazyLock::new(DefaultRules::new);

/// The rule set `rules` delegates to.
fn delegate<R: Rules + ?Sized>(rules: &R) -> &dyn Rules {
    match rules.base() {
        Some(base) => base,
        None => &*STANDARD,
    }
}

impl<R: Rules + ?Sized> Rules for Box<R> {
    fn base(&self) -> Option<&dyn Rules> {
        (**self).base()
    }

    fn check(&self, state: &GameState, action: &Action) -> Violations {
        (**self).check(state, action)
    }

    fn check_select_combo(&self, state: &GameState, combo: usize) -> Violations {
        (**self).check_select_combo(state, combo)
    }

    fn check_decline(&self, state: &GameState) -> Violations {
        (**self).check_decline(state)
    }

    fn check_conquer(&self, state: &GameState, region: RegionId, use_dice: bool) -> Violations {
        (**self).check_conquer(state, region, use_dice)
    }

    fn check_abandon(&self, state: &GameState, region: RegionId) -> Violations {
        (**self).check_abandon(state, region)
    }

    fn check_start_redeployment(&self, state: &GameState) -> Violations {
        (**self).check_start_redeployment(state)
    }

    fn check_deploy(&self, state: &GameState, region: RegionId, n_tokens: u32) -> Violations {
        (**self).check_deploy(state, region, n_tokens)
    }

    fn check_end_turn(&self, state: &GameState) -> Violations {
        (**self).check_end_turn(state)
    }

    fn conquest_cost(&self, state: &GameState, region: RegionId) -> u32 {
        (**self).conquest_cost(state, region)
    }

    fn turn_reward(&self, state: &GameState, player: PlayerId) -> u32 {
        (**self).turn_reward(state, player)
    }

    fn combo_price(&self, state: &GameState, combo: usize) -> ComboPrice {
        (**self).combo_price(state, combo)
    }

    fn max_dice_roll(&self) -> u32 {
        (**self).max_dice_roll()
    }
}
