//! Reasons an action is rejected.
//!
//! Structural problems (malformed arguments) and rule violations travel
//! through the same channel so a front end can explain every problem with a
//! proposed action at once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::map::{RegionId, Terrain};

/// All violations found for one action. Usually 0-2 entries.
pub type Violations = SmallVec<[Violation; 4]>;

/// A single reason why an action can't be performed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Violation {
    // === Structural ===
    #[error("combo index {index} is out of range (there are {n_combos} combos)")]
    ComboOutOfRange { index: usize, n_combos: usize },
    #[error("{region} is out of range (the map has {n_regions} regions)")]
    RegionOutOfRange { region: RegionId, n_regions: usize },
    #[error("the number of tokens must be greater than 0")]
    NonPositiveTokenCount,

    // === Rules ===
    #[error("the game is over, this action is not available anymore")]
    GameEnded,
    #[error("to do this, you need to control an active race")]
    NoActiveRace,
    #[error("this action is not allowed during redeployment")]
    ForbiddenDuringRedeployment,
    #[error("you've already used your active race during this turn, you can only decline during the next turn")]
    DecliningWhenActive,
    #[error("you need to decline first")]
    SelectingWhenActive,
    #[error("the region must be controlled by your active race")]
    NonControlledRegion,
    #[error("you can't abandon regions after making conquests")]
    AbandoningAfterConquests,
    #[error("you've already rolled the dice during this turn and can't make any more conquests")]
    AlreadyUsedDice,
    #[error("the initial conquest must be at the map border")]
    NotAtBorder,
    #[error("the region must be adjacent to any of your active regions")]
    NonAdjacentRegion,
    #[error("can't conquer your own region")]
    ConqueringOwnRegion,
    #[error("{0} regions can't be conquered")]
    UnconquerableTerrain(Terrain),
    #[error("you must control at least one active region")]
    NoActiveRegions,
    #[error("you need to select a new race+ability combo before ending this turn")]
    EndBeforeSelect,
    #[error("not enough coins (you have {coins}, the combo costs {price})")]
    NotEnoughCoins { coins: u32, price: u32 },
    #[error("to roll the dice, you need to have at least 1 token on hand")]
    RollingWithoutTokens,
    #[error("not enough tokens on hand (you have {tokens_on_hand}, but need {tokens_required})")]
    NotEnoughTokensToConquer { tokens_on_hand: u32, tokens_required: u32 },
    #[error("not enough tokens on hand (you have {tokens_on_hand}, but need at least {minimum_required} to have a chance)")]
    NotEnoughTokensToRoll { tokens_on_hand: u32, minimum_required: u32 },
    #[error("not enough tokens on hand (you have {tokens_on_hand})")]
    NotEnoughTokensToDeploy { tokens_on_hand: u32 },
    #[error("you need to deploy the remaining {tokens_on_hand} tokens on hand")]
    UndeployedTokens { tokens_on_hand: u32 },

    /// Raised by custom rule sets.
    #[error("{0}")]
    Custom(String),
}

impl Violation {
    /// Check whether this is a malformed-argument problem rather than a
    /// rule violation.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ComboOutOfRange { .. } | Self::RegionOutOfRange { .. } | Self::NonPositiveTokenCount
        )
    }
}
