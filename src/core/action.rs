//! Actions a player can submit, and the history record kept for each.
//!
//! Actions are a closed set. Arguments are raw indices coming from the
//! front end; they are bounds-checked by the rules, never trusted.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::map::RegionId;

/// A single in-game action.
///
/// ## Example
///
/// ```
/// use conquest_engine::core::Action;
/// use conquest_engine::map::RegionId;
///
/// let first = Action::SelectCombo { combo: 0 };
/// let attack = Action::conquer(RegionId(3));
/// let gamble = Action::conquer_with_dice(RegionId(4));
/// assert!(!attack.uses_dice());
/// assert!(gamble.uses_dice());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Take the combo at `combo` in the visible pool as the active race.
    SelectCombo { combo: usize },
    /// Put the active race in decline. Ends the turn.
    Decline,
    /// Conquer a region, optionally rolling the reinforcement dice.
    Conquer { region: RegionId, use_dice: bool },
    /// Give up an active region, taking its tokens back into the reserve.
    Abandon { region: RegionId },
    /// Stop conquering and pick up tokens, leaving one in each active region.
    StartRedeployment,
    /// Move tokens from the reserve onto an active region.
    Deploy { region: RegionId, n_tokens: u32 },
    /// End the turn (or the redeployment pseudo-turn).
    EndTurn,
}

impl Action {
    /// A plain conquest.
    #[must_use]
    pub const fn conquer(region: RegionId) -> Self {
        Self::Conquer {
            region,
            use_dice: false,
        }
    }

    /// A dice-assisted conquest.
    #[must_use]
    pub const fn conquer_with_dice(region: RegionId) -> Self {
        Self::Conquer {
            region,
            use_dice: true,
        }
    }

    /// Check whether this action rolls the dice.
    #[must_use]
    pub const fn uses_dice(&self) -> bool {
        matches!(self, Self::Conquer { use_dice: true, .. })
    }

    /// The region this action targets, if any.
    #[must_use]
    pub const fn region(&self) -> Option<RegionId> {
        match self {
            Self::Conquer { region, .. } | Self::Abandon { region } | Self::Deploy { region, .. } => {
                Some(*region)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectCombo { combo } => write!(f, "select combo {}", combo),
            Self::Decline => write!(f, "decline"),
            Self::Conquer { region, use_dice: false } => write!(f, "conquer {}", region),
            Self::Conquer { region, use_dice: true } => write!(f, "conquer {} with dice", region),
            Self::Abandon { region } => write!(f, "abandon {}", region),
            Self::StartRedeployment => write!(f, "start redeployment"),
            Self::Deploy { region, n_tokens } => write!(f, "deploy {} to {}", n_tokens, region),
            Self::EndTurn => write!(f, "end turn"),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - AI consumers reconstructing opponent behaviour
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_region() {
        assert_eq!(Action::conquer(RegionId(2)).region(), Some(RegionId(2)));
        assert_eq!(Action::Abandon { region: RegionId(1) }.region(), Some(RegionId(1)));
        assert_eq!(
            Action::Deploy { region: RegionId(4), n_tokens: 2 }.region(),
            Some(RegionId(4))
        );
        assert_eq!(Action::EndTurn.region(), None);
        assert_eq!(Action::SelectCombo { combo: 1 }.region(), None);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::conquer_with_dice(RegionId(5)).to_string(), "conquer Region(5) with dice");
        assert_eq!(
            Action::Deploy { region: RegionId(0), n_tokens: 3 }.to_string(),
            "deploy 3 to Region(0)"
        );
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Deploy { region: RegionId(3), n_tokens: 2 };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::new(1), Action::Decline, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
        assert_eq!(deserialized.turn, 2);
    }
}
