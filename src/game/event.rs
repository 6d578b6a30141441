//! Events reported by `Game::apply`.
//!
//! Every accepted action returns the transitions it caused, in order. Front
//! ends render these instead of diffing the state.

use serde::{Deserialize, Serialize};

use crate::core::config::{AbilityId, RaceId};
use crate::core::player::PlayerId;
use crate::map::RegionId;

/// A state transition caused by an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A combo was taken from the visible pool.
    ComboSelected {
        player: PlayerId,
        combo: usize,
        race: RaceId,
        ability: AbilityId,
        n_tokens: u32,
        coins_paid: u32,
        coins_collected: u32,
    },
    /// The active race went into decline.
    Declined {
        player: PlayerId,
        race: RaceId,
        n_regions: usize,
    },
    /// The reinforcement dice were rolled.
    DiceRolled { player: PlayerId, value: u32 },
    /// A region changed hands.
    RegionConquered {
        player: PlayerId,
        region: RegionId,
        n_tokens: u32,
        /// Previous owner, if any.
        defender: Option<PlayerId>,
        /// Whether a lost tribe was driven out.
        lost_tribe: bool,
    },
    /// A dice-assisted conquest fell short.
    ConquestFailed {
        player: PlayerId,
        region: RegionId,
        cost: u32,
    },
    /// An active region was given up.
    RegionAbandoned {
        player: PlayerId,
        region: RegionId,
        n_tokens: u32,
    },
    /// Reserve tokens were placed on an active region.
    TokensDeployed {
        player: PlayerId,
        region: RegionId,
        n_tokens: u32,
    },
    /// The player entered the redeployment stage.
    RedeploymentStarted { player: PlayerId, tokens_on_hand: u32 },
    /// A regular turn ended and its reward was paid.
    TurnEnded { player: PlayerId, reward: u32 },
    /// A player gets control to place tokens recovered after an attack.
    RedeploymentTurnStarted { player: PlayerId, tokens_on_hand: u32 },
    /// A regular turn started.
    TurnStarted {
        player: PlayerId,
        turn: u32,
        tokens_picked_up: u32,
    },
    /// The last turn is over. Final coin balances in seating order.
    GameEnded { coins: Vec<u32> },
}

impl GameEvent {
    /// The player this event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::ComboSelected { player, .. }
            | Self::Declined { player, .. }
            | Self::DiceRolled { player, .. }
            | Self::RegionConquered { player, .. }
            | Self::ConquestFailed { player, .. }
            | Self::RegionAbandoned { player, .. }
            | Self::TokensDeployed { player, .. }
            | Self::RedeploymentStarted { player, .. }
            | Self::TurnEnded { player, .. }
            | Self::RedeploymentTurnStarted { player, .. }
            | Self::TurnStarted { player, .. } => Some(*player),
            Self::GameEnded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let event = GameEvent::DiceRolled {
            player: PlayerId::new(1),
            value: 4,
        };
        assert_eq!(event.player(), Some(PlayerId::new(1)));
        assert_eq!(GameEvent::GameEnded { coins: vec![3, 4] }.player(), None);
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::RegionConquered {
            player: PlayerId::new(0),
            region: RegionId(3),
            n_tokens: 2,
            defender: Some(PlayerId::new(1)),
            lost_tribe: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<GameEvent>(&json).unwrap(), event);
    }
}
