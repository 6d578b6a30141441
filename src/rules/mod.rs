//! Rule sets: action validation and game policy.
//!
//! Rule sets implement `Rules` to define:
//! - Which actions are legal in a given state
//! - Conquest costs, turn rewards and combo prices
//!
//! The `Game` orchestrator calls into `Rules` but never decides legality
//! itself. `DefaultRules` is the standard rule set; custom rule sets wrap
//! it and override individual checks.

pub mod default;
pub mod engine;
pub mod violation;

pub use default::{DefaultRules, RulesConfig};
pub use engine::{ComboPrice, Rules};
pub use violation::{Violation, Violations};
