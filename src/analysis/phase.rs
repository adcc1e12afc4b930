//! Movement-phase classification for the primary signal angle.

use serde::{Deserialize, Serialize};

use crate::exercises::PhaseRule;

/// Phase of a repetition exercise, derived from the primary signal angle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RepPhase {
    Up,
    Down,
    Middle,
}

/// Per-frame phase observation for either exercise kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseObservation {
    Rep(RepPhase),
    Hold { in_range: bool },
}

/// Classify one primary-signal angle under the profile's phase rule.
pub fn classify(rule: &PhaseRule, angle: f64) -> PhaseObservation {
    match *rule {
        PhaseRule::Reps {
            up_angle_min,
            down_angle_max,
        } => {
            let phase = if angle > up_angle_min {
                RepPhase::Up
            } else if angle < down_angle_max {
                RepPhase::Down
            } else {
                RepPhase::Middle
            };
            PhaseObservation::Rep(phase)
        }
        PhaseRule::Hold {
            target_angle,
            tolerance,
        } => PhaseObservation::Hold {
            in_range: (angle - target_angle).abs() <= tolerance,
        },
    }
}

/// A repetition completes exactly on the Down -> Up edge. Transitions in any
/// other direction, including passes through Middle, never count.
pub fn completes_rep(committed: Option<RepPhase>, current: RepPhase) -> bool {
    committed == Some(RepPhase::Down) && current == RepPhase::Up
}
