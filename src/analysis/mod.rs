//! Per-frame analysis pipeline: angle measurement, phase classification,
//! and form feedback over one pose snapshot.

pub mod feedback;
pub mod phase;

pub use phase::{classify, completes_rep, PhaseObservation, RepPhase};

use std::collections::HashMap;

use serde::Serialize;

use crate::exercises::ExerciseProfile;
use crate::pose::{geometry::joint_angle, PoseSnapshot};

/// Composite result of analysing one frame during an active session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub exercise: String,
    pub rep_count: u32,
    /// Angle-definition name to measured degrees, for every definition whose
    /// landmarks qualified this frame.
    pub angles: HashMap<String, f64>,
    pub feedback: Vec<String>,
    /// Mean confidence across all landmarks in the frame.
    pub confidence: f64,
}

/// Measure each of the profile's angle definitions against a snapshot.
///
/// A definition only yields a value when all three of its landmarks are
/// present with confidence at or above `confidence_threshold`; anything less
/// is treated as no signal for that angle. A frame where the primary
/// definition is absent therefore produces no phase decision upstream.
pub fn measure_angles(
    profile: &ExerciseProfile,
    snapshot: &PoseSnapshot,
    confidence_threshold: f64,
) -> HashMap<String, f64> {
    let mut angles = HashMap::new();

    for definition in profile.angles {
        let points: Vec<_> = definition
            .landmarks
            .iter()
            .filter_map(|name| snapshot.get(name))
            .filter(|lm| lm.confidence >= confidence_threshold)
            .map(|lm| lm.position())
            .collect();

        if let [a, b, c] = points[..] {
            angles.insert(definition.name.to_string(), joint_angle(a, b, c));
        }
    }

    angles
}
