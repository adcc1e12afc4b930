//! Static exercise profiles: which joint angles matter for an exercise and
//! the thresholds that define its movement phases.

/// One tracked joint angle: the output name plus the three landmarks whose
/// included angle (at the middle landmark) defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleDefinition {
    pub name: &'static str,
    /// Outer, vertex, outer: e.g. shoulder, elbow, wrist for an arm angle.
    pub landmarks: [&'static str; 3],
}

/// How movement phases are derived from the primary signal angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseRule {
    /// Repetition exercise: above `up_angle_min` is extended, below
    /// `down_angle_max` is flexed, anything between is transit.
    Reps { up_angle_min: f64, down_angle_max: f64 },
    /// Isometric hold: the angle should stay within `tolerance` degrees of
    /// `target_angle`. No reps are counted; duration is the success metric.
    Hold { target_angle: f64, tolerance: f64 },
}

/// Which rule set the form-feedback generator applies. Resolved here, once,
/// so feedback never re-matches exercise names per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackFamily {
    PushUp,
    Squat,
    Hold,
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseProfile {
    /// Canonical key, also the display name used in summaries.
    pub key: &'static str,
    pub angles: &'static [AngleDefinition],
    pub rule: PhaseRule,
    pub feedback: FeedbackFamily,
}

impl ExerciseProfile {
    /// The angle definition driving phase classification. Only the first
    /// definition is consulted for rep counting, even for bilateral
    /// exercises; the remaining definitions still feed form feedback.
    pub fn primary_angle(&self) -> &'static AngleDefinition {
        &self.angles[0]
    }
}

/// Registration order matters: `resolve` returns the first fuzzy match, and
/// the first entry doubles as the fallback profile.
const PROFILES: &[ExerciseProfile] = &[
    ExerciseProfile {
        key: "push-ups",
        angles: &[
            AngleDefinition {
                name: "left_arm",
                landmarks: ["leftShoulder", "leftElbow", "leftWrist"],
            },
            AngleDefinition {
                name: "right_arm",
                landmarks: ["rightShoulder", "rightElbow", "rightWrist"],
            },
        ],
        rule: PhaseRule::Reps {
            up_angle_min: 160.0,
            down_angle_max: 90.0,
        },
        feedback: FeedbackFamily::PushUp,
    },
    ExerciseProfile {
        key: "squats",
        angles: &[
            AngleDefinition {
                name: "left_leg",
                landmarks: ["leftHip", "leftKnee", "leftAnkle"],
            },
            AngleDefinition {
                name: "right_leg",
                landmarks: ["rightHip", "rightKnee", "rightAnkle"],
            },
        ],
        rule: PhaseRule::Reps {
            up_angle_min: 160.0,
            down_angle_max: 90.0,
        },
        feedback: FeedbackFamily::Squat,
    },
    ExerciseProfile {
        key: "plank",
        angles: &[AngleDefinition {
            name: "body_line",
            landmarks: ["leftShoulder", "leftHip", "leftAnkle"],
        }],
        rule: PhaseRule::Hold {
            target_angle: 180.0,
            tolerance: 20.0,
        },
        feedback: FeedbackFamily::Hold,
    },
    ExerciseProfile {
        key: "lunges",
        angles: &[
            AngleDefinition {
                name: "front_leg",
                landmarks: ["leftHip", "leftKnee", "leftAnkle"],
            },
            AngleDefinition {
                name: "back_leg",
                landmarks: ["rightHip", "rightKnee", "rightAnkle"],
            },
        ],
        rule: PhaseRule::Reps {
            up_angle_min: 160.0,
            down_angle_max: 90.0,
        },
        feedback: FeedbackFamily::Generic,
    },
];

/// Default profile returned when no registered key matches.
pub fn default_profile() -> &'static ExerciseProfile {
    &PROFILES[0]
}

/// Look up the profile for a user-supplied exercise name.
///
/// Best-effort fuzzy match: both sides are lowercased and stripped of hyphens
/// and spaces, then compared by bidirectional substring containment in
/// registration order. This tolerates naming variants ("Push-Ups", "pushup",
/// "push ups") without an alias table, at the cost of ambiguity if a future
/// key embeds another key as a substring.
pub fn resolve(name: &str) -> &'static ExerciseProfile {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return default_profile();
    }

    PROFILES
        .iter()
        .find(|profile| {
            let key = normalize(profile.key);
            key.contains(&wanted) || wanted.contains(&key)
        })
        .unwrap_or_else(default_profile)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming_variants_resolve_to_the_same_profile() {
        let canonical = resolve("push-ups");
        assert_eq!(canonical.key, "push-ups");

        for variant in ["Push-Ups", "pushups", "push ups", "PUSH UPS", "pushup"] {
            assert_eq!(resolve(variant).key, canonical.key, "variant {variant}");
        }
    }

    #[test]
    fn unknown_exercise_falls_back_to_push_ups() {
        assert_eq!(resolve("nonexistent-exercise").key, "push-ups");
        assert_eq!(resolve("").key, "push-ups");
    }

    #[test]
    fn singular_squat_matches_squats() {
        assert_eq!(resolve("Squat").key, "squats");
    }

    #[test]
    fn plank_is_hold_based() {
        let profile = resolve("plank");
        assert!(matches!(profile.rule, PhaseRule::Hold { .. }));
        assert_eq!(profile.primary_angle().name, "body_line");
    }

    // Known limitation of the substring policy: an input embedding two keys
    // resolves to whichever is registered first, not the "closest" one.
    #[test]
    fn ambiguous_input_resolves_in_registration_order() {
        assert_eq!(resolve("plank squats").key, "squats");
    }

    #[test]
    fn rep_profiles_expose_first_angle_as_primary() {
        assert_eq!(resolve("squats").primary_angle().name, "left_leg");
        assert_eq!(resolve("lunges").primary_angle().name, "front_leg");
    }
}
