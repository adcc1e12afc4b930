//! Rule-based form feedback. Stateless: reacts to the current angle snapshot
//! only, independently of rep counting.

use std::collections::HashMap;

use crate::analysis::phase::{classify, PhaseObservation};
use crate::exercises::{ExerciseProfile, FeedbackFamily, PhaseRule};

/// Left/right limb angle difference beyond this many degrees triggers an
/// alignment warning.
const BILATERAL_IMBALANCE_DEG: f64 = 20.0;

const PUSHUP_FULL_DEPTH_DEG: f64 = 60.0;
const PUSHUP_LOCKOUT_DEG: f64 = 170.0;
const SQUAT_FULL_DEPTH_DEG: f64 = 90.0;
const SQUAT_STANDING_DEG: f64 = 160.0;

/// Generate feedback strings for the current frame. Never returns an empty
/// list: when the angles a family needs are missing, a generic encouragement
/// keeps the user-facing feedback channel populated.
pub fn generate(profile: &ExerciseProfile, angles: &HashMap<String, f64>) -> Vec<String> {
    let mut feedback = match profile.feedback {
        FeedbackFamily::PushUp => pushup_feedback(profile, angles),
        FeedbackFamily::Squat => squat_feedback(profile, angles),
        FeedbackFamily::Hold => hold_feedback(profile, angles),
        FeedbackFamily::Generic => Vec::new(),
    };

    if feedback.is_empty() {
        feedback.push("💪 Keep it up!".to_string());
    }

    feedback
}

fn bilateral_angles(
    profile: &ExerciseProfile,
    angles: &HashMap<String, f64>,
) -> Option<(f64, f64)> {
    let left = angles.get(profile.angles.first()?.name)?;
    let right = angles.get(profile.angles.get(1)?.name)?;
    Some((*left, *right))
}

fn pushup_feedback(profile: &ExerciseProfile, angles: &HashMap<String, f64>) -> Vec<String> {
    let Some((left, right)) = bilateral_angles(profile, angles) else {
        return Vec::new();
    };

    let mut feedback = Vec::new();
    if (left - right).abs() > BILATERAL_IMBALANCE_DEG {
        feedback.push("⚠️ Keep both arms aligned".to_string());
    }

    if left < PUSHUP_FULL_DEPTH_DEG || right < PUSHUP_FULL_DEPTH_DEG {
        feedback.push("✅ Good depth! Go full range".to_string());
    } else if left > PUSHUP_LOCKOUT_DEG && right > PUSHUP_LOCKOUT_DEG {
        feedback.push("✅ Good starting position".to_string());
    } else {
        feedback.push("💪 Keep going!".to_string());
    }

    feedback
}

fn squat_feedback(profile: &ExerciseProfile, angles: &HashMap<String, f64>) -> Vec<String> {
    let Some((left, right)) = bilateral_angles(profile, angles) else {
        return Vec::new();
    };

    let message = if left < SQUAT_FULL_DEPTH_DEG || right < SQUAT_FULL_DEPTH_DEG {
        "✅ Great squat depth!"
    } else if left > SQUAT_STANDING_DEG && right > SQUAT_STANDING_DEG {
        "✅ Good standing position"
    } else {
        "💪 Keep your chest up!"
    };

    vec![message.to_string()]
}

fn hold_feedback(profile: &ExerciseProfile, angles: &HashMap<String, f64>) -> Vec<String> {
    let PhaseRule::Hold { target_angle, .. } = profile.rule else {
        return Vec::new();
    };

    let Some(angle) = angles.get(profile.primary_angle().name) else {
        return Vec::new();
    };

    let in_range = matches!(
        classify(&profile.rule, *angle),
        PhaseObservation::Hold { in_range: true }
    );

    let message = if in_range {
        "✅ Perfect plank form!"
    } else if *angle < target_angle {
        "⚠️ Keep your hips up"
    } else {
        "⚠️ Don't arch your back"
    };

    vec![message.to_string()]
}
