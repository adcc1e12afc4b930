//! Synthetic pose frames: fabricate landmark geometry tracing a target joint
//! angle, so sessions can be driven end-to-end without a camera.

use rand::Rng;

use super::{Landmark, PoseSnapshot};
use crate::exercises::{ExerciseProfile, PhaseRule};

const LIMB_LENGTH_PX: f64 = 100.0;

/// Build a frame in which every angle definition of `profile` measures
/// exactly `degrees`, with all landmarks at the given confidence.
pub fn frame_with_angle(profile: &ExerciseProfile, degrees: f64, confidence: f64) -> PoseSnapshot {
    let mut snapshot = PoseSnapshot::new();
    let radians = degrees.to_radians();

    for (index, definition) in profile.angles.iter().enumerate() {
        // Spread vertices out so bilateral definitions don't overlap visually.
        let vertex = (200.0 + index as f64 * 160.0, 240.0);
        let [outer_a, joint, outer_c] = definition.landmarks;

        snapshot.insert(
            joint,
            Landmark {
                x: vertex.0,
                y: vertex.1,
                confidence,
            },
        );
        // First ray points straight up; the second is rotated by the target
        // angle, so the included angle at the joint is `degrees`.
        snapshot.insert(
            outer_a,
            Landmark {
                x: vertex.0,
                y: vertex.1 - LIMB_LENGTH_PX,
                confidence,
            },
        );
        snapshot.insert(
            outer_c,
            Landmark {
                x: vertex.0 + LIMB_LENGTH_PX * radians.sin(),
                y: vertex.1 - LIMB_LENGTH_PX * radians.cos(),
                confidence,
            },
        );
    }

    snapshot
}

/// Like [`frame_with_angle`], with per-landmark position and confidence
/// jitter so replayed sessions resemble live detections.
pub fn jittered_frame<R: Rng>(
    profile: &ExerciseProfile,
    degrees: f64,
    confidence: f64,
    rng: &mut R,
) -> PoseSnapshot {
    let base = frame_with_angle(profile, degrees, confidence);

    let mut snapshot = PoseSnapshot::new();
    for (name, landmark) in base.iter() {
        snapshot.insert(
            name.clone(),
            Landmark {
                x: landmark.x + rng.gen_range(-1.5..1.5),
                y: landmark.y + rng.gen_range(-1.5..1.5),
                confidence: (landmark.confidence + rng.gen_range(-0.05..0.05)).clamp(0.0, 1.0),
            },
        );
    }

    snapshot
}

/// Primary-angle waypoints for `reps` full cycles of a rep-based rule
/// (extended, flexed, extended, ...). Hold rules just sit on the target.
pub fn angle_cycle(rule: &PhaseRule, reps: u32) -> Vec<f64> {
    match *rule {
        PhaseRule::Reps {
            up_angle_min,
            down_angle_max,
        } => {
            let up = (up_angle_min + 15.0).min(178.0);
            let down = (down_angle_max - 15.0).max(5.0);
            let mut angles = vec![up];
            for _ in 0..reps {
                angles.push(down);
                angles.push(up);
            }
            angles
        }
        PhaseRule::Hold { target_angle, .. } => vec![target_angle; reps.max(1) as usize],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::resolve;
    use crate::pose::geometry::joint_angle;

    #[test]
    fn fabricated_frame_measures_the_requested_angle() {
        let profile = resolve("squats");
        for degrees in [10.0, 85.0, 120.0, 170.0] {
            let snapshot = frame_with_angle(profile, degrees, 0.9);
            for definition in profile.angles {
                let [a, b, c] = definition.landmarks;
                let measured = joint_angle(
                    snapshot.get(a).unwrap().position(),
                    snapshot.get(b).unwrap().position(),
                    snapshot.get(c).unwrap().position(),
                );
                assert!(
                    (measured - degrees).abs() < 1e-6,
                    "{} expected {degrees}, measured {measured}",
                    definition.name
                );
            }
        }
    }

    #[test]
    fn angle_cycle_alternates_once_per_rep() {
        let rule = PhaseRule::Reps {
            up_angle_min: 160.0,
            down_angle_max: 90.0,
        };
        let cycle = angle_cycle(&rule, 2);
        assert_eq!(cycle, vec![175.0, 75.0, 175.0, 75.0, 175.0]);
    }

    #[test]
    fn jitter_keeps_confidence_in_unit_range() {
        let profile = resolve("plank");
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let snapshot = jittered_frame(profile, 178.0, 0.98, &mut rng);
            for (_, landmark) in snapshot.iter() {
                assert!((0.0..=1.0).contains(&landmark.confidence));
            }
        }
    }
}
