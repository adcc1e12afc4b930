//! Landmark and pose-snapshot types, plus ingestion of the PoseNet wire
//! format produced by the browser-side keypoint source.

pub mod geometry;
pub mod synthetic;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// PoseNet keypoint names, in model output order. Wire frames that omit
/// per-keypoint part names are mapped against this list by index.
pub const KEYPOINT_NAMES: [&str; 17] = [
    "nose",
    "leftEye",
    "rightEye",
    "leftEar",
    "rightEar",
    "leftShoulder",
    "rightShoulder",
    "leftElbow",
    "rightElbow",
    "leftWrist",
    "rightWrist",
    "leftHip",
    "rightHip",
    "leftKnee",
    "rightKnee",
    "leftAnkle",
    "rightAnkle",
];

/// A detected anatomical point in frame pixel space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
}

impl Landmark {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed pose payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// All landmarks detected in one frame, keyed by name. Ephemeral: built per
/// frame, read by the analysis pipeline, then dropped.
#[derive(Debug, Clone, Default)]
pub struct PoseSnapshot {
    landmarks: HashMap<String, Landmark>,
}

impl PoseSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, landmark: Landmark) {
        self.landmarks.insert(name.into(), landmark);
    }

    pub fn get(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Landmark)> {
        self.landmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Mean confidence across every detected landmark, 0.0 for an empty frame.
    pub fn mean_confidence(&self) -> f64 {
        if self.landmarks.is_empty() {
            return 0.0;
        }

        let total: f64 = self.landmarks.values().map(|lm| lm.confidence).sum();
        total / self.landmarks.len() as f64
    }

    /// Parse a PoseNet estimation payload:
    /// `{"pose": {"keypoints": [{"part"?, "position": {"x","y"}, "score"}]}}`.
    ///
    /// Keypoints without a `part` name are resolved positionally against
    /// [`KEYPOINT_NAMES`]; entries past the 17-point vocabulary are dropped.
    pub fn from_posenet_json(raw: &str) -> Result<Self, SnapshotError> {
        let frame: WireFrame = serde_json::from_str(raw)?;

        let mut snapshot = Self::new();
        for (index, keypoint) in frame.pose.keypoints.into_iter().enumerate() {
            let name = match keypoint.part {
                Some(part) => part,
                None => match KEYPOINT_NAMES.get(index) {
                    Some(name) => (*name).to_string(),
                    None => continue,
                },
            };

            snapshot.insert(
                name,
                Landmark {
                    x: keypoint.position.x,
                    y: keypoint.position.y,
                    confidence: keypoint.score,
                },
            );
        }

        Ok(snapshot)
    }
}

#[derive(Deserialize)]
struct WireFrame {
    pose: WirePose,
}

#[derive(Deserialize)]
struct WirePose {
    keypoints: Vec<WireKeypoint>,
}

#[derive(Deserialize)]
struct WireKeypoint {
    part: Option<String>,
    position: WirePosition,
    score: f64,
}

#[derive(Deserialize)]
struct WirePosition {
    x: f64,
    y: f64,
}
