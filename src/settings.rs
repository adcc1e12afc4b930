//! Operator-tunable detection settings, persisted as JSON beside the
//! session database.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::session::state::DEFAULT_CONFIDENCE_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSettings {
    /// Minimum landmark confidence for a frame to count as signal.
    pub confidence_threshold: f64,
    pub show_keypoints: bool,
    pub show_skeleton: bool,
    /// Rep goal surfaced by the caller; the tracker itself is goal-agnostic.
    pub target_reps: u32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            show_keypoints: true,
            show_skeleton: true,
            target_reps: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    detection: DetectionSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn detection(&self) -> DetectionSettings {
        self.data.read().unwrap().detection.clone()
    }

    pub fn update_detection(&self, settings: DetectionSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.detection = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
