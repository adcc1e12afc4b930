use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::phase::{completes_rep, RepPhase};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Mutable state for one continuous practice attempt. Exactly one is live at
/// a time; the tracker resets it on start and destroys it on save.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionState {
    /// Canonical exercise key, set while a session exists.
    pub exercise: Option<String>,
    pub rep_count: u32,
    /// Last committed movement phase; None until the first usable frame.
    pub last_phase: Option<RepPhase>,
    /// Minimum landmark confidence for an observation to count as signal.
    pub confidence_threshold: f64,
    pub is_detecting: bool,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for DetectionState {
    fn default() -> Self {
        Self {
            exercise: None,
            rep_count: 0,
            last_phase: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            is_detecting: false,
            started_at: None,
        }
    }
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session for `exercise`. The confidence threshold is an
    /// operator setting, not session data, so it survives the reset.
    pub fn begin(&mut self, exercise: String, now: DateTime<Utc>) {
        *self = Self {
            exercise: Some(exercise),
            rep_count: 0,
            last_phase: None,
            confidence_threshold: self.confidence_threshold,
            is_detecting: true,
            started_at: Some(now),
        };
    }

    /// Pause observation without discarding accumulated state, so the caller
    /// can still save after a confirmation prompt.
    pub fn stop(&mut self) {
        self.is_detecting = false;
    }

    /// Destroy the session, keeping only the operator threshold.
    pub fn reset(&mut self) {
        *self = Self {
            confidence_threshold: self.confidence_threshold,
            ..Self::default()
        };
    }

    /// Commit this frame's phase; returns true when the transition completes
    /// a repetition (committed Down followed by Up).
    pub fn commit_phase(&mut self, current: RepPhase) -> bool {
        let fired = completes_rep(self.last_phase, current);
        if fired {
            self.rep_count += 1;
        }
        self.last_phase = Some(current);
        fired
    }
}
