//! Persisted session-history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one finished practice session. Appended to the
/// history table when a session is saved; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    /// Canonical exercise name the session was started with.
    pub exercise: String,
    pub duration_secs: f64,
    pub reps: u32,
    pub recorded_at: DateTime<Utc>,
}
