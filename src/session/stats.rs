//! Read-only aggregate statistics over the stored session history.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::SessionSummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_sessions: u64,
    pub total_reps: u64,
    pub total_duration_secs: f64,
    /// Distinct exercises, in first-practiced order.
    pub exercises_performed: Vec<String>,
    pub sessions_this_week: u64,
}

/// Aggregate a full scan of the history. `now` anchors the trailing
/// seven-day window.
pub fn compute_stats(summaries: &[SessionSummary], now: DateTime<Utc>) -> WorkoutStats {
    let mut exercises_performed = Vec::new();
    let mut seen = HashSet::new();
    for summary in summaries {
        if seen.insert(summary.exercise.as_str()) {
            exercises_performed.push(summary.exercise.clone());
        }
    }

    let sessions_this_week = summaries
        .iter()
        .filter(|summary| (now - summary.recorded_at).num_days() <= 7)
        .count() as u64;

    WorkoutStats {
        total_sessions: summaries.len() as u64,
        total_reps: summaries.iter().map(|s| u64::from(s.reps)).sum(),
        total_duration_secs: summaries.iter().map(|s| s.duration_secs).sum(),
        exercises_performed,
        sessions_this_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn summary(exercise: &str, reps: u32, duration_secs: f64, recorded_at: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            id: Uuid::new_v4().to_string(),
            exercise: exercise.to_string(),
            duration_secs,
            reps,
            recorded_at,
        }
    }

    #[test]
    fn empty_history_yields_zeroed_stats() {
        let stats = compute_stats(&[], Utc::now());
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.total_reps, 0);
        assert_eq!(stats.total_duration_secs, 0.0);
        assert!(stats.exercises_performed.is_empty());
        assert_eq!(stats.sessions_this_week, 0);
    }

    #[test]
    fn totals_and_distinct_exercises() {
        let now = Utc::now();
        let summaries = vec![
            summary("push-ups", 10, 60.0, now - Duration::days(1)),
            summary("squats", 8, 45.0, now - Duration::days(2)),
            summary("push-ups", 12, 70.0, now - Duration::days(3)),
        ];

        let stats = compute_stats(&summaries, now);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_reps, 30);
        assert!((stats.total_duration_secs - 175.0).abs() < 1e-9);
        assert_eq!(stats.exercises_performed, vec!["push-ups", "squats"]);
    }

    #[test]
    fn week_window_excludes_older_sessions() {
        let now = Utc::now();
        let summaries = vec![
            summary("push-ups", 10, 60.0, now - Duration::days(1)),
            summary("push-ups", 10, 60.0, now - Duration::days(7)),
            summary("push-ups", 10, 60.0, now - Duration::days(10)),
        ];

        let stats = compute_stats(&summaries, now);
        assert_eq!(stats.sessions_this_week, 2);
        assert_eq!(stats.total_sessions, 3);
    }
}
