//! Replay binary: drives a practice session through the full pipeline
//! (start -> frames -> save) and prints the aggregate stats. Frames come
//! from a recorded PoseNet capture (`REPSENSE_FRAMES`, one JSON payload per
//! line) or, by default, from the synthetic generator, so the engine can be
//! exercised end-to-end without a camera.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use repsense::{exercises, pose::synthetic, Database, PoseSnapshot, SessionTracker, SettingsStore};

fn main() -> Result<()> {
    // Reads RUST_LOG for overrides.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let exercise = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "push-ups".to_string());

    let data_dir = std::env::var("REPSENSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

    let database = Database::new(data_dir.join("repsense.sqlite3"))?;
    let settings_store = SettingsStore::new(data_dir.join("settings.json"))?;
    let settings = settings_store.detection();

    let profile = exercises::resolve(&exercise);
    let mut tracker = SessionTracker::new(database);
    tracker.set_confidence_threshold(settings.confidence_threshold);
    tracker.start(&exercise);

    match std::env::var("REPSENSE_FRAMES") {
        Ok(frames_path) => {
            info!("Replaying recorded {} frames from {frames_path}", profile.key);
            replay_recorded(&mut tracker, &frames_path)?;
        }
        Err(_) => {
            info!(
                "Replaying a synthetic {} session, target {} reps, confidence threshold {}",
                profile.key, settings.target_reps, settings.confidence_threshold
            );
            replay_synthetic(&mut tracker, profile, settings.target_reps);
        }
    }

    let summary = tracker.save()?;
    info!(
        "Saved session {}: {} reps of {} in {:.1}s",
        summary.id, summary.reps, summary.exercise, summary.duration_secs
    );

    let stats = tracker.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Feed one PoseNet payload per line through the tracker. A malformed line
/// is a skipped frame, not a fatal error.
fn replay_recorded(tracker: &mut SessionTracker, path: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read frames from {path}"))?;

    let mut last_feedback: Vec<String> = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match PoseSnapshot::from_posenet_json(line) {
            Ok(snapshot) => {
                if let Some(result) = tracker.observe(&snapshot) {
                    log_feedback(&result.feedback, result.rep_count, &mut last_feedback);
                }
            }
            Err(err) => warn!("skipping malformed frame at line {}: {err}", line_no + 1),
        }
    }

    Ok(())
}

fn replay_synthetic(
    tracker: &mut SessionTracker,
    profile: &'static exercises::ExerciseProfile,
    target_reps: u32,
) {
    let mut rng = rand::thread_rng();
    let mut last_feedback: Vec<String> = Vec::new();

    for degrees in synthetic::angle_cycle(&profile.rule, target_reps) {
        let frame = synthetic::jittered_frame(profile, degrees, 0.92, &mut rng);
        if let Some(result) = tracker.observe(&frame) {
            log_feedback(&result.feedback, result.rep_count, &mut last_feedback);
        }

        if tracker.rep_count() >= target_reps {
            info!("Target of {target_reps} reps reached");
            break;
        }
    }
}

fn log_feedback(feedback: &[String], rep_count: u32, last_feedback: &mut Vec<String>) {
    if feedback != last_feedback.as_slice() {
        info!("[rep {rep_count}] {}", feedback.join(" | "));
        *last_feedback = feedback.to_vec();
    }
}
