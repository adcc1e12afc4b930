pub mod state;
pub mod stats;
pub mod tracker;

pub use state::DetectionState;
pub use stats::WorkoutStats;
pub use tracker::{SessionTracker, TrackerError};
