//! Logging macros gated on a per-module `ENABLE_LOGS` const, so hot paths
//! that run at camera frame rate can carry log statements that cost nothing
//! in a normal run.
//!
//! Declare the flag in the module that logs, then use the macros (they are
//! exported at the crate root):
//! ```ignore
//! const ENABLE_LOGS: bool = false;
//!
//! use crate::{log_debug, log_warn};
//!
//! log_debug!("frame skipped: primary angle unavailable");
//! ```

/// Per-frame diagnostic logging, compiled against the calling module's
/// `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Info-level variant of [`log_debug`]; same `ENABLE_LOGS` gating.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level variant of [`log_debug`]; same `ENABLE_LOGS` gating.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
