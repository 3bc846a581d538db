//! Suite-relative banner logging
//!
//! Banners carry an elapsed-time prefix measured against a clock started once
//! at suite initialization and passed to every caller.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

use super::logger::LogLevel;

/// Clock started by suite initialization and shared by every test.
///
/// The start instant is the zero point for all banner prefixes, so elapsed
/// readings are non-decreasing for the life of the process.
#[derive(Clone, Copy, Debug)]
pub struct SuiteClock {
    started: Instant,
}

impl SuiteClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Zero-padded `HH:MM:SS` since suite start
    pub fn elapsed_hms(&self) -> String {
        let secs = self.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

/// Draw an ASCII box sized to `msg`
pub fn framed(msg: &str) -> String {
    let border = format!("+{}+", "-".repeat(msg.chars().count() + 2));
    format!("{border}\n| {msg} |\n{border}")
}

/// Emit `msg` boxed and prefixed with elapsed suite time, at `level`
pub fn log_banner(clock: &SuiteClock, msg: &str, level: LogLevel) {
    let banner = framed(&format!("{} {}", clock.elapsed_hms(), msg));
    match level {
        LogLevel::Trace => trace!("\n{banner}"),
        LogLevel::Debug => debug!("\n{banner}"),
        LogLevel::Info => info!("\n{banner}"),
        LogLevel::Warn => warn!("\n{banner}"),
        LogLevel::Error => error!("\n{banner}"),
    }
}
