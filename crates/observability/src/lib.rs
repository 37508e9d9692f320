//! Logging setup shared by every MediTrack binary and the browser frontend.

/// Log output configuration.
pub mod config;

/// Subscriber installation.
pub mod tracing;

pub use config::{LogConfig, LogFormat};

/// Initialize logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(&LogConfig::from_env());
}
