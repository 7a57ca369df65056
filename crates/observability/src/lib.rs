//! Tracing/logging setup shared by every 360 PME binary and test harness.

/// Initialize process-wide logging.
///
/// Format comes from `PME360_LOG_FORMAT` (JSON by default), filtering from
/// `RUST_LOG` (`info` by default). This is safe to call multiple times;
/// subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(&tracing::LogConfig::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat, init_with};
