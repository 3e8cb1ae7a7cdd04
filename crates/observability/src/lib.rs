//! Tracing and logging setup shared by every binary and test.

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::{ENV_LOG_FORMAT, LogFormat, ParseLogFormatError};

/// Initialize process-wide logging, picking the format from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init_with(LogFormat::from_env());
}

/// Verbose, test-captured logging for unit and integration tests.
pub fn init_test() {
    tracing::init_test();
}
