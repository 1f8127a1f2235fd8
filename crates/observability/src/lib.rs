//! Tracing/logging (shared setup).

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide tracing with an explicit default level and format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(default_level: &str, format: LogFormat) {
    tracing::init_with(default_level, format);
}
