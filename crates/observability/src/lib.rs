//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// Output format comes from `LOG_FORMAT` (`json` or `pretty`), the filter
/// from `RUST_LOG`. Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::LogFormat;
