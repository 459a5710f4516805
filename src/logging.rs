//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_filter`. Calling this twice is harmless; the
/// second call is ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Subscriber for tests: output goes through the test harness capture.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("navpanel=debug"))
        .with_line_number(true)
        .with_target(false)
        .try_init();
}
