use env_logger::{Builder, Env};

/// Install env_logger for tests
///
/// Honors `RUST_LOG` and defaults to `warn`. Output goes through the test
/// harness capture. Safe to call from every test.
pub fn init_test_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}
