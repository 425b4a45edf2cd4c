//! Shared setup for integration tests

/// Initialize the test logger once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
