//! Test utilities module for shared test initialization
//!
//! Loads `.env_test` (falling back to `.env`) exactly once so that tests
//! reading the environment-backed configuration see a consistent setup.

use std::sync::Once;

/// Centralized test initialization for tests that read configuration from
/// the environment.
///
/// ## Usage
/// ```rust,ignore
/// use crate::test_utils::init_test_environment;
///
/// #[tokio::test]
/// async fn my_test() {
///     init_test_environment();
///     // ... test code that reads SESSION_STORE_* variables
/// }
/// ```
pub(crate) fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}
