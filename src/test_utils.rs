#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::store::{DataFile, Store};
    use axum::Router;
    use moka::future::Cache;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create AppState backed by an empty in-memory store
    pub fn setup_test_app_state() -> AppState {
        let store = Store::default();
        let cache = Cache::new(100);
        AppState { store, cache }
    }

    /// Create AppState seeded from a JSON snapshot string
    pub fn setup_seeded_app_state(json: &str) -> AppState {
        let data: DataFile = serde_json::from_str(json).expect("Failed to parse test data file");
        AppState {
            store: Store::from_data(data),
            cache: Cache::new(100),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// Installs a process-wide subscriber on the first call; later calls are
    /// no-ops, so every setup helper can invoke this unconditionally. The
    /// log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let _ = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .try_init();
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        init_test_tracing();
        create_router(setup_test_app_state())
    }

    /// Create axum app for testing, seeded from a JSON snapshot string
    pub fn setup_seeded_app(json: &str) -> Router {
        init_test_tracing();
        create_router(setup_seeded_app_state(json))
    }
}
