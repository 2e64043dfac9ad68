use anyhow::Result;
use moka::future::Cache;
use std::path::Path;
use std::time::Duration;

use crate::schemas::AppState;
use crate::store::Store;

/// Initialize application configuration and state
pub fn initialize_app_state(data_file: Option<&Path>) -> Result<AppState> {
    let store = match data_file {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path.display());
            Store::from_data_file(path)?
        }
        None => {
            tracing::info!("No data file given, starting with an empty dataset");
            Store::default()
        }
    };

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState { store, cache })
}
