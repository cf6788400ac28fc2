//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BreweryConfig;
use crate::db::BeerStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// beer store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BreweryConfig,
    beers: Arc<dyn BeerStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: BreweryConfig, beers: Arc<dyn BeerStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, beers }),
        }
    }

    /// Get a reference to the brewery configuration.
    #[must_use]
    pub fn config(&self) -> &BreweryConfig {
        &self.inner.config
    }

    /// Get a reference to the beer store.
    #[must_use]
    pub fn beers(&self) -> &dyn BeerStore {
        self.inner.beers.as_ref()
    }
}
