use std::sync::Arc;

use crate::auth::rate_limit::LoginRateLimiter;
use crate::config::AppConfig;
use crate::store::CatalogStore;

/// Dependencies shared by the request handlers. Everything stateful (the
/// storage handle, the login throttle) is injected here rather than held in
/// process-wide singletons, so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CatalogStore>,
    pub limiter: Arc<LoginRateLimiter>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn CatalogStore>,
        limiter: Arc<LoginRateLimiter>,
    ) -> Self {
        Self {
            config,
            store,
            limiter,
        }
    }
}
