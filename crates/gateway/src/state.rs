//! Application state for dependency injection.

use gallery_service_lib::Services;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, config: GatewayConfig) -> Self {
        Self { services, config }
    }
}
