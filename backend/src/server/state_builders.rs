//! Builders turning validated settings into HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::{info, warn};

use admin_gateway::domain::ports::TokenService;
use admin_gateway::domain::{AdminAuthService, ProviderRegistry};
use admin_gateway::inbound::http::state::HttpState;
use admin_gateway::outbound::token::JwtTokenService;
use admin_gateway::outbound::upstream::{HttpAdminProvider, HttpProviderBuildError};
use admin_gateway::settings::{GatewaySettings, SettingsError};

/// Reasons the HTTP state cannot be assembled.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build upstream provider: {0}")]
    Provider(#[from] HttpProviderBuildError),
}

/// Registry with the upstream provider registered when enabled.
pub fn build_registry(settings: &GatewaySettings) -> Result<ProviderRegistry, StartupError> {
    let registry = ProviderRegistry::new(settings.default_provider());
    match settings.upstream()? {
        Some(config) => {
            let name = config.name.clone();
            let provider = HttpAdminProvider::new(config)?;
            registry.register(name, Arc::new(provider));
        }
        None => warn!("upstream provider disabled; registry starts empty"),
    }
    Ok(registry)
}

/// Wire token signing, admin sign-in and the provider registry.
pub fn build_http_state(settings: &GatewaySettings) -> Result<HttpState, StartupError> {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &settings.token_settings()?,
        Arc::new(DefaultClock),
    ));
    let login = Arc::new(AdminAuthService::new(settings.admin_account(), tokens.clone()));
    let registry = Arc::new(build_registry(settings)?);
    let page_bounds = settings.page_bounds()?;

    info!(
        default_provider = registry.default_key(),
        providers = ?registry.list(),
        min_page_size = page_bounds.min(),
        max_page_size = page_bounds.max(),
        "http state assembled"
    );
    Ok(HttpState::new(login, tokens, registry, page_bounds))
}
