//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they only depend on
//! domain ports and remain testable without I/O.

use std::sync::Arc;

use pagination::PageBounds;

use crate::domain::ProviderRegistry;
use crate::domain::ports::{AdminLoginService, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn AdminLoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub registry: Arc<ProviderRegistry>,
    pub page_bounds: PageBounds,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        login: Arc<dyn AdminLoginService>,
        tokens: Arc<dyn TokenService>,
        registry: Arc<ProviderRegistry>,
        page_bounds: PageBounds,
    ) -> Self {
        Self {
            login,
            tokens,
            registry,
            page_bounds,
        }
    }
}
