//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use pagination::PageBounds;

use super::state::HttpState;
use crate::domain::ports::{AdminProvider, MockAdminLoginService, MockTokenService};
use crate::domain::{ADMIN_ROLE, ADMIN_USER_ID, AdminIdentity, ProviderRegistry};

/// Key of the provider registered by [`state_with_provider`].
pub const TEST_PROVIDER: &str = "stellar";

/// Bearer header value accepted by [`admin_tokens`].
pub const ADMIN_BEARER: &str = "Bearer admin-token";

/// Identity carried by test access tokens.
pub fn admin_identity() -> AdminIdentity {
    AdminIdentity {
        user_id: ADMIN_USER_ID,
        username: "app_box_admin".into(),
        email: "app_box_admin@local".into(),
        role: ADMIN_ROLE.into(),
    }
}

/// Token service that accepts only `admin-token`.
pub fn admin_tokens() -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens.expect_verify_access().returning(|token| {
        if token == "admin-token" {
            Ok(admin_identity())
        } else {
            Err(crate::domain::ports::TokenError::invalid("unknown test token"))
        }
    });
    tokens
}

/// State whose only interesting port is `tokens`.
pub fn state_with_tokens(tokens: MockTokenService) -> HttpState {
    HttpState::new(
        Arc::new(MockAdminLoginService::new()),
        Arc::new(tokens),
        Arc::new(ProviderRegistry::new(TEST_PROVIDER)),
        PageBounds::default(),
    )
}

/// State with admin tokens and `provider` registered as the default.
pub fn state_with_provider(provider: impl AdminProvider + 'static) -> HttpState {
    let registry = ProviderRegistry::new(TEST_PROVIDER);
    registry.register(TEST_PROVIDER, Arc::new(provider));
    HttpState::new(
        Arc::new(MockAdminLoginService::new()),
        Arc::new(admin_tokens()),
        Arc::new(registry),
        PageBounds::default(),
    )
}
