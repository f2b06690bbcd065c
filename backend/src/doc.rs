//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers:
//!
//! - **Paths**: every `/api/v1` handler plus the orchestration health checks
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] describing
//!   domain types without coupling them to utoipa
//! - **Security**: the bearer access token issued by the admin login
//!
//! The document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::admin_auth::{LoginRequest, LoginResponse};
use crate::inbound::http::health::ServiceBanner;
use crate::inbound::http::schemas::{
    AdminIdentitySchema, AppConfigSchema, AppConfigUpsertSchema, EnvelopeSchema,
    PlanetItemSchema, PlanetPageSchema, UserSchema, UserUpdateSchema, UsersPageSchema,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_owned());
        scheme.description =
            Some("Access token issued by POST /api/v1/auth/admin/login.".to_owned());
        components.add_security_scheme(BEARER_SCHEME, SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Admin gateway API",
        description = "Administrator sign-in and provider-backed management of users, planets and configuration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::admin_auth::login,
        crate::inbound::http::admin_auth::me,
        crate::inbound::http::admin_provider::providers,
        crate::inbound::http::admin_provider::list_users,
        crate::inbound::http::admin_provider::list_user_planets,
        crate::inbound::http::admin_provider::update_user,
        crate::inbound::http::admin_provider::delete_user,
        crate::inbound::http::admin_provider::list_configs,
        crate::inbound::http::admin_provider::upsert_config,
        crate::inbound::http::admin_provider::delete_config,
    ),
    components(schemas(
        EnvelopeSchema,
        UserSchema,
        UserUpdateSchema,
        UsersPageSchema,
        PlanetItemSchema,
        PlanetPageSchema,
        AppConfigSchema,
        AppConfigUpsertSchema,
        AdminIdentitySchema,
        LoginRequest,
        LoginResponse,
        ServiceBanner,
    )),
    tags(
        (name = "auth", description = "Administrator sign-in and profile"),
        (name = "providers", description = "Operations forwarded to a provider"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
