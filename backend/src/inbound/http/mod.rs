//! HTTP inbound adapter exposing the admin REST endpoints.

pub mod admin_auth;
pub mod admin_provider;
pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// JSON body settings shared by every route: malformed bodies become an
/// enveloped 400 instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request("Invalid request body").into()
    })
}

/// Query-string settings shared by every route.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request("Invalid query parameters").into()
    })
}

/// Register every `/api/v1` route. Mount inside `web::scope("/api/v1")`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(admin_auth::login)
        .service(admin_auth::me)
        .service(admin_provider::providers)
        .service(admin_provider::list_users)
        .service(admin_provider::list_user_planets)
        .service(admin_provider::update_user)
        .service(admin_provider::delete_user)
        .service(admin_provider::list_configs)
        .service(admin_provider::upsert_config)
        .service(admin_provider::delete_config);
}
