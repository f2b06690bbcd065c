//! Provider-backed admin handlers.
//!
//! Every route here requires an administrator token and runs against one
//! provider chosen per request:
//!
//! ```text
//! GET    /api/v1/admin/providers
//! GET    /api/v1/admin/users?page=1&pageSize=10&keyword=neo
//! GET    /api/v1/admin/users/{id}/planets
//! PUT    /api/v1/admin/users/{id}
//! DELETE /api/v1/admin/users/{id}
//! GET    /api/v1/admin/configs
//! PUT    /api/v1/admin/configs/{key}
//! DELETE /api/v1/admin/configs/{key}
//! ```

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, HttpResponse, delete, dev::Payload, get, put, web};
use futures_util::future::{Ready, ready};
use pagination::{PageBounds, PageRequest};
use serde::Deserialize;

use super::auth::AuthenticatedAdmin;
use super::envelope::{ok, ok_message};
use super::state::HttpState;
use crate::domain::ports::AdminProvider;
use crate::domain::{ApiResult, AppConfigUpsert, ConfigKey, Error, UserId, UserUpdate};

/// Header naming the provider to act on.
pub const APP_KEY_HEADER: &str = "X-App-Key";

/// Provider chosen by `X-App-Key`, else the `app` query parameter, else the
/// registry default.
pub struct SelectedProvider(pub Arc<dyn AdminProvider>);

#[derive(Debug, Default, Deserialize)]
struct AppQuery {
    #[serde(default)]
    app: Option<String>,
}

impl FromRequest for SelectedProvider {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(select_provider(req))
    }
}

fn select_provider(req: &HttpRequest) -> Result<SelectedProvider, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let key = provider_key(req);
    let provider = state.registry.resolve(&key)?;
    Ok(SelectedProvider(provider))
}

fn provider_key(req: &HttpRequest) -> String {
    let from_header = req
        .headers()
        .get(APP_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());
    if let Some(key) = from_header {
        return key.to_owned();
    }

    web::Query::<AppQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().app)
        .map(|app| app.trim().to_owned())
        .unwrap_or_default()
}

/// Raw paging parameters. Unparseable values fall back to defaults.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number; defaults to 1.
    #[serde(default)]
    pub page: Option<String>,
    /// Page size; clamped to the configured band.
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<String>,
    /// Alias of `pageSize`, consulted when `pageSize` is absent.
    #[serde(default, rename = "page_size")]
    pub page_size_alias: Option<String>,
    /// Free-text filter; trimmed, ignored when blank.
    #[serde(default)]
    pub keyword: Option<String>,
}

impl PageQuery {
    /// Normalise into a provider-safe request.
    pub fn to_request(&self, bounds: &PageBounds) -> PageRequest {
        let page = self.page.as_deref().map_or(1, parse_or_zero);
        let page_size = self
            .page_size
            .as_deref()
            .or(self.page_size_alias.as_deref())
            .map_or(0, parse_or_zero);
        bounds.normalize(page, page_size)
    }

    /// Trimmed keyword, empty when absent.
    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().map_or("", str::trim)
    }
}

fn parse_or_zero(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse()
        .map_err(|_| Error::invalid_request("Invalid user id"))
}

fn parse_config_key(raw: &str) -> Result<ConfigKey, Error> {
    ConfigKey::new(raw).map_err(|_| Error::invalid_request("Config key is required"))
}

/// Registered provider keys, sorted.
#[utoipa::path(
    get,
    path = "/api/v1/admin/providers",
    responses(
        (status = 200, description = "Provider keys; data is a string array", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 401, description = "Missing or invalid token", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "listProviders"
)]
#[get("/admin/providers")]
pub async fn providers(
    _admin: AuthenticatedAdmin,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    Ok(ok(state.registry.list()))
}

/// One page of the provider's users.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(PageQuery, ("X-App-Key" = Option<String>, Header, description = "Provider key")),
    responses(
        (status = 200, description = "Users page; data is a UsersPage", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Unknown provider", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 401, description = "Missing or invalid token", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 502, description = "Upstream failure", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "listProviderUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let request = query.to_request(&state.page_bounds);
    let page = provider.0.list_users(request, query.keyword()).await?;
    Ok(ok(page))
}

/// One page of a user's planets.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}/planets",
    params(("id" = u64, Path, description = "User id"), PageQuery),
    responses(
        (status = 200, description = "Planets page", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Invalid user id or unknown provider", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 401, description = "Missing or invalid token", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "listProviderUserPlanets"
)]
#[get("/admin/users/{id}/planets")]
pub async fn list_user_planets(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    let request = query.to_request(&state.page_bounds);
    let page = provider.0.list_user_planets(user_id, request).await?;
    Ok(ok(page))
}

/// Apply a sparse patch to a user.
#[utoipa::path(
    put,
    path = "/api/v1/admin/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = crate::inbound::http::schemas::UserUpdateSchema,
    responses(
        (status = 200, description = "Updated user", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Invalid user id or body", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 404, description = "Upstream reports no such user", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "updateProviderUser"
)]
#[put("/admin/users/{id}")]
pub async fn update_user(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    path: web::Path<String>,
    payload: web::Json<UserUpdate>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    let user = provider.0.update_user(user_id, &payload).await?;
    Ok(ok(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Invalid user id", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "deleteProviderUser"
)]
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path)?;
    provider.0.delete_user(user_id).await?;
    Ok(ok_message("User deleted successfully"))
}

/// All configuration entries.
#[utoipa::path(
    get,
    path = "/api/v1/admin/configs",
    responses(
        (status = 200, description = "Config entries", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Unknown provider", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "listProviderConfigs"
)]
#[get("/admin/configs")]
pub async fn list_configs(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
) -> ApiResult<HttpResponse> {
    let configs = provider.0.list_configs().await?;
    Ok(ok(configs))
}

/// Create or replace one configuration entry.
#[utoipa::path(
    put,
    path = "/api/v1/admin/configs/{key}",
    params(("key" = String, Path, description = "Config key")),
    request_body = crate::inbound::http::schemas::AppConfigUpsertSchema,
    responses(
        (status = 200, description = "Stored entry", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Blank key or invalid body", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "upsertProviderConfig"
)]
#[put("/admin/configs/{key}")]
pub async fn upsert_config(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    path: web::Path<String>,
    payload: web::Json<AppConfigUpsert>,
) -> ApiResult<HttpResponse> {
    let key = parse_config_key(&path)?;
    let config = provider.0.upsert_config(&key, &payload).await?;
    Ok(ok(config))
}

/// Delete one configuration entry.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/configs/{key}",
    params(("key" = String, Path, description = "Config key")),
    responses(
        (status = 200, description = "Entry deleted", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Blank key", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["providers"],
    operation_id = "deleteProviderConfig"
)]
#[delete("/admin/configs/{key}")]
pub async fn delete_config(
    _admin: AuthenticatedAdmin,
    provider: SelectedProvider,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = parse_config_key(&path)?;
    provider.0.delete_config(&key).await?;
    Ok(ok_message("Config deleted successfully"))
}

#[cfg(test)]
#[path = "admin_provider_tests.rs"]
mod tests;
