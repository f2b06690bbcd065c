//! Administrator sign-in and profile handlers.
//!
//! ```text
//! POST /api/v1/auth/admin/login {"password":"..."}
//! GET  /api/v1/admin/auth/me    Authorization: Bearer <access token>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use super::auth::AuthenticatedAdmin;
use super::envelope::ok;
use super::state::HttpState;
use crate::domain::{AdminCredentials, AdminSession, ApiResult};

/// Login request body. A missing password is treated as empty.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Issued token pair plus the administrator profile.
///
/// `token` duplicates `accessToken` for older console builds.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = 1_000_001)]
    pub user_id: u64,
    pub username: String,
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token: String,
}

impl From<AdminSession> for LoginResponse {
    fn from(session: AdminSession) -> Self {
        let AdminSession {
            identity,
            access_token,
            refresh_token,
        } = session;
        Self {
            user_id: identity.user_id,
            username: identity.username,
            email: identity.email,
            role: identity.role,
            token: access_token.clone(),
            access_token,
            refresh_token,
        }
    }
}

/// Exchange the administrator password for an access and refresh token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; data is a LoginResponse", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 400, description = "Invalid request body", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 401, description = "Invalid password", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "adminLogin",
    security([])
)]
#[post("/auth/admin/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = AdminCredentials::new(payload.into_inner().password);
    let session = state.login.login(&credentials).await?;
    Ok(ok(LoginResponse::from(session)))
}

/// Profile of the administrator holding the bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/admin/auth/me",
    responses(
        (status = 200, description = "Identity from the token; data is an AdminIdentity", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 401, description = "Missing or invalid token", body = crate::inbound::http::schemas::EnvelopeSchema),
        (status = 403, description = "Not an administrator", body = crate::inbound::http::schemas::EnvelopeSchema)
    ),
    tags = ["auth"],
    operation_id = "adminProfile"
)]
#[get("/admin/auth/me")]
pub async fn me(admin: AuthenticatedAdmin) -> ApiResult<HttpResponse> {
    Ok(ok(admin.identity()))
}
