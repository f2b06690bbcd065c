//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and register under the domain
//! type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Envelope`].
///
/// Every response body, success or failure, uses this shape.
#[derive(ToSchema)]
#[schema(as = crate::domain::Envelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnvelopeSchema {
    /// `200` on success, otherwise the HTTP status of the failure.
    #[schema(example = 200)]
    code: i32,
    /// Milliseconds since the Unix epoch.
    #[schema(example = 1_767_225_600_000_i64)]
    timestamp: i64,
    /// Human-readable outcome.
    #[schema(example = "success")]
    msg: String,
    /// Operation payload; absent on failures and acknowledgements.
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = 42)]
    id: u64,
    username: String,
    phone: String,
    avatar: String,
    role: String,
    status: String,
    is_subscriber: bool,
    /// Absent when the user never subscribed.
    subscription_expires_at: Option<String>,
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::UserUpdate`].
///
/// Omitted fields are left unchanged.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserUpdate, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserUpdateSchema {
    username: Option<String>,
    avatar: Option<String>,
    role: Option<String>,
    #[schema(example = "banned")]
    status: Option<String>,
    is_subscriber: Option<bool>,
    subscription_expires_at: Option<String>,
}

/// OpenAPI schema for [`crate::domain::UsersPage`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UsersPage, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UsersPageSchema {
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u64,
    has_next: bool,
    has_previous: bool,
    data: Vec<UserSchema>,
    /// Subscribers across the whole provider.
    subscriber_total: u64,
}

/// OpenAPI schema for [`crate::domain::PlanetItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PlanetItem, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlanetItemSchema {
    id: String,
    name: String,
    user_id: u64,
    image_url: String,
    #[schema(example = "2026-10-18")]
    date_key: String,
    planet_no: String,
    keywords: Vec<String>,
    created_at: String,
    updated_at: String,
}

/// OpenAPI schema for a page of [`crate::domain::PlanetItem`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlanetPageSchema {
    total: u64,
    page: u32,
    page_size: u32,
    total_pages: u64,
    has_next: bool,
    has_previous: bool,
    data: Vec<PlanetItemSchema>,
}

/// OpenAPI schema for [`crate::domain::AppConfig`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AppConfig, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AppConfigSchema {
    id: u64,
    #[schema(example = "daily_limit")]
    config_key: String,
    alias: String,
    config_value: String,
    #[schema(example = "string")]
    value_type: String,
    description: String,
    created_at: String,
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::AppConfigUpsert`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AppConfigUpsert, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AppConfigUpsertSchema {
    alias: String,
    config_value: String,
    value_type: String,
    description: String,
}

/// OpenAPI schema for [`crate::domain::AdminIdentity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AdminIdentity, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdminIdentitySchema {
    #[schema(example = 1_000_001)]
    user_id: u64,
    username: String,
    email: String,
    #[schema(example = "admin")]
    role: String,
}
