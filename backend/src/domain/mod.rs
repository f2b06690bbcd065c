//! Domain model, services and ports.
//!
//! Nothing in here knows about HTTP frameworks or concrete upstreams.
//! Inbound adapters call the driving ports; outbound adapters implement the
//! driven ones.

pub mod admin_auth;
pub mod app_config;
pub mod auth;
pub mod envelope;
pub mod error;
pub mod planet;
pub mod ports;
pub mod registry;
pub mod trace_id;
pub mod upstream_error;
pub mod user;

pub use self::admin_auth::AdminAuthService;
pub use self::app_config::{AppConfig, AppConfigUpsert, ConfigKey, ConfigKeyError};
pub use self::auth::{
    ADMIN_ROLE, ADMIN_USER_ID, AdminAccount, AdminCredentials, AdminIdentity, AdminSession,
};
pub use self::envelope::{Envelope, SUCCESS_CODE, SUCCESS_MESSAGE};
pub use self::error::{BAD_GATEWAY_STATUS, Error, ErrorCode, TRACE_ID_HEADER};
pub use self::planet::PlanetItem;
pub use self::registry::{ProviderRegistry, RegistryError};
pub use self::trace_id::TraceId;
pub use self::upstream_error::UpstreamError;
pub use self::user::{User, UserId, UserIdError, UserUpdate, UsersPage};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
