//! Driven port for the per-tenant admin backends.
//!
//! Every provider exposes the same operations over its users, their planets
//! and its configuration entries. Handlers resolve a provider by key through
//! [`crate::domain::ProviderRegistry`] and never learn how it is reached.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use super::define_port_error;
use crate::domain::{
    AppConfig, AppConfigUpsert, ConfigKey, Error, PlanetItem, UpstreamError, User, UserId,
    UserUpdate, UsersPage,
};

define_port_error! {
    /// Errors surfaced while calling a provider.
    pub enum ProviderError {
        /// The upstream answered with an error status or a non-success
        /// envelope.
        Upstream(UpstreamError) => "{0}",
        /// The request never produced a response.
        Transport { message: String } =>
            "provider transport failed: {message}",
        /// The call exceeded the provider's time limit.
        Timeout { message: String } =>
            "provider timed out: {message}",
        /// A success status came back without a decodable envelope.
        Protocol { message: String } =>
            "provider response violated the envelope protocol: {message}",
        /// The envelope's `data` did not match the expected shape.
        Decode { message: String } =>
            "provider payload could not be decoded: {message}",
        /// The outgoing request could not be built.
        Request { message: String } =>
            "provider request could not be built: {message}",
    }
}

impl From<ProviderError> for Error {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::Upstream(upstream) => {
                Error::upstream(upstream.status(), upstream.message())
            }
            other => Error::internal(other.to_string()),
        }
    }
}

/// Admin operations every provider must support.
///
/// Implementations are shared across request tasks and must tolerate
/// concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminProvider: Send + Sync {
    /// Name the provider was configured with.
    fn name(&self) -> &str;

    /// One page of users, optionally filtered by `keyword` (empty means no
    /// filter).
    async fn list_users(
        &self,
        request: PageRequest,
        keyword: &str,
    ) -> Result<UsersPage, ProviderError>;

    /// One page of planets owned by `user_id`.
    async fn list_user_planets(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> Result<Paginated<PlanetItem>, ProviderError>;

    /// Apply a sparse patch and return the updated user.
    async fn update_user(&self, user_id: UserId, patch: &UserUpdate)
    -> Result<User, ProviderError>;

    /// Delete a user.
    async fn delete_user(&self, user_id: UserId) -> Result<(), ProviderError>;

    /// Every configuration entry; empty when there are none.
    async fn list_configs(&self) -> Result<Vec<AppConfig>, ProviderError>;

    /// Create or replace the entry for `key`.
    async fn upsert_config(
        &self,
        key: &ConfigKey,
        payload: &AppConfigUpsert,
    ) -> Result<AppConfig, ProviderError>;

    /// Delete the entry for `key`.
    async fn delete_config(&self, key: &ConfigKey) -> Result<(), ProviderError>;
}
