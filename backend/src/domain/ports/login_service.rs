//! Driving port for administrator sign-in.
//!
//! Inbound adapters call it with the submitted credentials; tests substitute
//! the generated mock instead of wiring token signing.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AdminCredentials, AdminSession, Error};

define_port_error! {
    /// Reasons a sign-in attempt fails.
    pub enum AuthError {
        /// The password does not match the configured administrator.
        InvalidCredentials => "invalid password",
        /// Credentials matched but a token could not be minted.
        TokenIssue { message: String } => "token issuance failed: {message}",
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials => Error::unauthorized(value.to_string()),
            AuthError::TokenIssue { .. } => Error::internal(value.to_string()),
        }
    }
}

/// Administrator sign-in use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminLoginService: Send + Sync {
    /// Check `credentials` and mint a fresh session on success.
    async fn login(&self, credentials: &AdminCredentials) -> Result<AdminSession, AuthError>;
}
