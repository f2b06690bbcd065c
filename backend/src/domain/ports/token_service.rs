//! Driven port for signing and checking admin bearer tokens.

use super::define_port_error;
use crate::domain::{AdminIdentity, Error};

define_port_error! {
    /// Token signing and verification failures.
    pub enum TokenError {
        /// Signing failed.
        Encode { message: String } => "token encoding failed: {message}",
        /// The token is malformed, has a bad signature or wrong issuer, or
        /// lacks the access claims.
        Invalid { message: String } => "invalid token: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
    }
}

impl From<TokenError> for Error {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Encode { .. } => Error::internal(value.to_string()),
            TokenError::Invalid { .. } | TokenError::Expired => {
                Error::unauthorized("Invalid or expired token")
            }
        }
    }
}

/// Issues and verifies the gateway's access and refresh tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign an access token carrying the identity claims.
    fn issue_access(&self, identity: &AdminIdentity) -> Result<String, TokenError>;

    /// Sign a refresh token carrying only the subject.
    fn issue_refresh(&self, user_id: u64) -> Result<String, TokenError>;

    /// Verify an access token and return the identity it carries.
    fn verify_access(&self, token: &str) -> Result<AdminIdentity, TokenError>;
}
