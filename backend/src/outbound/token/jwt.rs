//! HS256 JSON Web Tokens for the admin session.
//!
//! Access tokens carry the administrator identity; refresh tokens carry only
//! the registered claims. Expiry is checked against the injected clock rather
//! than the system time so token lifetimes can be tested deterministically.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::AdminIdentity;
use crate::domain::ports::{TokenError, TokenService};

/// Issuer stamped into, and required from, every token.
pub const TOKEN_ISSUER: &str = "admin-gateway";

/// Signing secret and token lifetimes.
#[derive(Clone)]
pub struct JwtSettings {
    /// HMAC secret shared by signing and verification.
    pub secret: String,
    /// Lifetime of access tokens.
    pub access_ttl: TimeDelta,
    /// Lifetime of refresh tokens.
    pub refresh_ttl: TimeDelta,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    user_id: u64,
    username: String,
    email: String,
    role: String,
    sub: String,
    iss: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    sub: String,
    iss: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// [`TokenService`] backed by `jsonwebtoken`.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a signer/verifier for `settings`.
    pub fn new(settings: &JwtSettings, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
            clock,
        }
    }

    fn window(&self, ttl: TimeDelta) -> (i64, i64) {
        let now = self.clock.utc();
        (now.timestamp(), (now + ttl).timestamp())
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|err| TokenError::encode(err.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue_access(&self, identity: &AdminIdentity) -> Result<String, TokenError> {
        let (issued_at, expires_at) = self.window(self.access_ttl);
        self.sign(&AccessClaims {
            user_id: identity.user_id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            role: identity.role.clone(),
            sub: identity.user_id.to_string(),
            iss: TOKEN_ISSUER.to_owned(),
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at,
        })
    }

    fn issue_refresh(&self, user_id: u64) -> Result<String, TokenError> {
        let (issued_at, expires_at) = self.window(self.refresh_ttl);
        self.sign(&RefreshClaims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_owned(),
            iat: issued_at,
            nbf: issued_at,
            exp: expires_at,
        })
    }

    fn verify_access(&self, token: &str) -> Result<AdminIdentity, TokenError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            },
        )?;
        let claims = data.claims;
        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        Ok(AdminIdentity {
            user_id: claims.user_id,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        })
    }
}
