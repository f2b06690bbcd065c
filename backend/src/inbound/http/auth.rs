//! Bearer-token guard for administrator routes.
//!
//! Handlers take [`AuthenticatedAdmin`] as an argument; extraction fails with
//! an enveloped 401/403 before the handler body runs.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use super::state::HttpState;
use crate::domain::{AdminIdentity, Error};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the administrator that signed the request's access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub AdminIdentity);

impl AuthenticatedAdmin {
    /// Identity decoded from the verified access token.
    pub fn identity(&self) -> &AdminIdentity {
        &self.0
    }
}

impl FromRequest for AuthenticatedAdmin {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedAdmin, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let token = bearer_token(req)?;
    let identity = state.tokens.verify_access(token)?;
    if !identity.is_admin() {
        return Err(Error::forbidden("Forbidden"));
    }
    Ok(AuthenticatedAdmin(identity))
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Err(Error::unauthorized("Token not provided"));
    };
    if value.is_empty() {
        return Err(Error::unauthorized("Token not provided"));
    }
    let raw = value
        .to_str()
        .map_err(|_| Error::unauthorized("Invalid token"))?;
    match raw.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(Error::unauthorized("Invalid token")),
    }
}
