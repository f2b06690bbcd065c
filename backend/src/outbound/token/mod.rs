//! Bearer token adapters.

mod jwt;

pub use jwt::{JwtSettings, JwtTokenService, TOKEN_ISSUER};
