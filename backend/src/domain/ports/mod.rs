//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_provider;
mod login_service;
mod token_service;

#[cfg(test)]
pub use admin_provider::MockAdminProvider;
pub use admin_provider::{AdminProvider, ProviderError};
#[cfg(test)]
pub use login_service::MockAdminLoginService;
pub use login_service::{AdminLoginService, AuthError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
