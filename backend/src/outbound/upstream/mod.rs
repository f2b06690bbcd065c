//! HTTP adapters for provider backends.
//!
//! Providers are reached over HTTP and answer with the shared response
//! envelope; this module implements the `AdminProvider` port on top of that.

mod http_provider;

pub use http_provider::{HttpAdminProvider, HttpProviderBuildError, HttpProviderConfig};
