//! Per-concern settings loaded via OrthoConfig.
//!
//! Scalar fields carry `#[ortho_config(default = ..)]` so every section has a
//! defaults layer even when its environment is empty. Blank strings are
//! treated as unset by the accessors.

use ortho_config::OrthoConfig;
use pagination::PageBounds;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8090;

const DEFAULT_JWT_SECRET: &str = "please-change-this-secret";
const DEFAULT_ACCESS_TTL_SECS: u64 = 2 * 60 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 60 * 60;

const DEFAULT_ADMIN_USERNAME: &str = "app_box_admin";
const DEFAULT_ADMIN_EMAIL: &str = "app_box_admin@local";
const DEFAULT_ADMIN_PASSWORD: &str = "pass_the_appbox_admin";

const DEFAULT_STELLAR_NAME: &str = "stellar";
const DEFAULT_STELLAR_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_GATEWAY_HEADER: &str = "X-Gateway-Key";
const DEFAULT_STELLAR_TIMEOUT_SECS: u64 = 10;

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerSettings {
    /// Interface to bind, `0.0.0.0` when unset or blank.
    pub fn host(&self) -> &str {
        non_blank(self.host.as_ref()).unwrap_or(DEFAULT_HOST)
    }

    /// TCP port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }
}

/// Token signing settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JWT")]
pub struct JwtConfigSettings {
    /// HMAC signing secret.
    pub secret_key: Option<String>,
    /// Access token lifetime in seconds.
    #[ortho_config(default = DEFAULT_ACCESS_TTL_SECS)]
    pub expires_in_secs: u64,
    /// Refresh token lifetime in seconds.
    #[ortho_config(default = DEFAULT_REFRESH_TTL_SECS)]
    pub refresh_expires_in_secs: u64,
}

impl JwtConfigSettings {
    /// Signing secret, or the built-in development secret when blank.
    pub fn secret_key(&self) -> &str {
        non_blank(self.secret_key.as_ref()).unwrap_or(DEFAULT_JWT_SECRET)
    }
}

impl std::fmt::Debug for JwtConfigSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfigSettings")
            .field("secret_key", &"<redacted>")
            .field("expires_in_secs", &self.expires_in_secs)
            .field("refresh_expires_in_secs", &self.refresh_expires_in_secs)
            .finish()
    }
}

/// The single administrator account.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN")]
pub struct AdminSettings {
    /// Display name reported by the session endpoint.
    #[ortho_config(default = String::from(DEFAULT_ADMIN_USERNAME))]
    pub username: String,
    /// Contact address reported by the session endpoint.
    #[ortho_config(default = String::from(DEFAULT_ADMIN_EMAIL))]
    pub email: String,
    /// Sign-in secret.
    pub password: Option<String>,
}

impl AdminSettings {
    /// Trimmed username, or the built-in name when blank.
    pub fn username(&self) -> &str {
        non_blank(Some(&self.username)).unwrap_or(DEFAULT_ADMIN_USERNAME)
    }

    /// Trimmed email, or the built-in address when blank.
    pub fn email(&self) -> &str {
        non_blank(Some(&self.email)).unwrap_or(DEFAULT_ADMIN_EMAIL)
    }

    /// Configured password. Surrounding whitespace is significant.
    pub fn password(&self) -> &str {
        match self.password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => DEFAULT_ADMIN_PASSWORD,
        }
    }
}

impl std::fmt::Debug for AdminSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSettings")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The built-in HTTP upstream provider.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STELLAR")]
pub struct StellarSettings {
    /// Register the provider at startup. Read from the environment only.
    #[ortho_config(default = true, skip_cli)]
    pub enabled: bool,
    /// Registry key.
    pub provider_name: Option<String>,
    /// Base URL admin paths are appended to.
    pub api_base_url: Option<String>,
    /// Shared secret sent on every upstream call. Required when enabled.
    pub gateway_key: Option<String>,
    /// Header carrying the gateway key.
    pub gateway_header: Option<String>,
    /// Per-call timeout in seconds.
    #[ortho_config(default = DEFAULT_STELLAR_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl StellarSettings {
    /// Trimmed registry key, `stellar` when blank.
    pub fn provider_name(&self) -> &str {
        non_blank(self.provider_name.as_ref()).unwrap_or(DEFAULT_STELLAR_NAME)
    }

    /// Trimmed base URL, the local development upstream when blank.
    pub fn api_base_url(&self) -> &str {
        non_blank(self.api_base_url.as_ref()).unwrap_or(DEFAULT_STELLAR_BASE_URL)
    }

    /// Trimmed gateway key; empty when unset.
    pub fn gateway_key(&self) -> &str {
        non_blank(self.gateway_key.as_ref()).unwrap_or_default()
    }

    /// Trimmed header name, `X-Gateway-Key` when blank.
    pub fn gateway_header(&self) -> &str {
        non_blank(self.gateway_header.as_ref()).unwrap_or(DEFAULT_GATEWAY_HEADER)
    }
}

impl std::fmt::Debug for StellarSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StellarSettings")
            .field("enabled", &self.enabled)
            .field("provider_name", &self.provider_name)
            .field("api_base_url", &self.api_base_url)
            .field("gateway_key", &"<redacted>")
            .field("gateway_header", &self.gateway_header)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Registry-wide provider selection.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROVIDER")]
pub struct ProviderSettings {
    /// Key used when a request names no provider; blank defers to the
    /// upstream name.
    #[ortho_config(default = String::new())]
    pub default_name: String,
}

impl ProviderSettings {
    /// Configured default, or `fallback` when blank.
    pub fn default_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_blank(Some(&self.default_name)).unwrap_or(fallback)
    }
}

/// Page-size band handed to providers.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PAGINATION")]
pub struct PaginationSettings {
    /// Smallest page size forwarded upstream.
    #[ortho_config(default = PageBounds::default().min())]
    pub min_page_size: u32,
    /// Largest page size forwarded upstream.
    #[ortho_config(default = PageBounds::default().max())]
    pub max_page_size: u32,
    /// Page size used when a request names none.
    #[ortho_config(default = PageBounds::default().default_page_size())]
    pub default_page_size: u32,
}
