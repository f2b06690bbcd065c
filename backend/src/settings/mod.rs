//! Gateway configuration.
//!
//! Each concern reads its own environment prefix (`SERVER_*`, `JWT_*`,
//! `ADMIN_*`, `STELLAR_*`, `PROVIDER_*`, `PAGINATION_*`) through
//! OrthoConfig. [`GatewaySettings::load`] reads them all and validates the
//! combination before anything is wired.

mod sections;

pub use sections::{
    AdminSettings, JwtConfigSettings, PaginationSettings, ProviderSettings, ServerSettings,
    StellarSettings,
};

use std::ffi::OsString;
use std::time::Duration;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use pagination::{PageBounds, PageBoundsError};
use thiserror::Error;
use url::Url;

use crate::domain::AdminAccount;
use crate::outbound::token::JwtSettings;
use crate::outbound::upstream::HttpProviderConfig;

/// Program name handed to each section loader in place of CLI arguments.
const PROGRAM_NAME: &str = "admin-gateway";

/// Reasons the gateway refuses to start with the given configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A section could not be read.
    #[error("failed to load {section} settings: {message}")]
    Load {
        section: &'static str,
        message: String,
    },
    /// The upstream provider is enabled but a required value is blank.
    #[error("{variable} is required when the upstream provider is enabled")]
    MissingUpstreamValue { variable: &'static str },
    /// The upstream base URL does not parse.
    #[error("STELLAR_API_BASE_URL `{url}` is invalid: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The page-size band is incoherent.
    #[error("invalid pagination settings: {0}")]
    Pagination(#[from] PageBoundsError),
    /// A token lifetime is zero or too large.
    #[error("{variable} must be between 1 and {max} seconds")]
    TokenLifetime { variable: &'static str, max: i64 },
}

/// Every settings section, loaded together.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub server: ServerSettings,
    pub jwt: JwtConfigSettings,
    pub admin: AdminSettings,
    pub stellar: StellarSettings,
    pub provider: ProviderSettings,
    pub pagination: PaginationSettings,
}

fn program_args() -> [OsString; 1] {
    [OsString::from(PROGRAM_NAME)]
}

fn load_error<E: std::fmt::Display>(section: &'static str) -> impl FnOnce(E) -> SettingsError {
    move |err| SettingsError::Load {
        section,
        message: err.to_string(),
    }
}

impl GatewaySettings {
    /// Load all sections from the environment and configuration files, then
    /// validate them.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when a section fails to load or the values
    /// are inconsistent.
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Self {
            server: ServerSettings::load_from_iter(program_args()).map_err(load_error("server"))?,
            jwt: JwtConfigSettings::load_from_iter(program_args()).map_err(load_error("jwt"))?,
            admin: AdminSettings::load_from_iter(program_args()).map_err(load_error("admin"))?,
            stellar: StellarSettings::load_from_iter(program_args())
                .map_err(load_error("stellar"))?,
            provider: ProviderSettings::load_from_iter(program_args())
                .map_err(load_error("provider"))?,
            pagination: PaginationSettings::load_from_iter(program_args())
                .map_err(load_error("pagination"))?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field rules without building anything.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.page_bounds()?;
        self.token_settings()?;
        self.upstream()?;
        Ok(())
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host().to_owned(), self.server.port())
    }

    /// Registry default: `PROVIDER_DEFAULT_NAME`, else the upstream name.
    pub fn default_provider(&self) -> &str {
        self.provider.default_name(self.stellar.provider_name())
    }

    /// Page-size band.
    ///
    /// # Errors
    /// Returns [`SettingsError::Pagination`] for incoherent bounds.
    pub fn page_bounds(&self) -> Result<PageBounds, SettingsError> {
        let bounds = PageBounds::new(
            self.pagination.min_page_size,
            self.pagination.max_page_size,
            self.pagination.default_page_size,
        )?;
        Ok(bounds)
    }

    /// Signing secret and token lifetimes.
    ///
    /// # Errors
    /// Returns [`SettingsError::TokenLifetime`] for zero or overflowing
    /// lifetimes.
    pub fn token_settings(&self) -> Result<JwtSettings, SettingsError> {
        Ok(JwtSettings {
            secret: self.jwt.secret_key().to_owned(),
            access_ttl: lifetime("JWT_EXPIRES_IN_SECS", self.jwt.expires_in_secs)?,
            refresh_ttl: lifetime(
                "JWT_REFRESH_EXPIRES_IN_SECS",
                self.jwt.refresh_expires_in_secs,
            )?,
        })
    }

    /// The configured administrator.
    pub fn admin_account(&self) -> AdminAccount {
        AdminAccount::new(
            self.admin.username(),
            self.admin.email(),
            self.admin.password(),
        )
    }

    /// Connection settings for the upstream provider, or `None` when it is
    /// disabled.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the provider is enabled without a
    /// gateway key or with an unparsable base URL.
    pub fn upstream(&self) -> Result<Option<HttpProviderConfig>, SettingsError> {
        let stellar = &self.stellar;
        if !stellar.enabled {
            return Ok(None);
        }
        if stellar.gateway_key().is_empty() {
            return Err(SettingsError::MissingUpstreamValue {
                variable: "STELLAR_GATEWAY_KEY",
            });
        }
        let raw_url = stellar.api_base_url();
        let base_url = Url::parse(raw_url).map_err(|source| SettingsError::BaseUrl {
            url: raw_url.to_owned(),
            source,
        })?;
        Ok(Some(HttpProviderConfig {
            name: stellar.provider_name().to_owned(),
            base_url,
            gateway_header: stellar.gateway_header().to_owned(),
            gateway_key: stellar.gateway_key().to_owned(),
            timeout: Duration::from_secs(stellar.timeout_secs),
        }))
    }
}

fn lifetime(variable: &'static str, secs: u64) -> Result<TimeDelta, SettingsError> {
    let max = TimeDelta::MAX.num_seconds();
    i64::try_from(secs)
        .ok()
        .filter(|secs| *secs > 0)
        .and_then(TimeDelta::try_seconds)
        .ok_or(SettingsError::TokenLifetime { variable, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    #[fixture]
    fn settings() -> GatewaySettings {
        GatewaySettings {
            server: ServerSettings {
                host: None,
                port: 8090,
            },
            jwt: JwtConfigSettings {
                secret_key: None,
                expires_in_secs: 7_200,
                refresh_expires_in_secs: 604_800,
            },
            admin: AdminSettings {
                username: String::new(),
                email: String::new(),
                password: None,
            },
            stellar: StellarSettings {
                enabled: true,
                provider_name: None,
                api_base_url: None,
                gateway_key: Some("k3y".into()),
                gateway_header: None,
                timeout_secs: 10,
            },
            provider: ProviderSettings {
                default_name: String::new(),
            },
            pagination: PaginationSettings {
                min_page_size: 1,
                max_page_size: 100,
                default_page_size: 10,
            },
        }
    }

    #[rstest]
    fn defaults_are_valid(settings: GatewaySettings) {
        settings.validate().expect("defaults validate");
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 8090));
        assert_eq!(settings.default_provider(), "stellar");
        assert_eq!(settings.page_bounds().expect("bounds"), PageBounds::default());
    }

    #[rstest]
    fn upstream_config_follows_stellar_settings(settings: GatewaySettings) {
        let upstream = settings
            .upstream()
            .expect("valid upstream")
            .expect("enabled by default");
        assert_eq!(upstream.name, "stellar");
        assert_eq!(upstream.base_url.as_str(), "http://127.0.0.1:8080/api/v1");
        assert_eq!(upstream.gateway_header, "X-Gateway-Key");
        assert_eq!(upstream.timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn enabled_upstream_requires_gateway_key(mut settings: GatewaySettings) {
        settings.stellar.gateway_key = Some("  ".into());
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingUpstreamValue {
                variable: "STELLAR_GATEWAY_KEY"
            })
        ));
    }

    #[rstest]
    fn disabled_upstream_needs_no_key(mut settings: GatewaySettings) {
        settings.stellar.enabled = false;
        settings.stellar.gateway_key = None;
        assert!(settings.upstream().expect("valid").is_none());
    }

    #[rstest]
    fn malformed_base_url_is_rejected(mut settings: GatewaySettings) {
        settings.stellar.api_base_url = Some("not a url".into());
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::BaseUrl { .. })
        ));
    }

    #[rstest]
    #[case(50, 10, 10)]
    #[case(1, 100, 500)]
    #[case(0, 100, 10)]
    fn incoherent_pagination_is_rejected(
        mut settings: GatewaySettings,
        #[case] min: u32,
        #[case] max: u32,
        #[case] default: u32,
    ) {
        settings.pagination = PaginationSettings {
            min_page_size: min,
            max_page_size: max,
            default_page_size: default,
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Pagination(_))
        ));
    }

    #[rstest]
    fn zero_token_lifetime_is_rejected(mut settings: GatewaySettings) {
        settings.jwt.expires_in_secs = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::TokenLifetime {
                variable: "JWT_EXPIRES_IN_SECS",
                ..
            })
        ));
    }

    #[rstest]
    fn explicit_default_provider_wins(mut settings: GatewaySettings) {
        settings.provider.default_name = "luna".into();
        assert_eq!(settings.default_provider(), "luna");
    }

    #[rstest]
    fn load_reads_every_prefix() {
        let _guard = lock_env([
            ("SERVER_HOST", None::<String>),
            ("SERVER_PORT", Some("9100".to_owned())),
            ("JWT_SECRET_KEY", None::<String>),
            ("JWT_EXPIRES_IN_SECS", None::<String>),
            ("JWT_REFRESH_EXPIRES_IN_SECS", None::<String>),
            ("ADMIN_USERNAME", None::<String>),
            ("ADMIN_EMAIL", None::<String>),
            ("ADMIN_PASSWORD", None::<String>),
            ("STELLAR_ENABLED", None::<String>),
            ("STELLAR_PROVIDER_NAME", None::<String>),
            ("STELLAR_API_BASE_URL", None::<String>),
            ("STELLAR_GATEWAY_KEY", Some("k3y".to_owned())),
            ("STELLAR_GATEWAY_HEADER", None::<String>),
            ("STELLAR_TIMEOUT_SECS", None::<String>),
            ("PROVIDER_DEFAULT_NAME", Some("luna".to_owned())),
            ("PAGINATION_MIN_PAGE_SIZE", None::<String>),
            ("PAGINATION_MAX_PAGE_SIZE", Some("50".to_owned())),
            ("PAGINATION_DEFAULT_PAGE_SIZE", None::<String>),
        ]);

        let settings = GatewaySettings::load().expect("settings load");

        assert_eq!(settings.server.port(), 9100);
        assert_eq!(settings.default_provider(), "luna");
        assert_eq!(settings.page_bounds().expect("bounds").max(), 50);
    }

    #[rstest]
    fn load_applies_defaults_to_unset_sections() {
        let _guard = lock_env([
            ("SERVER_HOST", None::<String>),
            ("SERVER_PORT", None::<String>),
            ("JWT_SECRET_KEY", None::<String>),
            ("JWT_EXPIRES_IN_SECS", None::<String>),
            ("JWT_REFRESH_EXPIRES_IN_SECS", None::<String>),
            ("ADMIN_USERNAME", None::<String>),
            ("ADMIN_EMAIL", None::<String>),
            ("ADMIN_PASSWORD", None::<String>),
            ("STELLAR_ENABLED", None::<String>),
            ("STELLAR_PROVIDER_NAME", None::<String>),
            ("STELLAR_API_BASE_URL", None::<String>),
            ("STELLAR_GATEWAY_KEY", Some("k3y".to_owned())),
            ("STELLAR_GATEWAY_HEADER", None::<String>),
            ("STELLAR_TIMEOUT_SECS", None::<String>),
            ("PROVIDER_DEFAULT_NAME", None::<String>),
            ("PAGINATION_MIN_PAGE_SIZE", None::<String>),
            ("PAGINATION_MAX_PAGE_SIZE", None::<String>),
            ("PAGINATION_DEFAULT_PAGE_SIZE", None::<String>),
        ]);

        let settings = GatewaySettings::load().expect("settings load");

        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 8090));
        assert_eq!(settings.default_provider(), "stellar");
        assert_eq!(settings.page_bounds().expect("bounds"), PageBounds::default());
        assert!(settings.stellar.enabled);
        assert_eq!(settings.admin_account().identity().username, "app_box_admin");
    }

    #[rstest]
    fn load_fails_without_gateway_key() {
        let _guard = lock_env([
            ("STELLAR_ENABLED", None::<String>),
            ("STELLAR_GATEWAY_KEY", None::<String>),
            ("PAGINATION_MIN_PAGE_SIZE", None::<String>),
            ("PAGINATION_MAX_PAGE_SIZE", None::<String>),
            ("PAGINATION_DEFAULT_PAGE_SIZE", None::<String>),
            ("JWT_EXPIRES_IN_SECS", None::<String>),
            ("JWT_REFRESH_EXPIRES_IN_SECS", None::<String>),
        ]);

        assert!(matches!(
            GatewaySettings::load(),
            Err(SettingsError::MissingUpstreamValue { .. })
        ));
    }
}
