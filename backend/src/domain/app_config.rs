//! Provider-side configuration entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for [`ConfigKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigKeyError {
    /// Nothing left after trimming.
    Empty,
}

impl fmt::Display for ConfigKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "config key must not be empty"),
        }
    }
}

impl std::error::Error for ConfigKeyError {}

/// Trimmed, non-empty configuration key.
///
/// Keys may contain any characters; adapters escape them as needed.
///
/// # Examples
/// ```
/// use admin_gateway::domain::ConfigKey;
///
/// let key = ConfigKey::new("  feature.flags ").expect("non-empty");
/// assert_eq!(key.as_ref(), "feature.flags");
/// assert!(ConfigKey::new(" \t").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Trim and validate a raw key.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ConfigKeyError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConfigKeyError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored configuration entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub id: u64,
    pub config_key: String,
    pub alias: String,
    pub config_value: String,
    /// Provider-defined type tag such as `string` or `json`.
    pub value_type: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a create-or-replace request for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfigUpsert {
    pub alias: String,
    pub config_value: String,
    pub value_type: String,
    pub description: String,
}
