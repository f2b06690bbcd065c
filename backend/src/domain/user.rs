//! End-user records managed through a provider.
//!
//! These are the provider's users, not gateway accounts. The gateway never
//! persists them; it relays them between the admin console and the upstream.

use std::fmt;
use std::str::FromStr;

use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// Nothing left after trimming.
    Empty,
    /// Not a positive base-10 integer.
    Invalid,
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::Invalid => write!(f, "user id must be a positive integer"),
        }
    }
}

impl std::error::Error for UserIdError {}

/// Positive numeric identifier of a provider user.
///
/// # Examples
/// ```
/// use admin_gateway::domain::UserId;
///
/// let id: UserId = "42".parse().expect("numeric id");
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<UserId>().is_err());
/// assert!("abc".parse::<UserId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier, rejecting zero.
    pub fn new(raw: u64) -> Result<Self, UserIdError> {
        if raw == 0 {
            return Err(UserIdError::Invalid);
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }
        let raw = trimmed.parse::<u64>().map_err(|_| UserIdError::Invalid)?;
        Self::new(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provider's view of one of its users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    /// Provider-assigned identifier.
    pub id: u64,
    pub username: String,
    pub phone: String,
    pub avatar: String,
    pub role: String,
    pub status: String,
    pub is_subscriber: bool,
    /// Absent when the user never subscribed.
    pub subscription_expires_at: Option<String>,
    pub created_at: String,
}

/// Sparse user patch. Only present fields are forwarded upstream.
///
/// # Examples
/// ```
/// use admin_gateway::domain::UserUpdate;
///
/// let patch = UserUpdate {
///     status: Some("banned".into()),
///     ..UserUpdate::default()
/// };
/// let json = serde_json::to_value(&patch).expect("encode");
/// assert_eq!(json, serde_json::json!({"status": "banned"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subscriber: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expires_at: Option<String>,
}

/// A page of users plus the provider-wide subscriber count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    #[serde(flatten)]
    pub page: Paginated<User>,
    /// Subscribers across the whole provider, not just this page.
    #[serde(default)]
    pub subscriber_total: u64,
}

impl UsersPage {
    /// An empty page shaped after `request`.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            page: Paginated::empty(request),
            subscriber_total: 0,
        }
    }
}
