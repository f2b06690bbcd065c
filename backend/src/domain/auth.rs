//! Administrator identity and credential primitives.
//!
//! The gateway has exactly one administrator, configured at startup. These
//! types keep the secret material zeroised and out of debug output.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Role claimed by administrator tokens and required by admin routes.
pub const ADMIN_ROLE: &str = "admin";

/// Fixed user id assigned to the configured administrator.
pub const ADMIN_USER_ID: u64 = 1_000_001;

/// Password submitted on the sign-in form.
///
/// Blank passwords are accepted here and simply fail to match.
///
/// # Examples
/// ```
/// use admin_gateway::domain::AdminCredentials;
///
/// let creds = AdminCredentials::new("hunter2");
/// assert_eq!(creds.password(), "hunter2");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Wrap a submitted password.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Zeroizing::new(password.into()),
        }
    }

    /// Submitted password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Claims describing a signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    pub user_id: u64,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl AdminIdentity {
    /// Whether the identity carries the administrator role.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// The configured administrator account.
#[derive(Clone)]
pub struct AdminAccount {
    username: String,
    email: String,
    password: Zeroizing<String>,
}

impl AdminAccount {
    /// Build the account from configured values.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Whether `credentials` match the configured password exactly.
    pub fn accepts(&self, credentials: &AdminCredentials) -> bool {
        credentials.password() == self.password.as_str()
    }

    /// Identity issued to this account on sign-in.
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            user_id: ADMIN_USER_ID,
            username: self.username.clone(),
            email: self.email.clone(),
            role: ADMIN_ROLE.to_owned(),
        }
    }
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub identity: AdminIdentity,
    pub access_token: String,
    pub refresh_token: String,
}
