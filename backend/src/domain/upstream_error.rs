//! Failure reported by a provider's backend.

use thiserror::Error;

/// Status and message extracted from an upstream rejection.
///
/// `status` is the raw status the upstream reported; mapping it onto an
/// HTTP status for the caller happens in [`crate::domain::ErrorCode::upstream`].
///
/// # Examples
/// ```
/// use admin_gateway::domain::UpstreamError;
///
/// let err = UpstreamError::new(404, "user not found");
/// assert_eq!(err.status(), 404);
/// assert_eq!(err.to_string(), "user not found");
///
/// let anonymous = UpstreamError::new(500, "  ");
/// assert_eq!(anonymous.to_string(), "upstream request failed: status=500");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UpstreamError {
    status: u16,
    message: String,
}

impl UpstreamError {
    /// Build an upstream error, synthesising a message when `message` is
    /// blank.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("upstream request failed: status={status}")
        } else {
            message
        };
        Self { status, message }
    }

    /// Status reported by the upstream.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Message reported by (or synthesised for) the upstream.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}
