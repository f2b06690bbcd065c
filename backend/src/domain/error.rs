//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses carrying the shared response envelope.

use std::fmt;

use crate::domain::TraceId;

/// Header used to echo the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Fallback status when an upstream reports something unusable.
pub const BAD_GATEWAY_STATUS: u16 = 502;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The caller asked for a provider the registry does not know.
    ProviderNotFound,
    /// The resolved provider's backend rejected the operation.
    ///
    /// `status` is already clamped into `400..=599`.
    Upstream {
        /// HTTP status to render.
        status: u16,
    },
    /// A required collaborator is not available.
    ServiceUnavailable,
    /// An unexpected error occurred inside the gateway.
    InternalError,
}

impl ErrorCode {
    /// Build an upstream code, substituting 502 for statuses outside
    /// `400..=599`.
    ///
    /// # Examples
    /// ```
    /// use admin_gateway::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::upstream(404), ErrorCode::Upstream { status: 404 });
    /// assert_eq!(ErrorCode::upstream(200), ErrorCode::Upstream { status: 502 });
    /// ```
    pub fn upstream(status: u16) -> Self {
        let status = if (400..=599).contains(&status) {
            status
        } else {
            BAD_GATEWAY_STATUS
        };
        Self::Upstream { status }
    }

    /// Numeric HTTP-like status for this code.
    pub fn status(self) -> u16 {
        match self {
            Self::InvalidRequest | Self::ProviderNotFound => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Upstream { status } => status,
            Self::ServiceUnavailable => 503,
            Self::InternalError => 500,
        }
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::ProviderNotFound => "provider not found",
            Self::Upstream { .. } => "upstream request failed",
            Self::ServiceUnavailable => "Service unavailable",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain error payload.
///
/// Captures the trace identifier in scope at construction time so adapters
/// can correlate the rendered response with logs.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
///
/// # Examples
/// ```
/// use admin_gateway::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error.
    ///
    /// Blank messages are replaced by a generic message for `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured when the error was created, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a trace identifier, replacing any captured one.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ProviderNotFound`].
    pub fn provider_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Upstream`].
    ///
    /// # Examples
    /// ```
    /// use admin_gateway::domain::{Error, ErrorCode};
    ///
    /// let err = Error::upstream(302, "moved");
    /// assert_eq!(err.code(), ErrorCode::Upstream { status: 502 });
    /// ```
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::upstream(status), message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
