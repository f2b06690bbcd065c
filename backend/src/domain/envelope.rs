//! The `{code, timestamp, msg, data}` wrapper shared by the gateway's own
//! responses and every upstream it talks to.

use serde::{Deserialize, Serialize};

/// Envelope code signalling success.
pub const SUCCESS_CODE: i32 = 200;

/// Message used on successful responses unless an operation says otherwise.
pub const SUCCESS_MESSAGE: &str = "success";

/// Uniform response wrapper.
///
/// `code` mirrors the HTTP status for responses the gateway produces.
/// `timestamp` is milliseconds since the Unix epoch. `data` is omitted from
/// the encoded form when absent.
///
/// Decoding is lenient: missing `code`, `timestamp` or `msg` take their zero
/// values so that a malformed upstream body is classified by its code rather
/// than rejected outright.
///
/// # Examples
/// ```
/// use admin_gateway::domain::Envelope;
///
/// let envelope = Envelope::success(vec![1, 2], 1_700_000_000_000);
/// let json = serde_json::to_value(&envelope).expect("encode");
/// assert_eq!(json["code"], 200);
/// assert_eq!(json["msg"], "success");
/// assert_eq!(json["data"], serde_json::json!([1, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Outcome code; `200` means success.
    #[serde(default)]
    pub code: i32,
    /// Milliseconds since the Unix epoch when the envelope was produced.
    #[serde(default)]
    pub timestamp: i64,
    /// Human-readable outcome message.
    #[serde(default)]
    pub msg: String,
    /// Operation payload.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    pub fn success(data: T, timestamp: i64) -> Self {
        Self {
            code: SUCCESS_CODE,
            timestamp,
            msg: SUCCESS_MESSAGE.to_owned(),
            data: Some(data),
        }
    }

    /// Envelope without payload, e.g. for errors or acknowledgements.
    pub fn message(code: i32, msg: impl Into<String>, timestamp: i64) -> Self {
        Self {
            code,
            timestamp,
            msg: msg.into(),
            data: None,
        }
    }

    /// Whether `code` signals success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}
