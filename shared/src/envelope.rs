//! Response envelope decoding and the API error taxonomy.
//!
//! The backend wraps most bodies as `{result, data, message}`; the time
//! slot endpoint uses `status` instead of `result`, and a few endpoints
//! answer with a bare `{message}` or `{error}`. Everything is folded into
//! `Result<ApiSuccess<T>, ApiError>` here so callers branch on a closed
//! set of variants.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Fallback shown when the server gave no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response reached the client
    #[error("network error: {0}")]
    Transport(String),

    /// HTTP 401 from any endpoint
    #[error("not signed in")]
    Unauthorized,

    /// Any other non-2xx status
    #[error("server responded with HTTP {status}")]
    Http { status: u16, message: Option<String> },

    /// A 2xx response whose envelope reports failure
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    Logical(Option<String>),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text suitable for a toast or inline banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Logical(Some(message)) => message.clone(),
            ApiError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Payload and message of a successful envelope
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiSuccess<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T: Default> ApiSuccess<T> {
    pub fn data_or_default(self) -> T {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum Outcome {
    #[serde(alias = "success", alias = "SUCCESS")]
    Success,
    #[serde(alias = "failed", alias = "FAILED", alias = "Failure")]
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    result: Option<Outcome>,
    status: Option<Value>,
    data: Option<Value>,
    message: Option<String>,
    error: Option<String>,
}

impl RawEnvelope {
    fn outcome(&self) -> Option<Outcome> {
        self.result.or_else(|| {
            self.status
                .as_ref()
                .and_then(|status| serde_json::from_value::<Outcome>(status.clone()).ok())
        })
    }

    fn server_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .filter(|message| !message.trim().is_empty())
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_raw(body: &str) -> Option<RawEnvelope> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<RawEnvelope>(body).ok()
}

/// Decode an enveloped body.
///
/// A 2xx with `result: "Failed"` (or a bare `error`) is a logical failure;
/// a 2xx with no outcome field and no error is treated as success.
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<ApiSuccess<T>, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }

    let raw = parse_raw(body);

    if !is_success_status(status) {
        return Err(ApiError::Http {
            status,
            message: raw.as_ref().and_then(RawEnvelope::server_message),
        });
    }

    let raw = match raw {
        Some(raw) => raw,
        None if body.trim().is_empty() => {
            return Ok(ApiSuccess {
                data: None,
                message: None,
            })
        }
        None => return Err(ApiError::Decode("response body is not an envelope".to_string())),
    };

    match raw.outcome() {
        Some(Outcome::Success) => success_from(raw),
        Some(Outcome::Failed) | Some(Outcome::Unknown) => {
            Err(ApiError::Logical(raw.server_message()))
        }
        None => match raw.error {
            Some(error) => Err(ApiError::Logical(Some(error))),
            None => success_from(raw),
        },
    }
}

fn success_from<T: DeserializeOwned>(raw: RawEnvelope) -> Result<ApiSuccess<T>, ApiError> {
    let data = match raw.data {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            serde_json::from_value::<T>(value).map_err(|e| ApiError::Decode(e.to_string()))?,
        ),
    };
    Ok(ApiSuccess {
        data,
        message: raw.message,
    })
}

/// Decode a body that is not wrapped in an envelope
pub fn decode_bare<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !is_success_status(status) {
        return Err(ApiError::Http {
            status,
            message: parse_raw(body).as_ref().and_then(RawEnvelope::server_message),
        });
    }
    serde_json::from_str::<T>(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, CheckSessionResponse, TimeSlot};

    #[test]
    fn test_success_envelope_yields_data() {
        let body = r#"{"result": "Success", "data": [{"id": 1, "name": "Yoga"}]}"#;
        let success = decode_envelope::<Vec<Category>>(200, body).unwrap();
        assert_eq!(success.data_or_default().len(), 1);
    }

    #[test]
    fn test_failed_envelope_on_200_is_logical() {
        let body = r#"{"result": "Failed", "message": "Cannot update past dates."}"#;
        let err = decode_envelope::<Value>(200, body).unwrap_err();
        assert_eq!(err, ApiError::Logical(Some("Cannot update past dates.".to_string())));
        assert_eq!(err.user_message(), "Cannot update past dates.");
    }

    #[test]
    fn test_failed_envelope_without_message_uses_fallback() {
        let err = decode_envelope::<Value>(200, r#"{"result": "Failed"}"#).unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn test_failed_data_shape_is_not_decoded() {
        // validation errors come back as an object even though T is a list
        let body = r#"{"result": "Failed", "message": "Validation error", "data": {"name": ["required"]}}"#;
        let err = decode_envelope::<Vec<Category>>(200, body).unwrap_err();
        assert_eq!(err, ApiError::Logical(Some("Validation error".to_string())));
    }

    #[test]
    fn test_status_field_is_an_outcome() {
        let body = r#"{"status": "Success", "data": [{"id": 1, "start_time": "09:00:00", "end_time": "12:00:00"}]}"#;
        let slots = decode_envelope::<Vec<TimeSlot>>(200, body)
            .unwrap()
            .data_or_default();
        assert_eq!(slots[0].start_time, "09:00:00");

        let failed = decode_envelope::<Vec<TimeSlot>>(200, r#"{"status": "Failed"}"#);
        assert!(matches!(failed, Err(ApiError::Logical(None))));
    }

    #[test]
    fn test_bare_error_is_logical() {
        let body = r#"{"result": "Failed", "error": "The selected event is not available."}"#;
        let err = decode_envelope::<Value>(200, body).unwrap_err();
        assert_eq!(err.user_message(), "The selected event is not available.");

        let err = decode_envelope::<Value>(200, r#"{"error": "Slot not found."}"#).unwrap_err();
        assert_eq!(err.user_message(), "Slot not found.");
    }

    #[test]
    fn test_bare_message_is_success() {
        let success =
            decode_envelope::<Value>(200, r#"{"message": "Slot deleted successfully."}"#).unwrap();
        assert_eq!(success.message.as_deref(), Some("Slot deleted successfully."));
        assert!(success.data.is_none());
    }

    #[test]
    fn test_empty_body_is_success_without_data() {
        let success = decode_envelope::<Value>(204, "").unwrap();
        assert!(success.data.is_none());
    }

    #[test]
    fn test_unauthorized_short_circuits() {
        let err = decode_envelope::<Value>(401, r#"{"result": "Success"}"#).unwrap_err();
        assert!(err.is_unauthorized());
        let err = decode_bare::<CheckSessionResponse>(401, "").unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_http_error_keeps_server_message() {
        let err = decode_envelope::<Value>(400, r#"{"error": "Cannot delete a booked slot."}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 400,
                message: Some("Cannot delete a booked slot.".to_string())
            }
        );

        let err = decode_envelope::<Value>(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_non_json_success_is_decode_error() {
        let err = decode_envelope::<Value>(200, "<html></html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_bare_body() {
        let body = r#"{"authenticated": true, "username": "ana", "name": "Ana", "is_admin": false}"#;
        let session = decode_bare::<CheckSessionResponse>(200, body).unwrap();
        assert!(session.authenticated);
        assert!(!session.is_admin);
    }
}
