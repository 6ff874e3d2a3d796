//! The JSON response envelope shared by all endpoints.
//!
//! Successful responses are `{"success": true, "data": ..., "message": ...}`
//! with `data` and `message` omitted when not applicable; failures are
//! `{"success": false, "error": ...}`.

use serde::Serialize;

/// The envelope for successful responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = ()> {
    /// Always `true` for this type.
    pub success: bool,
    /// The payload of the response, omitted for message-only responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A human-readable note, set by mutating endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` in a success envelope.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Wrap `data` in a success envelope with a note for the client.
    pub fn with_message(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope carrying only a note, used by delete endpoints.
    pub fn message_only(message: &'static str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message),
        }
    }
}

/// The envelope for failed responses.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Always `false` for this type.
    pub success: bool,
    /// A client-facing description of what went wrong.
    pub error: String,
}

impl ApiError {
    /// Wrap an error description in a failure envelope.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
