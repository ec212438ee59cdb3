//! HTTP reply envelope.
//!
//! Every reply body is `{ success, message?, data?, error? }`.

use serde::{Deserialize, Serialize};

use crate::error::OpsError;

/// JSON envelope shared by all priced endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful reply with a confirmation and payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Failed reply with a client-facing error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Status code plus serialized JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl HttpReply {
    /// 200 reply wrapping `data`.
    pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Self {
        let body = serde_json::to_value(ApiResponse::ok(message, data))
            .unwrap_or_else(|e| serde_json::json!({ "success": false, "error": e.to_string() }));
        Self { status: 200, body }
    }

    /// Error reply with the status and message the error maps to.
    pub fn from_error(error: &OpsError) -> Self {
        let message = error.client_message();
        let body = serde_json::to_value(ApiResponse::<()>::failure(message.clone()))
            .unwrap_or_else(|_| serde_json::json!({ "success": false, "error": message }));
        Self {
            status: error.http_status(),
            body,
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `error` field of the body, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(|v| v.as_str())
    }

    /// Body rendered as a JSON string.
    pub fn to_json(&self) -> String {
        self.body.to_string()
    }
}
