//! Error types.
//!
//! The responder can only fail on a malformed context. Everything that goes
//! wrong below the gateway is flattened into [`GatewayError::Internal`], which
//! carries the failure text and maps to a generic failure for the customer.

use serde::Serialize;
use thiserror::Error;

/// Failures raised while building a response bundle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The context object has a shape the responder cannot read.
    #[error("malformed context: {0}")]
    MalformedContext(String),
}

/// Failures surfaced at the gateway boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Any failure while serving a request; carries the failure text.
    #[error("{0}")]
    Internal(String),
}

/// JSON body returned to the client for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl GatewayError {
    /// HTTP-style status code for the transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Internal(_) => 500,
        }
    }

    /// Client-facing error body.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ChatError> for GatewayError {
    fn from(err: ChatError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_converts_to_internal() {
        let err: GatewayError = ChatError::MalformedContext("cart must be a list".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.body().detail, "malformed context: cart must be a list");
    }

    #[test]
    fn test_error_body_serializes_detail() {
        let err = GatewayError::Internal("boom".into());
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(json, serde_json::json!({"detail": "boom"}));
    }
}
