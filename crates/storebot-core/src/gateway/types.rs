//! Request and response shapes exchanged with the storefront.

use serde::{Deserialize, Serialize};

use crate::intent::{Action, ChatContext, ResponseBundle};

/// An incoming chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<ChatContext>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            session_id: None,
        }
    }

    pub fn with_context(mut self, context: ChatContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The assistant's reply to a [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub timestamp: String,
}

impl ChatResponse {
    /// Wrap a bundle for the wire. An empty suggestion list is omitted.
    pub fn from_bundle(bundle: ResponseBundle, timestamp: String) -> Self {
        let suggestions = if bundle.suggestions.is_empty() {
            None
        } else {
            Some(bundle.suggestions)
        };
        Self {
            response: bundle.response,
            action: bundle.action,
            suggestions,
            timestamp,
        }
    }
}

/// Service banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
}

/// Session counters at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub active_sessions: usize,
    pub total_messages: usize,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use serde_json::json;

    #[test]
    fn test_request_optional_fields() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(request, ChatRequest::new("hi"));

        let json = json!({"message": "cart?", "context": {"cart": [1, 2]}, "session_id": "s1"});
        let request: ChatRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.session_id.as_deref(), Some("s1"));
        assert_eq!(request.context.unwrap().cart_len(), Ok(2));
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let bundle = ResponseBundle::new(Intent::Thanks, "ok");
        let response = ChatResponse::from_bundle(bundle, "2026-01-01T00:00:00.000000".into());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"response": "ok", "timestamp": "2026-01-01T00:00:00.000000"})
        );
    }
}
