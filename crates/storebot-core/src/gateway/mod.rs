//! Chat gateway: the boundary between transports and the responder.
//!
//! A transport (CLI, JSON pipe, web server) hands the gateway a
//! [`ChatRequest`]. The gateway runs the stateless [`Responder`], stamps the
//! reply, and appends the exchange to the injected [`SessionStore`] when the
//! request carries a session id. Any failure below this point is logged and
//! surfaced as [`GatewayError::Internal`].

pub mod types;

use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::error::GatewayError;
use crate::intent::Responder;
use crate::recommend::{
    NoRecommendations, RecommendationProvider, RecommendationRequest, RecommendationResponse,
};
use crate::session::{InMemorySessionStore, SessionEntry, SessionStore};
pub use types::{ChatRequest, ChatResponse, HealthReport, ServiceInfo, StatsReport};

/// Local time in ISO-8601 without an offset, microsecond precision.
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Wires the responder to session logging and recommendations.
pub struct ChatGateway {
    sessions: Arc<dyn SessionStore>,
    recommender: Arc<dyn RecommendationProvider>,
    service_name: String,
    service_version: String,
    log_sessions: bool,
    default_limit: usize,
}

impl ChatGateway {
    pub fn new(
        config: &Config,
        sessions: Arc<dyn SessionStore>,
        recommender: Arc<dyn RecommendationProvider>,
    ) -> Self {
        Self {
            sessions,
            recommender,
            service_name: config.service.name.clone(),
            service_version: config.service.version.clone(),
            log_sessions: config.sessions.enabled,
            default_limit: config.recommendations.default_limit,
        }
    }

    /// Gateway with an in-memory session store and no recommendations.
    pub fn in_memory(config: &Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemorySessionStore::new()),
            Arc::new(NoRecommendations),
        )
    }

    /// Keys of every session with at least one logged exchange.
    pub async fn session_keys(&self) -> Vec<String> {
        self.sessions.keys().await
    }

    /// Answer a chat message.
    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatResponse, GatewayError> {
        self.process_chat(request).await.map_err(|e| {
            error!("Chat request failed: {:#}", e);
            GatewayError::from(e)
        })
    }

    async fn process_chat(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        let bundle = Responder::respond(&request.message, request.context.as_ref())?;

        info!(
            intent = bundle.intent.as_str(),
            session = request.session_id.as_deref().unwrap_or("-"),
            "Chat message handled"
        );

        let timestamp = now_timestamp();

        if self.log_sessions {
            // An empty id counts as no session.
            if let Some(session_id) = request.session_id.as_deref().filter(|id| !id.is_empty()) {
                let entry = SessionEntry::new(
                    request.message.as_str(),
                    bundle.response.as_str(),
                    timestamp.as_str(),
                );
                self.sessions.append(session_id, entry).await?;
            }
        }

        Ok(ChatResponse::from_bundle(bundle, timestamp))
    }

    /// Product recommendations, truncated to the requested limit.
    pub async fn recommendations(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, GatewayError> {
        let limit = request.limit.unwrap_or(self.default_limit);
        match self.recommender.recommend(&request).await {
            Ok(mut items) => {
                items.truncate(limit);
                info!(
                    provider = self.recommender.name(),
                    count = items.len(),
                    "Recommendations served"
                );
                Ok(RecommendationResponse::new(items))
            }
            Err(e) => {
                error!(provider = self.recommender.name(), "Recommendation failed: {:#}", e);
                Err(GatewayError::from(e))
            }
        }
    }

    /// Logged exchanges for one session, oldest first.
    pub async fn history(&self, session_id: &str) -> Vec<SessionEntry> {
        self.sessions.history(session_id).await
    }

    pub async fn stats(&self) -> StatsReport {
        let stats = self.sessions.stats().await;
        StatsReport {
            active_sessions: stats.active_sessions,
            total_messages: stats.total_messages,
            timestamp: now_timestamp(),
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".into(),
            timestamp: now_timestamp(),
        }
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            message: format!("{} API", self.service_name),
            version: self.service_version.clone(),
            status: "active".into(),
        }
    }
}
