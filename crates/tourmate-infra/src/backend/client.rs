//! HttpBackend -- concrete [`ChatBackend`] implementation for the external
//! AI backend.
//!
//! Speaks the backend's wire contract directly: session minting and
//! validation, history retrieval, and the single chat endpoint. Every
//! transport failure is converted to a [`GatewayError`] at this boundary;
//! nothing above it ever sees a raw reqwest error.

use std::time::Duration;

use tracing::warn;

use tourmate_core::backend::ChatBackend;
use tourmate_types::chat::{ChatMessage, ChatSettings, TurnReply};
use tourmate_types::config::GatewayConfig;
use tourmate_types::error::GatewayError;

use super::transport_error;
use super::types::{
    ChatRequest, ChatResponse, CheckSessionResponse, HistoryResponse, StartSessionResponse,
};

/// Reply text used when the backend omits `text_explanation`.
const NO_RESPONSE: &str = "No response";

/// Client for the external AI backend.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a new backend client from gateway configuration.
    pub fn new(config: &GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Override the base URL (useful for tests pointing at a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the enriched `POST /api/chat` body for one turn.
    ///
    /// The caller-supplied language rides on top of fixed defaults; the
    /// current date and local time travel with every turn so the backend
    /// can answer "today"-relative questions.
    pub(crate) fn build_chat_request(
        message: &str,
        session_id: &str,
        language: Option<&str>,
        now: chrono::DateTime<chrono::Local>,
    ) -> ChatRequest {
        let settings = match language {
            Some(language) => ChatSettings::with_language(language),
            None => ChatSettings::default(),
        };

        ChatRequest {
            question: message.to_string(),
            session_id: session_id.to_string(),
            settings,
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%-I:%M:%S %p").to_string(),
        }
    }
}

impl ChatBackend for HttpBackend {
    async fn create_session(&self) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/start_session"))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "start_session failed");
            return Err(GatewayError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: StartSessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(parsed.session_id)
    }

    async fn check_session(&self, session_id: &str) -> Result<bool, GatewayError> {
        if session_id.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "session id is required".to_string(),
            ));
        }

        let response = self
            .client
            .get(self.url(&format!("/chatbot/check_session/{session_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CheckSessionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(parsed.valid)
    }

    async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatMessage>, GatewayError> {
        if session_id.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "session id is required".to_string(),
            ));
        }

        let response = self
            .client
            .get(self.url(&format!("/chatbot/chat_history/{session_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: HistoryResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(parsed.history)
    }

    async fn send_turn(
        &self,
        message: &str,
        session_id: &str,
        language: Option<&str>,
    ) -> Result<TurnReply, GatewayError> {
        if message.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "message is required".to_string(),
            ));
        }
        if session_id.is_empty() {
            return Err(GatewayError::InvalidArgument(
                "session id is required".to_string(),
            ));
        }

        let body = Self::build_chat_request(message, session_id, language, chrono::Local::now());

        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "chat turn rejected by backend");
            return Err(GatewayError::BackendError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        Ok(extract_turn(parsed))
    }
}

/// Normalize a backend chat response into a [`TurnReply`].
///
/// A missing or empty `text_explanation` becomes the fixed "No response"
/// reply; the table payload passes through untransformed.
fn extract_turn(parsed: ChatResponse) -> TurnReply {
    match parsed.result {
        Some(result) => TurnReply {
            reply: result
                .text_explanation
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NO_RESPONSE.to_string()),
            table_data: result.data,
            table_insights: result.table_insights,
        },
        None => TurnReply {
            reply: NO_RESPONSE.to_string(),
            table_data: None,
            table_insights: None,
        },
    }
}
