//! GatewayClient -- [`ChatBackend`] implementation over the gateway's own
//! HTTP surface.
//!
//! The terminal chat client goes through this rather than talking to the
//! external backend directly, so the client side exercises the same HTTP
//! contract a browser would. The gateway has already normalized backend
//! failures into its fixed wire shapes; this client surfaces those bodies
//! verbatim inside [`GatewayError::BackendError`].

use std::time::Duration;

use tourmate_core::backend::ChatBackend;
use tourmate_types::chat::{ChatMessage, TurnReply};
use tourmate_types::error::GatewayError;

use crate::backend::transport_error;

use super::types::{
    ChatTurnRequest, ChatTurnResponse, CheckResponse, HistoryResponse, SessionResponse,
};

/// Client for the gateway server (`tourmate serve`).
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a client for a gateway at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ChatBackend for GatewayClient {
    async fn create_session(&self) -> Result<String, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/session"))
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

        let parsed: SessionResponse = response
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
            .get(self.url("/api/session/check"))
            .query(&[("id", session_id)])
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

        let parsed: CheckResponse = response
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
            .get(self.url("/api/session/history"))
            .query(&[("id", session_id)])
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

        let body = ChatTurnRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
            language: language.map(str::to_string),
        };

        let response = self
            .client
            .post(self.url("/api/chatbot"))
            .json(&body)
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

        let parsed: ChatTurnResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        Ok(TurnReply {
            reply: parsed.reply,
            table_data: parsed.table_data,
            table_insights: parsed.table_insights,
        })
    }
}
