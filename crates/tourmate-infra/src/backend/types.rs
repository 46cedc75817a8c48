//! Wire types for the external backend contract.
//!
//! Request/response bodies for the four backend endpoints:
//! `POST /api/start_session`, `GET /chatbot/check_session/{id}`,
//! `GET /chatbot/chat_history/{id}`, `POST /api/chat`.

use serde::{Deserialize, Serialize};

use tourmate_types::chat::{ChatMessage, ChatSettings, Row};

/// `POST /api/start_session` response.
#[derive(Debug, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

/// `GET /chatbot/check_session/{id}` response.
#[derive(Debug, Deserialize)]
pub struct CheckSessionResponse {
    pub valid: bool,
}

/// `GET /chatbot/chat_history/{id}` response.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// `POST /api/chat` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub session_id: String,
    pub settings: ChatSettings,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Local human-readable time, e.g. `2:07:45 PM`.
    pub time: String,
}

/// `POST /api/chat` response body.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub result: Option<ChatResult>,
}

/// The interesting part of a chat response.
#[derive(Debug, Deserialize)]
pub struct ChatResult {
    #[serde(default)]
    pub text_explanation: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub table_insights: Option<String>,
}
