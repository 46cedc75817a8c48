//! Wire types for the gateway-facing contract.
//!
//! These mirror what the gateway server exposes to browser and terminal
//! clients: `GET /api/session`, `GET /api/session/check`,
//! `GET /api/session/history`, `POST /api/chatbot`.

use serde::{Deserialize, Serialize};

use tourmate_types::chat::{ChatMessage, Row};

/// `GET /api/session` response.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
}

/// `GET /api/session/check` response.
#[derive(Debug, Deserialize)]
pub struct CheckResponse {
    pub valid: bool,
}

/// `GET /api/session/history` response.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// `POST /api/chatbot` request body.
#[derive(Debug, Serialize)]
pub struct ChatTurnRequest {
    pub message: String,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// `POST /api/chatbot` response body.
#[derive(Debug, Deserialize)]
pub struct ChatTurnResponse {
    pub reply: String,
    #[serde(default, rename = "tableData")]
    pub table_data: Option<Vec<Row>>,
    #[serde(default, rename = "tableInsights")]
    pub table_insights: Option<String>,
}
