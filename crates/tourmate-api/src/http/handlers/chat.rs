//! Chat proxy HTTP handler.
//!
//! POST /api/chatbot
//!
//! Validates the turn, forwards it to the backend with enriched settings,
//! and returns the normalized `{ reply, tableData, tableInsights }` shape.
//! Backend failures never surface as transport errors: connection-level
//! failures get the actionable "server not running" reply, everything else
//! the generic one.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::http::error::{CANNOT_CONNECT, INTERNAL_ERROR, json_response};
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatTurnBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Backend language name; defaults to English when absent.
    #[serde(default)]
    pub language: Option<String>,
}

/// POST /api/chatbot - Forward one chat turn to the backend.
pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatTurnBody>) -> Response {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let Some(message) = body.message.as_deref().filter(|m| !m.is_empty()) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Message is required!" }),
        );
    };
    let Some(session_id) = body.session_id.as_deref().filter(|s| !s.is_empty()) else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Session ID is required!" }),
        );
    };

    match state
        .backend
        .send_turn(message, session_id, body.language.as_deref())
        .await
    {
        Ok(turn) => {
            info!(
                request_id = %request_id,
                session_id = %session_id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "chat turn completed"
            );
            json_response(
                StatusCode::OK,
                json!({
                    "reply": turn.reply,
                    "tableData": turn.table_data,
                    "tableInsights": turn.table_insights,
                }),
            )
        }
        Err(err) => {
            error!(request_id = %request_id, session_id = %session_id, error = %err, "chat turn failed");
            let reply = if err.is_unreachable() {
                CANNOT_CONNECT
            } else {
                INTERNAL_ERROR
            };
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "reply": reply }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;
    use tourmate_core::backend::ChatBackend;
    use tourmate_types::chat::{ChatMessage, Row, TurnReply};
    use tourmate_types::config::GatewayConfig;
    use tourmate_types::error::GatewayError;

    struct ScriptedBackend {
        reply: Result<TurnReply, GatewayError>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedBackend {
        fn replying(reply: TurnReply) -> Self {
            Self {
                reply: Ok(reply),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(err: GatewayError) -> Self {
            Self {
                reply: Err(err),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ChatBackend for ScriptedBackend {
        async fn create_session(&self) -> Result<String, GatewayError> {
            unreachable!()
        }

        async fn check_session(&self, _session_id: &str) -> Result<bool, GatewayError> {
            unreachable!()
        }

        async fn chat_history(&self, _session_id: &str) -> Result<Vec<ChatMessage>, GatewayError> {
            unreachable!()
        }

        async fn send_turn(
            &self,
            _message: &str,
            _session_id: &str,
            _language: Option<&str>,
        ) -> Result<TurnReply, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(reply) => Ok(reply.clone()),
                Err(GatewayError::BackendUnavailable(msg)) => {
                    Err(GatewayError::BackendUnavailable(msg.clone()))
                }
                Err(_) => Err(GatewayError::Timeout),
            }
        }
    }

    fn state(backend: ScriptedBackend) -> AppState {
        AppState::with_backend(backend, GatewayConfig::default())
    }

    fn body(message: Option<&str>, session_id: Option<&str>) -> ChatTurnBody {
        ChatTurnBody {
            message: message.map(str::to_string),
            session_id: session_id.map(str::to_string),
            language: None,
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn text_reply(text: &str) -> TurnReply {
        TurnReply {
            reply: text.to_string(),
            table_data: None,
            table_insights: None,
        }
    }

    #[tokio::test]
    async fn test_missing_message_is_400_without_backend_call() {
        let backend = ScriptedBackend::replying(text_reply("hi"));
        let calls = backend.calls.clone();

        let response = chat(State(state(backend)), Json(body(None, Some("abc123")))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Message is required!" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_session_id_is_400_without_backend_call() {
        let backend = ScriptedBackend::replying(text_reply("hi"));
        let calls = backend.calls.clone();

        let response = chat(State(state(backend)), Json(body(Some("hello"), None))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Session ID is required!" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reply_without_table_has_null_fields() {
        let backend = ScriptedBackend::replying(text_reply("Sigiriya is a rock fortress."));

        let response = chat(
            State(state(backend)),
            Json(body(Some("Tell me about Sigiriya"), Some("abc123"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "reply": "Sigiriya is a rock fortress.",
                "tableData": null,
                "tableInsights": null,
            })
        );
    }

    #[tokio::test]
    async fn test_table_payload_passes_through_exactly() {
        let mut row = Row::new();
        row.insert("Hospital".to_string(), Value::String("Kandy General".to_string()));
        row.insert("Contact".to_string(), Value::String("081-2222261".to_string()));
        let backend = ScriptedBackend::replying(TurnReply {
            reply: "Here are hospitals.".to_string(),
            table_data: Some(vec![row.clone()]),
            table_insights: Some("One nearby.".to_string()),
        });

        let response = chat(
            State(state(backend)),
            Json(body(Some("hospitals in Kandy"), Some("abc123"))),
        )
        .await;

        let parsed = body_json(response).await;
        assert_eq!(parsed["tableData"], json!([row]));
        assert_eq!(parsed["tableInsights"], "One nearby.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_gets_cannot_connect_reply() {
        let backend = ScriptedBackend::failing(GatewayError::BackendUnavailable(
            "connection refused".to_string(),
        ));

        let response = chat(
            State(state(backend)),
            Json(body(Some("hello"), Some("abc123"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "reply": CANNOT_CONNECT }));
    }

    #[tokio::test]
    async fn test_other_backend_failures_get_generic_reply() {
        let backend = ScriptedBackend::failing(GatewayError::Timeout);

        let response = chat(
            State(state(backend)),
            Json(body(Some("hello"), Some("abc123"))),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "reply": INTERNAL_ERROR }));
    }
}
