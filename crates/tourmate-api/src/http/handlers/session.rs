//! Session proxy HTTP handlers.
//!
//! Endpoints:
//! - GET /api/session          - Mint a new session id
//! - GET /api/session/check    - Check validity of a session id
//! - GET /api/session/history  - Fetch chat history for a session id
//!
//! Every endpoint returns its fixed wire shape regardless of how the
//! backend failed; missing-id requests are rejected with 400 before any
//! backend call.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::http::error::{CANNOT_CONNECT, INTERNAL_ERROR, json_response};
use crate::state::AppState;

/// Query parameters for the check and history endpoints.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl IdQuery {
    /// The session id, treating an empty string the same as absent.
    fn session_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// GET /api/session - Mint a new session id at the backend.
pub async fn create_session(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    match state.backend.create_session().await {
        Ok(session_id) => {
            info!(
                request_id = %request_id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "session created"
            );
            json_response(StatusCode::OK, json!({ "session_id": session_id }))
        }
        Err(err) => {
            error!(request_id = %request_id, error = %err, "session creation failed");
            let message = if err.is_unreachable() {
                CANNOT_CONNECT
            } else {
                INTERNAL_ERROR
            };
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message }),
            )
        }
    }
}

/// GET /api/session/check?id=<id> - Check a session id against the backend.
///
/// The backend's verdict passes through unchanged; a missing id or a
/// backend failure both read as not-valid to the caller.
pub async fn check_session(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Response {
    let request_id = Uuid::now_v7().to_string();

    let Some(id) = query.session_id() else {
        return json_response(StatusCode::BAD_REQUEST, json!({ "valid": false }));
    };

    match state.backend.check_session(id).await {
        Ok(valid) => json_response(StatusCode::OK, json!({ "valid": valid })),
        Err(err) => {
            error!(request_id = %request_id, error = %err, "session check failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "valid": false }),
            )
        }
    }
}

/// GET /api/session/history?id=<id> - Fetch chat history for a session.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Response {
    let request_id = Uuid::now_v7().to_string();

    let Some(id) = query.session_id() else {
        return json_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Session ID required" }),
        );
    };

    match state.backend.chat_history(id).await {
        Ok(history) => json_response(StatusCode::OK, json!({ "history": history })),
        Err(err) => {
            error!(request_id = %request_id, error = %err, "history fetch failed");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch chat history" }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tourmate_core::backend::ChatBackend;
    use tourmate_types::chat::{ChatMessage, TurnReply};
    use tourmate_types::config::GatewayConfig;
    use tourmate_types::error::GatewayError;

    /// Backend stub that records whether it was called at all.
    ///
    /// The call counter is shared so tests can still read it after the
    /// backend disappears behind `BoxBackend`.
    #[derive(Default)]
    struct ScriptedBackend {
        unreachable: bool,
        valid: bool,
        calls: Arc<AtomicUsize>,
    }

    impl ChatBackend for ScriptedBackend {
        async fn create_session(&self) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreachable {
                Err(GatewayError::BackendUnavailable("refused".to_string()))
            } else {
                Ok("abc123".to_string())
            }
        }

        async fn check_session(&self, _session_id: &str) -> Result<bool, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.valid)
        }

        async fn chat_history(&self, _session_id: &str) -> Result<Vec<ChatMessage>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ChatMessage::bot("hello again", "10:00")])
        }

        async fn send_turn(
            &self,
            _message: &str,
            _session_id: &str,
            _language: Option<&str>,
        ) -> Result<TurnReply, GatewayError> {
            unreachable!("session handlers never send turns")
        }
    }

    fn state(backend: ScriptedBackend) -> AppState {
        AppState::with_backend(backend, GatewayConfig::default())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_session_returns_backend_id() {
        let response = create_session(State(state(ScriptedBackend::default()))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "session_id": "abc123" }));
    }

    #[tokio::test]
    async fn test_create_session_unreachable_backend_is_500_with_message() {
        let backend = ScriptedBackend {
            unreachable: true,
            ..Default::default()
        };
        let response = create_session(State(state(backend))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], CANNOT_CONNECT);
    }

    #[tokio::test]
    async fn test_check_missing_id_is_400_without_backend_call() {
        let backend = ScriptedBackend::default();
        let calls = backend.calls.clone();

        let response =
            check_session(State(state(backend)), Query(IdQuery { id: None })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "valid": false }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Empty string counts as missing too.
        let backend = ScriptedBackend::default();
        let calls = backend.calls.clone();
        let response = check_session(
            State(state(backend)),
            Query(IdQuery {
                id: Some(String::new()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_check_passes_backend_verdict_through() {
        let backend = ScriptedBackend {
            valid: false,
            ..Default::default()
        };
        let response = check_session(
            State(state(backend)),
            Query(IdQuery {
                id: Some("abc123".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "valid": false }));
    }

    #[tokio::test]
    async fn test_history_missing_id_is_400_without_backend_call() {
        let backend = ScriptedBackend::default();
        let calls = backend.calls.clone();
        let response = get_history(State(state(backend)), Query(IdQuery { id: None })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Session ID required" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_history_is_wrapped_in_history_key() {
        let response = get_history(
            State(state(ScriptedBackend::default())),
            Query(IdQuery {
                id: Some("abc123".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["history"][0]["text"], "hello again");
    }
}
