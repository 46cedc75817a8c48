//! One-shot session resolution.
//!
//! On startup the chat client must end up holding a backend-validated
//! session id: reuse the persisted one if the backend still accepts it,
//! otherwise discard it and mint a fresh one. `SessionController` runs that
//! resolution exactly once per instance and then stays in its terminal
//! phase; losing the session later is not detected here -- it surfaces as a
//! backend error on the next chat turn.

use tracing::{debug, warn};

use tourmate_types::chat::ChatMessage;

use crate::backend::ChatBackend;
use crate::session::store::SessionStore;

/// Resolution phase of the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// `resolve` has not been called yet.
    Uninitialized,
    /// Resolution is in progress.
    Resolving,
    /// Terminal success: a valid session id is held.
    Ready { session_id: String },
    /// Terminal failure: no session could be obtained. Not retried
    /// automatically; the surrounding UI decides what to do.
    Failed,
}

/// Resolves and holds the session for one client instance.
///
/// The store is an injected capability (get/set/clear) rather than global
/// state, so tests substitute an in-memory store.
pub struct SessionController<B, S> {
    backend: B,
    store: S,
    phase: SessionPhase,
    history: Vec<ChatMessage>,
}

impl<B: ChatBackend, S: SessionStore> SessionController<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            phase: SessionPhase::Uninitialized,
            history: Vec::new(),
        }
    }

    /// Current resolution phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// The resolved session id, if resolution succeeded.
    pub fn session_id(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Ready { session_id } => Some(session_id),
            _ => None,
        }
    }

    /// History replayed from the backend during resolution.
    ///
    /// Empty if there was none or if the (best-effort) history load failed.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Take ownership of the replayed history, leaving it empty.
    pub fn take_history(&mut self) -> Vec<ChatMessage> {
        std::mem::take(&mut self.history)
    }

    /// Run the one-shot resolution.
    ///
    /// Subsequent calls are no-ops returning the already-reached terminal
    /// phase. A stored id that the backend rejects -- or that cannot be
    /// checked at all -- is discarded and replaced via `create_session`;
    /// only a failed creation leaves the controller `Failed`.
    pub async fn resolve(&mut self) -> &SessionPhase {
        if self.phase != SessionPhase::Uninitialized {
            return &self.phase;
        }
        self.phase = SessionPhase::Resolving;

        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "failed to read persisted session id");
                None
            }
        };

        if let Some(id) = stored {
            match self.backend.check_session(&id).await {
                Ok(true) => {
                    debug!(session_id = %id, "reusing persisted session");
                    self.phase = SessionPhase::Ready { session_id: id };
                    self.load_history().await;
                    return &self.phase;
                }
                Ok(false) => {
                    debug!(session_id = %id, "persisted session no longer valid");
                }
                Err(err) => {
                    warn!(error = %err, "session check failed, treating as invalid");
                }
            }
            if let Err(err) = self.store.clear().await {
                warn!(error = %err, "failed to discard stale session id");
            }
        }

        match self.backend.create_session().await {
            Ok(id) => {
                if let Err(err) = self.store.save(&id).await {
                    warn!(error = %err, "failed to persist new session id");
                }
                debug!(session_id = %id, "created new session");
                self.phase = SessionPhase::Ready { session_id: id };
            }
            Err(err) => {
                warn!(error = %err, "session creation failed");
                self.phase = SessionPhase::Failed;
            }
        }
        &self.phase
    }

    /// Best-effort history load for a freshly reused session.
    ///
    /// Failure leaves the transcript empty and never reverts `Ready`.
    async fn load_history(&mut self) {
        let Some(id) = self.session_id().map(str::to_string) else {
            return;
        };
        match self.backend.chat_history(&id).await {
            Ok(history) => self.history = history,
            Err(err) => {
                warn!(error = %err, "history load failed, starting with empty transcript");
            }
        }
    }
}
