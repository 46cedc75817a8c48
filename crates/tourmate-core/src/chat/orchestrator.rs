//! Chat turn orchestration.
//!
//! `ChatOrchestrator` owns the transcript for one client instance and drives
//! each turn: the user message is appended before the network call starts,
//! the bot reply strictly after it resolves. Every failure kind collapses
//! into one fixed apology message in the transcript; diagnostic detail goes
//! to the log, never to the user.
//!
//! Turns are strictly FIFO: `submit_turn` borrows the orchestrator mutably,
//! so a second turn cannot start while one is in flight.

use tracing::warn;

use tourmate_types::chat::ChatMessage;

use crate::backend::ChatBackend;

/// Fixed user-safe reply appended when a turn fails for any reason.
pub const APOLOGY: &str = "Sorry, I couldn't process your request.";

/// What a call to [`ChatOrchestrator::submit_turn`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input or no valid session: nothing happened at all.
    Ignored,
    /// The backend replied and the reply was appended.
    Replied,
    /// The turn failed; the apology was appended instead.
    Apologized,
}

/// Owns the message list and sends user turns through the gateway.
///
/// Each turn is independent; conversation memory lives in the backend,
/// keyed by the session id.
pub struct ChatOrchestrator<B> {
    backend: B,
    session_id: Option<String>,
    language: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl<B: ChatBackend> ChatOrchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session_id: None,
            language: None,
            transcript: Vec::new(),
        }
    }

    /// Set the per-turn language override (backend name, e.g. "Japanese").
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    /// Bind a resolved session and seed the transcript with replayed history.
    pub fn bind_session(&mut self, session_id: impl Into<String>, history: Vec<ChatMessage>) {
        self.session_id = Some(session_id.into());
        self.transcript.extend(history);
    }

    /// Append a message without a network round trip (welcome banner,
    /// system notices).
    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    /// The transcript so far, in insertion order.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// The bound session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Submit one user turn.
    ///
    /// Blank or whitespace-only input, or a missing session, is a complete
    /// no-op: no network call, no transcript mutation. Otherwise the user
    /// message is appended immediately, then the gateway is called; the
    /// reply (table payload passed through untransformed) or the fixed
    /// apology is appended when the call resolves.
    pub async fn submit_turn(&mut self, text: &str) -> TurnOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return TurnOutcome::Ignored;
        }
        let Some(session_id) = self.session_id.clone() else {
            return TurnOutcome::Ignored;
        };

        self.transcript
            .push(ChatMessage::user(trimmed, now_display()));

        match self
            .backend
            .send_turn(trimmed, &session_id, self.language.as_deref())
            .await
        {
            Ok(reply) => {
                self.transcript.push(
                    ChatMessage::bot(reply.reply, now_display())
                        .with_table(reply.table_data, reply.table_insights),
                );
                TurnOutcome::Replied
            }
            Err(err) => {
                warn!(error = %err, "chat turn failed");
                self.transcript.push(ChatMessage::bot(APOLOGY, now_display()));
                TurnOutcome::Apologized
            }
        }
    }
}

/// Display-formatted time of day for transcript stamps.
fn now_display() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
