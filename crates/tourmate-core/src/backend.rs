//! ChatBackend trait definition and its object-safe boxed wrapper.
//!
//! `ChatBackend` is the port through which everything in this crate talks to
//! the outside world: the four normalized operations of the session and chat
//! proxy contract. Implementations live in tourmate-infra (`HttpBackend`
//! speaks the external backend's wire contract directly; `GatewayClient`
//! speaks our own gateway's HTTP surface).

use std::future::Future;
use std::pin::Pin;

use tourmate_types::chat::{ChatMessage, TurnReply};
use tourmate_types::error::GatewayError;

/// The normalized session + chat operations (the proxy contract).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). All
/// operations return a stable shape regardless of how the backend failed:
/// transport errors surface as `GatewayError` variants, never as raw
/// transport exceptions.
///
/// Precondition violations (empty message or session id) must be raised as
/// [`GatewayError::InvalidArgument`] *before* any network call is made.
pub trait ChatBackend: Send + Sync {
    /// Mint a new session identifier.
    fn create_session(
        &self,
    ) -> impl Future<Output = Result<String, GatewayError>> + Send;

    /// Ask whether a session id is still valid.
    fn check_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<bool, GatewayError>> + Send;

    /// Fetch prior conversation history for a session.
    ///
    /// A session with no history yields an empty sequence, not an error.
    fn chat_history(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, GatewayError>> + Send;

    /// Submit one chat turn and receive the normalized reply.
    ///
    /// `language` overrides the default language for this turn only; all
    /// other settings are fixed defaults.
    fn send_turn(
        &self,
        message: &str,
        session_id: &str,
        language: Option<&str>,
    ) -> impl Future<Output = Result<TurnReply, GatewayError>> + Send;
}

/// Object-safe version of [`ChatBackend`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn ChatBackendDyn`).
/// A blanket implementation is provided for all types implementing
/// `ChatBackend`.
pub trait ChatBackendDyn: Send + Sync {
    fn create_session_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>>;

    fn check_session_boxed<'a>(
        &'a self,
        session_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, GatewayError>> + Send + 'a>>;

    fn chat_history_boxed<'a>(
        &'a self,
        session_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ChatMessage>, GatewayError>> + Send + 'a>>;

    fn send_turn_boxed<'a>(
        &'a self,
        message: &'a str,
        session_id: &'a str,
        language: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TurnReply, GatewayError>> + Send + 'a>>;
}

/// Blanket implementation: any `ChatBackend` automatically implements
/// `ChatBackendDyn`.
impl<T: ChatBackend> ChatBackendDyn for T {
    fn create_session_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<String, GatewayError>> + Send + 'a>> {
        Box::pin(self.create_session())
    }

    fn check_session_boxed<'a>(
        &'a self,
        session_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, GatewayError>> + Send + 'a>> {
        Box::pin(self.check_session(session_id))
    }

    fn chat_history_boxed<'a>(
        &'a self,
        session_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ChatMessage>, GatewayError>> + Send + 'a>> {
        Box::pin(self.chat_history(session_id))
    }

    fn send_turn_boxed<'a>(
        &'a self,
        message: &'a str,
        session_id: &'a str,
        language: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TurnReply, GatewayError>> + Send + 'a>> {
        Box::pin(self.send_turn(message, session_id, language))
    }
}

/// Type-erased backend for runtime selection.
///
/// Since `ChatBackend` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxBackend` provides equivalent methods that delegate to the
/// inner `ChatBackendDyn` trait object, letting `AppState` and tests hold an
/// `Arc<BoxBackend>` without caring which implementation is behind it.
pub struct BoxBackend {
    inner: Box<dyn ChatBackendDyn + Send + Sync>,
}

impl BoxBackend {
    /// Wrap a concrete `ChatBackend` in a type-erased box.
    pub fn new<T: ChatBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    /// Mint a new session identifier.
    pub async fn create_session(&self) -> Result<String, GatewayError> {
        self.inner.create_session_boxed().await
    }

    /// Ask whether a session id is still valid.
    pub async fn check_session(&self, session_id: &str) -> Result<bool, GatewayError> {
        self.inner.check_session_boxed(session_id).await
    }

    /// Fetch prior conversation history for a session.
    pub async fn chat_history(
        &self,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, GatewayError> {
        self.inner.chat_history_boxed(session_id).await
    }

    /// Submit one chat turn and receive the normalized reply.
    pub async fn send_turn(
        &self,
        message: &str,
        session_id: &str,
        language: Option<&str>,
    ) -> Result<TurnReply, GatewayError> {
        self.inner.send_turn_boxed(message, session_id, language).await
    }
}
