//! Session store trait.
//!
//! Defines the interface for the single persisted session identifier.
//! The durable implementation lives in tourmate-infra; an in-memory
//! implementation is provided here for tests and ephemeral use.

use std::future::Future;
use std::sync::Mutex;

use tourmate_types::error::StoreError;

/// Trait for the client-persisted session identifier.
///
/// Holds at most one opaque string, with no expiry metadata -- validity is
/// delegated entirely to the backend. Uses RPITIT (native async fn in
/// traits, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Read the stored session id. Returns None if nothing is stored.
    fn load(&self) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Store a session id, replacing any previous one.
    fn save(&self, session_id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Discard the stored session id. No-op if nothing is stored.
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-memory session store.
///
/// Holds the id for the lifetime of the process only. Used by tests and by
/// callers that explicitly opt out of persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An in-memory store pre-seeded with a session id.
    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(session_id.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn save(&self, session_id: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = Some(session_id.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
