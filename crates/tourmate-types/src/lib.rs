//! Shared domain types for TourMate.
//!
//! This crate contains the types used across the TourMate gateway and chat
//! client: chat messages, per-turn settings, table payloads, and the gateway
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod language;
pub mod table;
