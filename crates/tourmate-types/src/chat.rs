//! Chat message and per-turn settings types for TourMate.
//!
//! These types model one conversation between a traveler and the assistant:
//! transcript messages (with optional tabular payloads) and the per-turn
//! settings forwarded to the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::fmt;
use std::str::FromStr;

/// A single table row: column name to cell value.
///
/// Rows are heterogeneous (shape depends on the query kind) and display-only;
/// cells are strings, numbers, or URL-strings and are never validated beyond
/// presence.
pub type Row = serde_json::Map<String, Value>;

/// Who authored a transcript message.
///
/// Serialized lowercase (`"user"` / `"bot"`), matching the wire format the
/// backend uses in chat history payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message in the transcript.
///
/// The transcript is an append-only ordered sequence for the lifetime of one
/// chat client instance; it is not persisted locally (history replay at
/// startup comes from the backend, keyed by session id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Display-formatted time of day (`HH:MM`), not a machine timestamp.
    #[serde(default)]
    pub timestamp: String,
    /// Tabular payload attached to a bot reply, if any.
    #[serde(default, rename = "tableData", skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<Row>>,
    /// Narrative insights accompanying `table_data`.
    #[serde(default, rename = "tableInsights", skip_serializing_if = "Option::is_none")]
    pub table_insights: Option<String>,
}

impl ChatMessage {
    /// Build a user message stamped with the given display time.
    pub fn user(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: timestamp.into(),
            table_data: None,
            table_insights: None,
        }
    }

    /// Build a bot message stamped with the given display time.
    pub fn bot(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: timestamp.into(),
            table_data: None,
            table_insights: None,
        }
    }

    /// Attach a tabular payload to this message.
    pub fn with_table(mut self, data: Option<Vec<Row>>, insights: Option<String>) -> Self {
        self.table_data = data;
        self.table_insights = insights;
        self
    }
}

/// Per-turn conversational settings forwarded to the backend.
///
/// Constructed fresh for every turn. The language is the only field the
/// client controls; the rest are fixed product defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub language: String,
    pub politeness_level: String,
    pub formality: String,
    pub creativity: f64,
    pub response_length: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            politeness_level: "Friendly".to_string(),
            formality: "Casual".to_string(),
            creativity: 0.7,
            response_length: "Medium".to_string(),
        }
    }
}

impl ChatSettings {
    /// Default settings with the language overridden.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }
}

/// Normalized result of one chat turn.
///
/// The table payload is passed through from the backend untransformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReply {
    pub reply: String,
    #[serde(default)]
    pub table_data: Option<Vec<Row>>,
    #[serde(default)]
    pub table_insights: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_serde_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
        let parsed: Sender = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Sender::User);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = ChatSettings::default();
        assert_eq!(settings.language, "English");
        assert_eq!(settings.politeness_level, "Friendly");
        assert_eq!(settings.formality, "Casual");
        assert_eq!(settings.creativity, 0.7);
        assert_eq!(settings.response_length, "Medium");
    }

    #[test]
    fn test_settings_language_override_keeps_defaults() {
        let settings = ChatSettings::with_language("Japanese");
        assert_eq!(settings.language, "Japanese");
        assert_eq!(settings.politeness_level, "Friendly");
        assert_eq!(settings.creativity, 0.7);
    }

    #[test]
    fn test_chat_message_history_deserialize() {
        // Shape the backend returns from the chat history endpoint.
        let json = r#"{"sender": "bot", "text": "Welcome back", "timestamp": "10:42"}"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, "Welcome back");
        assert!(msg.table_data.is_none());
    }

    #[test]
    fn test_chat_message_with_table() {
        let mut row = Row::new();
        row.insert("Place".to_string(), Value::String("Sigiriya".to_string()));
        let msg = ChatMessage::bot("Here are some places.", "09:00")
            .with_table(Some(vec![row]), Some("One entry.".to_string()));
        assert_eq!(msg.table_data.as_ref().unwrap().len(), 1);
        assert_eq!(msg.table_insights.as_deref(), Some("One entry."));
    }
}
