use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who produced a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The front end an utterance arrived through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputChannel {
    /// Typed into the text entry box.
    Text,
    /// Transcribed from the microphone.
    Voice,
}

// =============================================================================
// Newtype Wrappers - Identity
// =============================================================================

/// Unique identifier for a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Utterance
// =============================================================================

/// One raw user input, spoken or typed, prior to classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub channel: InputChannel,
}

impl Utterance {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: InputChannel::Text,
        }
    }

    pub fn spoken(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            channel: InputChannel::Voice,
        }
    }

    /// The case-folded, whitespace-collapsed form used for classification.
    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }
}

/// Lower-case the input, collapse runs of whitespace to one space, and trim.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// ConversationTurn
// =============================================================================

/// One entry in the conversation log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,
    /// Whether the content came back from the language model rather than
    /// the local rule table. Always false for user turns.
    pub enhanced: bool,
    /// Epoch seconds.
    pub created_at: i64,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into(), false)
    }

    pub fn assistant(content: impl Into<String>, enhanced: bool) -> Self {
        Self::new(Role::Assistant, content.into(), enhanced)
    }

    fn new(role: Role, content: String, enhanced: bool) -> Self {
        Self {
            id: TurnId::new(),
            role,
            content,
            enhanced,
            created_at: Utc::now().timestamp(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
