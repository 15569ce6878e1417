//! Speech session states and the transitions allowed between them.
//!
//! - Idle -> Listening (user starts listening)
//! - Listening -> Idle (user stops, recognition ends, or abort)
//! - Idle -> Error, Listening -> Error (unsupported browser, denied permission)
//! - Error -> Idle (error cleared, capability re-checked on next start)

use std::fmt;

use crate::error::SpeechError;

/// Operational state of the voice channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SpeechState {
    /// Not listening. Ready to start.
    #[default]
    Idle,
    /// Microphone open, transcript accumulating.
    Listening,
    /// Voice disabled with a human-readable reason. Text input unaffected.
    Error(String),
}

impl fmt::Display for SpeechState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechState::Idle => write!(f, "Idle"),
            SpeechState::Listening => write!(f, "Listening"),
            SpeechState::Error(reason) => write!(f, "Error({})", reason),
        }
    }
}

impl SpeechState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SpeechState) -> bool {
        matches!(
            (self, target),
            (SpeechState::Idle, SpeechState::Listening)
                | (SpeechState::Listening, SpeechState::Idle)
                | (SpeechState::Idle, SpeechState::Error(_))
                | (SpeechState::Listening, SpeechState::Error(_))
                | (SpeechState::Error(_), SpeechState::Idle)
        )
    }

    /// Validate and apply a transition, returning the previous state.
    pub fn transition(&mut self, target: SpeechState) -> Result<SpeechState, SpeechError> {
        if self.can_transition_to(&target) {
            tracing::debug!("Speech state: {} -> {}", self, target);
            Ok(std::mem::replace(self, target))
        } else {
            Err(SpeechError::InvalidTransition {
                from: self.to_string(),
                to: target.to_string(),
            })
        }
    }

    pub fn is_listening(&self) -> bool {
        matches!(self, SpeechState::Listening)
    }

    /// The error reason, if voice input is currently disabled.
    pub fn error_reason(&self) -> Option<&str> {
        match self {
            SpeechState::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
