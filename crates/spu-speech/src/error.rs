//! Error types for the speech session.

/// User-facing wording for each failure, shown as the session warning.
pub const UNSUPPORTED_MESSAGE: &str =
    "Speech recognition is not supported in this browser. Please use Chrome, Edge, or Safari.";
pub const MEDIA_DEVICES_MESSAGE: &str =
    "MediaDevices API not available in this browser. Please use a modern browser.";
pub const PERMISSION_DENIED_MESSAGE: &str = "Microphone permission denied";
pub const START_FAILED_MESSAGE: &str = "Failed to start speech recognition";

/// Errors from the speech session and its capability.
///
/// Every variant leaves text input usable; they only disable the voice
/// channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech recognition is not supported in this browser. Please use Chrome, Edge, or Safari.")]
    Unsupported,
    #[error("MediaDevices API not available in this browser. Please use a modern browser.")]
    MediaDevicesUnavailable,
    #[error("{0}")]
    PermissionDenied(String),
    #[error("Failed to start speech recognition: {0}")]
    StartFailed(String),
    #[error("voice input unavailable: {0}")]
    Unavailable(String),
    #[error("invalid speech state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}

impl SpeechError {
    /// Human-readable reason stored in `SpeechState::Error`.
    pub fn reason(&self) -> String {
        match self {
            SpeechError::PermissionDenied(msg) if msg.is_empty() => {
                PERMISSION_DENIED_MESSAGE.to_string()
            }
            SpeechError::StartFailed(_) => START_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
