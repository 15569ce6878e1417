//! The platform speech-to-text collaborator.

use async_trait::async_trait;

use crate::error::SpeechError;

/// What the platform recognizer currently reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionSnapshot {
    /// Finalized text for the current listening session.
    pub transcript: String,
    /// Partial hypothesis, display only.
    pub interim_transcript: String,
    /// Whether the recognizer is still running.
    pub listening: bool,
    pub browser_supports_speech_recognition: bool,
}

impl RecognitionSnapshot {
    /// A live snapshot with the given final and interim text.
    pub fn live(transcript: impl Into<String>, interim: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            interim_transcript: interim.into(),
            listening: true,
            browser_supports_speech_recognition: true,
        }
    }

    /// Recognition ended on its own with the given final text.
    pub fn ended(transcript: impl Into<String>) -> Self {
        Self {
            listening: false,
            ..Self::live(transcript, "")
        }
    }
}

/// Speech recognizer plus microphone access.
///
/// Implementations own the microphone handle; the session drives them and
/// receives results through `SpeechSession::on_recognition`.
#[async_trait]
pub trait SpeechCapability: Send {
    fn browser_supports_speech_recognition(&self) -> bool;

    /// Whether a media-devices API exists to ask for the microphone at all.
    fn media_devices_available(&self) -> bool {
        true
    }

    /// Ask the user for microphone access. Resolves once they answer.
    async fn request_microphone_permission(&mut self) -> Result<(), SpeechError>;

    fn start_listening(&mut self, continuous: bool) -> Result<(), SpeechError>;

    fn stop_listening(&mut self);

    /// Stop without delivering a final result.
    fn abort_listening(&mut self);
}
