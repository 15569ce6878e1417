//! Terminal stand-in for a speech recognizer.
//!
//! While a listening turn is open, typed lines are treated as recognized
//! speech, so the voice channel can be exercised without a microphone.

use async_trait::async_trait;
use tracing::debug;

use spu_speech::{RecognitionSnapshot, SpeechCapability, SpeechError};

pub struct ConsoleMicrophone {
    available: bool,
    active: bool,
    continuous: bool,
}

impl ConsoleMicrophone {
    /// `available = false` behaves like a browser without speech support.
    pub fn new(available: bool) -> Self {
        Self {
            available,
            active: false,
            continuous: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn one typed line into a recognizer update, appended to what was
    /// already heard this turn. Without continuous mode the recognizer ends
    /// after a single phrase.
    pub fn hear(&self, heard_so_far: &str, line: &str) -> RecognitionSnapshot {
        let transcript = [heard_so_far.trim(), line.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if self.continuous {
            RecognitionSnapshot::live(transcript, "")
        } else {
            RecognitionSnapshot::ended(transcript)
        }
    }
}

#[async_trait]
impl SpeechCapability for ConsoleMicrophone {
    fn browser_supports_speech_recognition(&self) -> bool {
        self.available
    }

    async fn request_microphone_permission(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }

    fn start_listening(&mut self, continuous: bool) -> Result<(), SpeechError> {
        debug!(continuous, "Console microphone on");
        self.active = true;
        self.continuous = continuous;
        Ok(())
    }

    fn stop_listening(&mut self) {
        debug!("Console microphone off");
        self.active = false;
    }

    fn abort_listening(&mut self) {
        debug!("Console microphone aborted");
        self.active = false;
    }
}
