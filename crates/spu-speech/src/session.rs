//! The speech session: one microphone, one listening turn at a time.
//!
//! The session is a cooperative single actor (`&mut self` everywhere). Its
//! only suspension point is the microphone-permission request, and the
//! state does not leave Idle until that request resolves.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use spu_core::config::SpeechConfig;
use spu_core::Utterance;

use crate::capability::{RecognitionSnapshot, SpeechCapability};
use crate::commands::VoiceCommands;
use crate::error::SpeechError;
use crate::state::SpeechState;

/// Capacity of the event channel. Slow subscribers lag rather than block.
const EVENT_CAPACITY: usize = 64;

/// Notifications published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    StateChanged { from: SpeechState, to: SpeechState },
    /// Display-only transcript update while listening.
    Interim { transcript: String, interim: String },
    /// A finished voice turn, ready for the chat pipeline.
    Utterance(Utterance),
    /// Voice input was disabled. Text input remains available.
    Warning(String),
}

// =============================================================================
// SpeechSession
// =============================================================================

pub struct SpeechSession<C: SpeechCapability> {
    capability: C,
    state: SpeechState,
    continuous: bool,
    initialized: bool,
    final_transcript: String,
    interim_transcript: String,
    commands: VoiceCommands,
    events: broadcast::Sender<SpeechEvent>,
}

impl<C: SpeechCapability> SpeechSession<C> {
    pub fn new(capability: C, config: &SpeechConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let commands = if config.voice_commands {
            VoiceCommands::builtin()
        } else {
            VoiceCommands::none()
        };
        Self {
            capability,
            state: SpeechState::Idle,
            continuous: config.continuous,
            initialized: false,
            final_transcript: String::new(),
            interim_transcript: String::new(),
            commands,
            events,
        }
    }

    pub fn with_commands(mut self, commands: VoiceCommands) -> Self {
        self.commands = commands;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SpeechEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> &SpeechState {
        &self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    /// Visible, non-blocking warning while voice input is disabled.
    pub fn warning(&self) -> Option<&str> {
        self.state.error_reason()
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Finalized text of the current listening turn.
    pub fn transcript(&self) -> &str {
        &self.final_transcript
    }

    pub fn interim(&self) -> &str {
        &self.interim_transcript
    }

    /// Check browser support and microphone permission.
    ///
    /// Runs at most once per Idle period; the first `start()` calls it when
    /// the front end has not. Failure moves the session to Error.
    pub async fn initialize(&mut self) -> Result<(), SpeechError> {
        if let SpeechState::Error(reason) = &self.state {
            return Err(SpeechError::Unavailable(reason.clone()));
        }
        if self.initialized {
            return Ok(());
        }

        if !self.capability.browser_supports_speech_recognition() {
            return Err(self.fail(SpeechError::Unsupported));
        }
        if !self.capability.media_devices_available() {
            return Err(self.fail(SpeechError::MediaDevicesUnavailable));
        }

        debug!("Requesting microphone permission");
        if let Err(e) = self.capability.request_microphone_permission().await {
            return Err(self.fail(e));
        }

        self.initialized = true;
        info!("Speech input ready");
        Ok(())
    }

    /// Begin a listening turn.
    ///
    /// Ignored while already listening, so the transcript is not reset and
    /// no second recognizer is started.
    pub async fn start(&mut self) -> Result<(), SpeechError> {
        match &self.state {
            SpeechState::Listening => {
                debug!("Already listening, start ignored");
                return Ok(());
            }
            SpeechState::Error(reason) => {
                return Err(SpeechError::Unavailable(reason.clone()));
            }
            SpeechState::Idle => {}
        }

        self.initialize().await?;

        self.final_transcript.clear();
        self.interim_transcript.clear();
        if let Err(e) = self.capability.start_listening(self.continuous) {
            let detail = e.to_string();
            return Err(self.fail(SpeechError::StartFailed(detail)));
        }
        self.transition(SpeechState::Listening)?;
        Ok(())
    }

    /// End the listening turn and emit what was heard.
    ///
    /// No-op returning `None` unless listening. An empty merged transcript
    /// returns to Idle without producing an utterance.
    pub fn stop(&mut self) -> Result<Option<Utterance>, SpeechError> {
        if !self.state.is_listening() {
            return Ok(None);
        }
        self.capability.stop_listening();
        self.finish_turn()
    }

    /// Abandon the listening turn without emitting anything.
    pub fn abort(&mut self) -> Result<(), SpeechError> {
        if !self.state.is_listening() {
            return Ok(());
        }
        self.capability.abort_listening();
        self.final_transcript.clear();
        self.interim_transcript.clear();
        self.transition(SpeechState::Idle)
    }

    /// Leave Error and re-arm the capability check for the next start.
    pub fn clear_error(&mut self) -> Result<(), SpeechError> {
        if self.state.error_reason().is_none() {
            return Ok(());
        }
        self.initialized = false;
        self.transition(SpeechState::Idle)
    }

    /// Feed a recognizer update into the session.
    ///
    /// Interim text only updates display state. A snapshot that reports
    /// recognition has ended finalizes the turn exactly like `stop()`.
    pub fn on_recognition(
        &mut self,
        snapshot: RecognitionSnapshot,
    ) -> Result<Option<Utterance>, SpeechError> {
        if !snapshot.browser_supports_speech_recognition {
            if self.state.error_reason().is_none() {
                if self.state.is_listening() {
                    self.capability.abort_listening();
                }
                self.fail(SpeechError::Unsupported);
            }
            return Ok(None);
        }
        if !self.state.is_listening() {
            debug!("Recognition update outside a listening turn ignored");
            return Ok(None);
        }

        self.final_transcript = snapshot.transcript;
        self.interim_transcript = snapshot.interim_transcript;
        self.publish(SpeechEvent::Interim {
            transcript: self.final_transcript.clone(),
            interim: self.interim_transcript.clone(),
        });

        if snapshot.listening {
            Ok(None)
        } else {
            debug!("Recognition ended on its own");
            self.finish_turn()
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn finish_turn(&mut self) -> Result<Option<Utterance>, SpeechError> {
        let merged = merge_transcripts(&self.final_transcript, &self.interim_transcript);
        self.final_transcript.clear();
        self.interim_transcript.clear();
        self.transition(SpeechState::Idle)?;

        if merged.is_empty() {
            debug!("Listening turn ended with no speech");
            return Ok(None);
        }

        let text = match self.commands.resolve(&merged) {
            Some(query) => {
                debug!(command = query, "Voice command matched");
                query.to_string()
            }
            None => merged,
        };
        let utterance = Utterance::spoken(text);
        self.publish(SpeechEvent::Utterance(utterance.clone()));
        Ok(Some(utterance))
    }

    /// Move to Error with the failure's reason and return the failure.
    fn fail(&mut self, err: SpeechError) -> SpeechError {
        let reason = err.reason();
        warn!(reason = %reason, "Voice input disabled");
        self.initialized = false;
        self.final_transcript.clear();
        self.interim_transcript.clear();
        match self.transition(SpeechState::Error(reason.clone())) {
            Ok(()) => self.publish(SpeechEvent::Warning(reason)),
            Err(e) => warn!(error = %e, "Speech error while already disabled"),
        }
        err
    }

    fn transition(&mut self, target: SpeechState) -> Result<(), SpeechError> {
        let from = self.state.transition(target)?;
        let to = self.state.clone();
        self.publish(SpeechEvent::StateChanged { from, to });
        Ok(())
    }

    fn publish(&self, event: SpeechEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Final text followed by any pending interim words.
fn merge_transcripts(final_text: &str, interim: &str) -> String {
    [final_text.trim(), interim.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_transcripts() {
        assert_eq!(merge_transcripts("what services", "do you offer"), "what services do you offer");
        assert_eq!(merge_transcripts("  contact ", ""), "contact");
        assert_eq!(merge_transcripts("", " revenue "), "revenue");
        assert_eq!(merge_transcripts(" ", ""), "");
    }
}
