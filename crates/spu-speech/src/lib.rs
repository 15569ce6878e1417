//! Speech-input session for the Spu assistant.
//!
//! Wraps a platform speech-to-text capability in an explicit state machine
//! (Idle, Listening, Error), merges interim and final transcripts into
//! utterances, and publishes session events to subscribers.

pub mod capability;
pub mod commands;
pub mod error;
pub mod session;
pub mod state;

pub use capability::{RecognitionSnapshot, SpeechCapability};
pub use commands::{VoiceCommand, VoiceCommands};
pub use error::SpeechError;
pub use session::{SpeechEvent, SpeechSession};
pub use state::SpeechState;
