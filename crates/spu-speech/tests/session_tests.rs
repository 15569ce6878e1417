//! Speech session behavior against a scripted capability.

use async_trait::async_trait;
use tokio::sync::broadcast::error::TryRecvError;

use spu_core::config::SpeechConfig;
use spu_core::InputChannel;
use spu_speech::{
    RecognitionSnapshot, SpeechCapability, SpeechError, SpeechEvent, SpeechSession, SpeechState,
    VoiceCommands,
};

#[derive(Default)]
struct FakeMicrophone {
    unsupported: bool,
    no_media_devices: bool,
    deny: Option<String>,
    fail_start: bool,
    permission_requests: usize,
    starts: Vec<bool>,
    stops: usize,
    aborts: usize,
}

#[async_trait]
impl SpeechCapability for FakeMicrophone {
    fn browser_supports_speech_recognition(&self) -> bool {
        !self.unsupported
    }

    fn media_devices_available(&self) -> bool {
        !self.no_media_devices
    }

    async fn request_microphone_permission(&mut self) -> Result<(), SpeechError> {
        self.permission_requests += 1;
        match &self.deny {
            Some(reason) => Err(SpeechError::PermissionDenied(reason.clone())),
            None => Ok(()),
        }
    }

    fn start_listening(&mut self, continuous: bool) -> Result<(), SpeechError> {
        if self.fail_start {
            return Err(SpeechError::Unavailable("device busy".to_string()));
        }
        self.starts.push(continuous);
        Ok(())
    }

    fn stop_listening(&mut self) {
        self.stops += 1;
    }

    fn abort_listening(&mut self) {
        self.aborts += 1;
    }
}

fn session(mic: FakeMicrophone) -> SpeechSession<FakeMicrophone> {
    SpeechSession::new(mic, &SpeechConfig::default())
}

// =============================================================================
// Listening lifecycle
// =============================================================================

#[tokio::test]
async fn test_start_then_stop_emits_merged_utterance() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    assert!(s.is_listening());
    assert_eq!(s.capability().starts, vec![true]);

    s.on_recognition(RecognitionSnapshot::live("what services", "do you"))
        .unwrap();
    let utterance = s.stop().unwrap().unwrap();

    assert_eq!(utterance.text, "what services do you");
    assert_eq!(utterance.channel, InputChannel::Voice);
    assert_eq!(s.state(), &SpeechState::Idle);
    assert_eq!(s.capability().stops, 1);
    assert!(s.transcript().is_empty());
}

#[tokio::test]
async fn test_stop_while_idle_is_noop() {
    let mut s = session(FakeMicrophone::default());
    assert_eq!(s.stop().unwrap(), None);
    assert_eq!(s.state(), &SpeechState::Idle);
    assert_eq!(s.capability().stops, 0);
}

#[tokio::test]
async fn test_start_twice_keeps_transcript_and_single_listener() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("contact", "")).unwrap();

    s.start().await.unwrap();
    assert_eq!(s.transcript(), "contact");
    assert_eq!(s.capability().starts.len(), 1);
    assert_eq!(s.capability().permission_requests, 1);
}

#[tokio::test]
async fn test_new_turn_resets_transcript() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("first", "")).unwrap();
    s.stop().unwrap();

    s.start().await.unwrap();
    assert!(s.transcript().is_empty());
    assert!(s.interim().is_empty());
    // Permission is only asked once per ready period
    assert_eq!(s.capability().permission_requests, 1);
}

#[tokio::test]
async fn test_empty_turn_produces_no_utterance() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("  ", " ")).unwrap();
    assert_eq!(s.stop().unwrap(), None);
    assert_eq!(s.state(), &SpeechState::Idle);
}

#[tokio::test]
async fn test_interim_updates_never_finish_turn() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    for partial in ["rev", "revenue", "revenue opti"] {
        let out = s.on_recognition(RecognitionSnapshot::live("", partial)).unwrap();
        assert!(out.is_none());
    }
    assert!(s.is_listening());
    assert_eq!(s.interim(), "revenue opti");
}

#[tokio::test]
async fn test_recognition_ending_on_its_own_finalizes() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    let utterance = s
        .on_recognition(RecognitionSnapshot::ended("revenue optimization"))
        .unwrap()
        .unwrap();
    assert_eq!(utterance.text, "revenue optimization");
    assert_eq!(s.state(), &SpeechState::Idle);
    // Recognizer already stopped itself
    assert_eq!(s.capability().stops, 0);
}

#[tokio::test]
async fn test_snapshot_while_idle_is_ignored() {
    let mut s = session(FakeMicrophone::default());
    let out = s.on_recognition(RecognitionSnapshot::ended("stale")).unwrap();
    assert!(out.is_none());
    assert_eq!(s.state(), &SpeechState::Idle);
}

#[tokio::test]
async fn test_abort_discards_transcript() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("half a", "sentence")).unwrap();
    s.abort().unwrap();

    assert_eq!(s.state(), &SpeechState::Idle);
    assert_eq!(s.capability().aborts, 1);
    assert!(s.transcript().is_empty());
    assert_eq!(s.stop().unwrap(), None);
}

#[tokio::test]
async fn test_voice_command_maps_to_canonical_query() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("What is RevX", "")).unwrap();
    assert_eq!(s.stop().unwrap().unwrap().text, "about revx");
}

#[tokio::test]
async fn test_commands_can_be_disabled() {
    let mut s = session(FakeMicrophone::default()).with_commands(VoiceCommands::none());
    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("What is RevX", "")).unwrap();
    assert_eq!(s.stop().unwrap().unwrap().text, "What is RevX");
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_unsupported_browser_enters_error() {
    let mut s = session(FakeMicrophone {
        unsupported: true,
        ..Default::default()
    });
    let err = s.start().await.unwrap_err();
    assert_eq!(err, SpeechError::Unsupported);
    assert_eq!(
        s.warning(),
        Some("Speech recognition is not supported in this browser. Please use Chrome, Edge, or Safari.")
    );
    assert_eq!(s.capability().permission_requests, 0);
}

#[tokio::test]
async fn test_missing_media_devices_enters_error() {
    let mut s = session(FakeMicrophone {
        no_media_devices: true,
        ..Default::default()
    });
    assert_eq!(
        s.initialize().await.unwrap_err(),
        SpeechError::MediaDevicesUnavailable
    );
    assert!(s.warning().unwrap().starts_with("MediaDevices API not available"));
}

#[tokio::test]
async fn test_permission_denied_blocks_start_until_cleared() {
    let mut s = session(FakeMicrophone {
        deny: Some(String::new()),
        ..Default::default()
    });
    assert!(s.start().await.is_err());
    assert_eq!(s.warning(), Some("Microphone permission denied"));
    assert!(s.capability().starts.is_empty());

    // Start from Error fails without touching the capability
    let err = s.start().await.unwrap_err();
    assert!(matches!(err, SpeechError::Unavailable(_)));
    assert_eq!(s.capability().permission_requests, 1);

    s.clear_error().unwrap();
    assert_eq!(s.state(), &SpeechState::Idle);
    assert!(s.warning().is_none());

    // Cleared errors re-run the capability check
    assert!(s.start().await.is_err());
    assert_eq!(s.capability().permission_requests, 2);
}

#[tokio::test]
async fn test_start_failure_enters_error() {
    let mut s = session(FakeMicrophone {
        fail_start: true,
        ..Default::default()
    });
    let err = s.start().await.unwrap_err();
    assert!(matches!(err, SpeechError::StartFailed(_)));
    assert_eq!(s.warning(), Some("Failed to start speech recognition"));
}

#[tokio::test]
async fn test_snapshot_reporting_no_support_while_listening() {
    let mut s = session(FakeMicrophone::default());
    s.start().await.unwrap();
    let snapshot = RecognitionSnapshot {
        browser_supports_speech_recognition: false,
        ..RecognitionSnapshot::live("lost", "")
    };
    assert_eq!(s.on_recognition(snapshot).unwrap(), None);
    assert!(s.warning().is_some());
    assert_eq!(s.capability().aborts, 1);
}

#[tokio::test]
async fn test_clear_error_when_idle_is_noop() {
    let mut s = session(FakeMicrophone::default());
    s.clear_error().unwrap();
    assert_eq!(s.state(), &SpeechState::Idle);
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn test_events_published_in_order() {
    let mut s = session(FakeMicrophone::default());
    let mut rx = s.subscribe();

    s.start().await.unwrap();
    s.on_recognition(RecognitionSnapshot::live("contact", "")).unwrap();
    s.stop().unwrap();

    assert_eq!(
        rx.try_recv().unwrap(),
        SpeechEvent::StateChanged {
            from: SpeechState::Idle,
            to: SpeechState::Listening
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        SpeechEvent::Interim {
            transcript: "contact".to_string(),
            interim: String::new()
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        SpeechEvent::StateChanged {
            from: SpeechState::Listening,
            to: SpeechState::Idle
        }
    );
    match rx.try_recv().unwrap() {
        SpeechEvent::Utterance(u) => assert_eq!(u.text, "contact"),
        other => panic!("expected utterance, got {:?}", other),
    }
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_warning_event_on_failure() {
    let mut s = session(FakeMicrophone {
        deny: Some("NotAllowedError".to_string()),
        ..Default::default()
    });
    let mut rx = s.subscribe();
    let _ = s.start().await;

    assert!(matches!(rx.try_recv().unwrap(), SpeechEvent::StateChanged { .. }));
    assert_eq!(
        rx.try_recv().unwrap(),
        SpeechEvent::Warning("NotAllowedError".to_string())
    );
}
