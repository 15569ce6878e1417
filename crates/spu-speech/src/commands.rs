//! Spoken shortcuts that map whole phrases to canonical queries.

use spu_core::normalize;

/// One or more spoken phrases that stand for a canonical query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCommand {
    pub phrases: Vec<String>,
    pub query: String,
}

impl VoiceCommand {
    pub fn new(phrases: &[&str], query: &str) -> Self {
        Self {
            phrases: phrases.iter().map(|p| normalize(p)).collect(),
            query: query.to_string(),
        }
    }
}

/// Ordered command table. A command fires only when the whole utterance is
/// one of its phrases; partial matches fall through to normal
/// classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCommands {
    commands: Vec<VoiceCommand>,
}

impl VoiceCommands {
    /// An empty table. Utterances pass through unchanged.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(commands: Vec<VoiceCommand>) -> Self {
        Self { commands }
    }

    /// The assistant's built-in shortcuts.
    pub fn builtin() -> Self {
        Self::new(vec![
            VoiceCommand::new(
                &[
                    "hello",
                    "hi",
                    "hey",
                    "good morning",
                    "good afternoon",
                    "good evening",
                    "howdy",
                ],
                "hello",
            ),
            VoiceCommand::new(
                &["how are you", "how's it going", "how you doing"],
                "how are you",
            ),
            VoiceCommand::new(&["thank you", "thanks", "appreciate it"], "thank you"),
            VoiceCommand::new(
                &["goodbye", "bye", "see you", "talk to you later"],
                "goodbye",
            ),
            VoiceCommand::new(
                &["what is revx", "who is revx", "tell me about revx"],
                "about revx",
            ),
            VoiceCommand::new(&["what services do you offer"], "services"),
            VoiceCommand::new(
                &["how can i contact you", "contact information"],
                "contact",
            ),
            VoiceCommand::new(&["case studies", "success stories"], "case studies"),
            VoiceCommand::new(
                &["digital marketing", "marketing services", "seo", "social media"],
                "digital marketing",
            ),
            VoiceCommand::new(
                &["ecommerce", "online store", "digital commerce", "online retail"],
                "ecommerce",
            ),
            VoiceCommand::new(
                &[
                    "development",
                    "programming",
                    "coding",
                    "app development",
                    "website development",
                ],
                "development",
            ),
            VoiceCommand::new(
                &["ai", "artificial intelligence", "machine learning"],
                "ai",
            ),
            VoiceCommand::new(&["revenue", "profit", "income", "earnings"], "revenue"),
        ])
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Canonical query for `text`, if it is exactly a command phrase.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        let spoken = normalize(text);
        let spoken = spoken.trim_end_matches(['.', '?', '!']);
        self.commands
            .iter()
            .find(|c| c.phrases.iter().any(|p| p == spoken))
            .map(|c| c.query.as_str())
    }
}
