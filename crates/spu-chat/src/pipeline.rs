//! Stateless answer resolution shared by the chat session and HTTP surface.
//!
//! Flow: validate -> classify -> compose baseline -> (optional) enhance.
//! The pipeline owns no conversation state, so one instance can serve any
//! number of sessions or requests concurrently.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use spu_core::config::ChatConfig;
use spu_core::{ConversationTurn, KnowledgeBase, Role};

use crate::classifier::IntentClassifier;
use crate::composer::ResponseComposer;
use crate::enhancer::{AnswerEnhancer, EnhancementRequest};
use crate::error::ChatError;

/// Result of answering one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    /// Name of the rule that matched, or `"fallback"`.
    pub rule: &'static str,
    /// The rule-based answer.
    pub baseline: String,
    /// What the user is shown: the enhanced text, or the baseline.
    pub answer: String,
    pub enhanced: bool,
}

// =============================================================================
// AnswerPipeline
// =============================================================================

pub struct AnswerPipeline {
    knowledge: Arc<KnowledgeBase>,
    classifier: IntentClassifier,
    composer: ResponseComposer,
    enhancer: Option<AnswerEnhancer>,
    max_message_length: usize,
}

impl AnswerPipeline {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: &ChatConfig) -> Self {
        Self {
            knowledge,
            classifier: IntentClassifier::new(),
            composer: ResponseComposer::new(),
            enhancer: None,
            max_message_length: config.max_message_length,
        }
    }

    pub fn with_enhancer(mut self, enhancer: AnswerEnhancer) -> Self {
        self.enhancer = Some(enhancer);
        self
    }

    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn is_enhancing(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Trailing turns `answer` needs as context. Zero without an enhancer.
    pub fn context_turns(&self) -> usize {
        self.enhancer.as_ref().map_or(0, AnswerEnhancer::history_turns)
    }

    /// Reject empty or oversized input. Returns the trimmed text.
    pub fn validate<'a>(&self, text: &'a str) -> Result<&'a str, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if trimmed.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }
        Ok(trimmed)
    }

    /// Classify and compose locally. Never touches the network.
    pub fn baseline(&self, text: &str) -> (&'static str, String) {
        let matched = self.classifier.classify(text);
        let answer = self.composer.compose(matched.rule, &self.knowledge);
        (matched.name(), answer)
    }

    /// Answer `text` given the history leading up to and including it.
    ///
    /// Only the trailing [`context_turns`](Self::context_turns) of `history`
    /// are used, so callers may pass just that window.
    pub async fn answer(
        &self,
        history: &[ConversationTurn],
        text: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let text = self.validate(text)?;
        let (rule, baseline) = self.baseline(text);

        let (answer, enhanced) = match &self.enhancer {
            Some(enhancer) => {
                let start = history.len().saturating_sub(enhancer.history_turns());
                let request = EnhancementRequest {
                    conversation_history: history[start..].to_vec(),
                    baseline_answer: baseline.clone(),
                };
                let result = enhancer.enhance_detailed(&request).await;
                (result.text, result.enhanced)
            }
            None => (baseline.clone(), false),
        };

        info!(rule, enhanced, "Turn answered");
        Ok(TurnOutcome {
            rule,
            baseline,
            answer,
            enhanced,
        })
    }

    /// Answer the last user message in a client-held history.
    ///
    /// Used by the HTTP surface, where the client resends the whole
    /// conversation on every request and the server keeps nothing.
    pub async fn answer_stateless(
        &self,
        history: &[ConversationTurn],
    ) -> Result<TurnOutcome, ChatError> {
        let last_user = history
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .ok_or(ChatError::NoUserMessage)?;
        self.answer(history, &last_user.content).await
    }
}

// =============================================================================
// Tests
// =============================================================================
