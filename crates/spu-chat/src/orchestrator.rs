//! Chat orchestrator: one conversation session.
//!
//! Records the user turn, resolves it through the shared pipeline, and
//! records exactly one assistant turn in response.

use std::sync::Arc;

use tracing::debug;

use spu_core::{ConversationTurn, InputChannel, Utterance};

use crate::error::ChatError;
use crate::log::ConversationLog;
use crate::pipeline::{AnswerPipeline, TurnOutcome};

/// Drives a single conversation against a shared [`AnswerPipeline`].
///
/// Turn handling takes `&mut self`, so submissions within one session are
/// strictly sequential and the log always alternates user, assistant.
pub struct ChatOrchestrator {
    pipeline: Arc<AnswerPipeline>,
    log: ConversationLog,
}

impl ChatOrchestrator {
    pub fn new(pipeline: Arc<AnswerPipeline>) -> Self {
        Self {
            pipeline,
            log: ConversationLog::new(),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn pipeline(&self) -> &AnswerPipeline {
        &self.pipeline
    }

    /// Handle one typed message.
    ///
    /// Invalid input is rejected before anything is logged.
    pub async fn submit(&mut self, text: &str) -> Result<TurnOutcome, ChatError> {
        self.submit_utterance(Utterance::typed(text)).await
    }

    /// Handle one utterance from either input channel. Both channels take
    /// the identical path from here on.
    pub async fn submit_utterance(
        &mut self,
        utterance: Utterance,
    ) -> Result<TurnOutcome, ChatError> {
        let text = self.pipeline.validate(&utterance.text)?.to_string();
        debug!(
            voice = utterance.channel == InputChannel::Voice,
            chars = text.len(),
            "Utterance submitted"
        );

        self.log.append(ConversationTurn::user(text.clone()));
        let context = self.log.recent(self.pipeline.context_turns());
        let outcome = self.pipeline.answer(context, &text).await?;
        self.log.append(ConversationTurn::assistant(
            outcome.answer.clone(),
            outcome.enhanced,
        ));
        Ok(outcome)
    }
}
