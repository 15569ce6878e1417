//! Query-resolution pipeline for the Spu assistant.
//!
//! Classifies utterances against an ordered rule table, composes baseline
//! answers from the knowledge base, optionally refines them through a
//! language model, and records every turn in an append-only conversation log.

pub mod classifier;
pub mod composer;
pub mod enhancer;
pub mod error;
pub mod log;
pub mod orchestrator;
pub mod pipeline;
pub mod rules;
pub mod templates;

pub use classifier::{IntentClassifier, Matcher, Rule, RuleMatch};
pub use composer::{ComposeContext, ResponseComposer};
pub use enhancer::{
    AnswerEnhancer, EnhanceError, Enhancement, EnhancementRequest, LlmGateway, OpenRouterGateway,
};
pub use error::ChatError;
pub use log::ConversationLog;
pub use orchestrator::ChatOrchestrator;
pub use pipeline::{AnswerPipeline, TurnOutcome};
