//! Spu core crate - configuration, error types, the business knowledge base,
//! and the turn/utterance types shared by the chat, speech, and API crates.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod types;

pub use config::SpuConfig;
pub use error::{Result, SpuError};
pub use knowledge::KnowledgeBase;
pub use types::*;
