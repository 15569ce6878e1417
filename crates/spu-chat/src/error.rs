//! Error types for the query-resolution pipeline.

/// Errors from the chat pipeline.
///
/// Language-model failures never surface here; the enhancer degrades to the
/// baseline answer instead.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("conversation has no user message to answer")]
    NoUserMessage,
}
