//! Optional language-model refinement of baseline answers.
//!
//! The enhancer sends recent conversation history plus the rule-based
//! baseline to a chat-completions gateway. Any failure (transport error,
//! timeout, non-success status, malformed or empty body) degrades to the
//! baseline verbatim; it never surfaces as an error to the caller.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use spu_core::config::EnhancerConfig;
use spu_core::{ConversationTurn, KnowledgeBase};

// =============================================================================
// Errors
// =============================================================================

/// Why a completion call did not produce usable text.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("gateway returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("completion contained no text")]
    EmptyCompletion,
}

impl From<reqwest::Error> for EnhanceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EnhanceError::Timeout
        } else {
            EnhanceError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayMessage {
    pub role: String,
    pub content: String,
}

impl GatewayMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Request body for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<GatewayMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

// =============================================================================
// Gateway
// =============================================================================

/// A chat-completions backend.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Return the first choice's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhanceError>;
}

/// HTTP gateway speaking the OpenRouter chat-completions protocol.
#[derive(Debug, Clone)]
pub struct OpenRouterGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    referer: String,
    title: String,
}

impl OpenRouterGateway {
    pub fn new(config: &EnhancerConfig) -> Result<Self, EnhanceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhanceError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnhanceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| EnhanceError::Malformed(e.to_string()))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            Err(EnhanceError::EmptyCompletion)
        } else {
            Ok(text)
        }
    }
}

// =============================================================================
// AnswerEnhancer
// =============================================================================

/// Input to one enhancement call.
#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    /// Prior turns, oldest first, including the current user turn.
    pub conversation_history: Vec<ConversationTurn>,
    pub baseline_answer: String,
}

/// Result of an enhancement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhancement {
    pub text: String,
    /// True when `text` came from the model rather than the baseline.
    pub enhanced: bool,
}

/// Wraps a gateway with prompt construction and baseline fallback.
#[derive(Clone)]
pub struct AnswerEnhancer {
    gateway: Arc<dyn LlmGateway>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    history_turns: usize,
    persona: String,
}

impl std::fmt::Debug for AnswerEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerEnhancer")
            .field("model", &self.model)
            .field("history_turns", &self.history_turns)
            .finish_non_exhaustive()
    }
}

impl AnswerEnhancer {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: &EnhancerConfig) -> Self {
        Self {
            gateway,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            history_turns: config.history_turns,
            persona: "You are a helpful and professional business assistant.".to_string(),
        }
    }

    /// Build an enhancer backed by [`OpenRouterGateway`].
    pub fn from_config(config: &EnhancerConfig) -> Result<Self, EnhanceError> {
        if config.api_key.is_none() {
            warn!("Enhancer has no API key; requests will likely be rejected and fall back");
        }
        let gateway = OpenRouterGateway::new(config)?;
        info!(endpoint = gateway.endpoint(), model = %config.model, "Answer enhancer ready");
        Ok(Self::new(Arc::new(gateway), config))
    }

    /// Introduce the assistant as working for the business in `kb`.
    pub fn with_persona(mut self, kb: &KnowledgeBase) -> Self {
        self.persona = format!(
            "You are the {} AI Assistant, a helpful and professional assistant for {}. {}",
            kb.name, kb.name, kb.description
        );
        self
    }

    /// How many trailing turns are sent as context.
    pub fn history_turns(&self) -> usize {
        self.history_turns
    }

    /// Messages sent to the gateway: one system instruction embedding the
    /// baseline, then the trailing history window.
    pub fn build_messages(&self, request: &EnhancementRequest) -> Vec<GatewayMessage> {
        let system = format!(
            "{}\n\nEnhance the following baseline answer with more precise details while maintaining the same key information: {}\n\nAlways maintain a professional, helpful tone. Be concise but thorough.",
            self.persona, request.baseline_answer
        );

        let history = &request.conversation_history;
        let start = history.len().saturating_sub(self.history_turns);

        std::iter::once(GatewayMessage::new("system", system))
            .chain(
                history[start..]
                    .iter()
                    .map(|turn| GatewayMessage::new(turn.role.as_str(), turn.content.clone())),
            )
            .collect()
    }

    pub fn build_request(&self, request: &EnhancementRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(request),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Refine the baseline, returning it unchanged on any failure.
    pub async fn enhance(&self, request: &EnhancementRequest) -> String {
        self.enhance_detailed(request).await.text
    }

    pub async fn enhance_detailed(&self, request: &EnhancementRequest) -> Enhancement {
        let completion = self.build_request(request);
        match self.gateway.complete(&completion).await {
            Ok(text) => {
                debug!(chars = text.len(), "Baseline enhanced");
                Enhancement {
                    text,
                    enhanced: true,
                }
            }
            Err(e) => {
                warn!(error = %e, "Enhancement failed, using baseline answer");
                Enhancement {
                    text: request.baseline_answer.clone(),
                    enhanced: false,
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
