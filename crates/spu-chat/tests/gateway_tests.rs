//! OpenRouter gateway against a local HTTP server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use spu_chat::enhancer::CompletionRequest;
use spu_chat::{AnswerEnhancer, EnhanceError, EnhancementRequest, LlmGateway, OpenRouterGateway};
use spu_core::config::EnhancerConfig;
use spu_core::ConversationTurn;

const PATH: &str = "/api/v1/chat/completions";
const BASELINE: &str = "RevX offers a comprehensive suite of services.";

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}{}", addr, PATH)
}

fn config(endpoint: String) -> EnhancerConfig {
    EnhancerConfig {
        enabled: true,
        endpoint,
        api_key: Some("test-key".to_string()),
        timeout_secs: 1,
        ..EnhancerConfig::default()
    }
}

fn request() -> EnhancementRequest {
    EnhancementRequest {
        conversation_history: vec![ConversationTurn::user("What services do you offer?")],
        baseline_answer: BASELINE.to_string(),
    }
}

fn completion() -> CompletionRequest {
    CompletionRequest {
        model: "anthropic/claude-3-haiku".to_string(),
        messages: Vec::new(),
        temperature: 0.3,
        max_tokens: 500,
    }
}

#[tokio::test]
async fn test_success_sends_headers_and_body() {
    type Captured = Arc<Mutex<Option<(HeaderMap, Value)>>>;
    let captured: Captured = Arc::new(Mutex::new(None));

    async fn handler(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *captured.lock().unwrap() = Some((headers, body));
        Json(json!({
            "choices": [{"message": {"role": "assistant", "content": "  Enhanced reply.  "}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }))
    }

    let router = Router::new()
        .route(PATH, post(handler))
        .with_state(captured.clone());
    let endpoint = spawn(router).await;

    let enhancer = AnswerEnhancer::from_config(&config(endpoint)).unwrap();
    let result = enhancer.enhance_detailed(&request()).await;
    assert_eq!(result.text, "Enhanced reply.");
    assert!(result.enhanced);

    let (headers, body) = captured.lock().unwrap().take().unwrap();
    assert_eq!(headers["authorization"], "Bearer test-key");
    assert_eq!(headers["http-referer"], "https://revx.pro");
    assert_eq!(headers["x-title"], "RevX AI Assistant");
    assert_eq!(body["model"], "anthropic/claude-3-haiku");
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][0]["content"].as_str().unwrap().contains(BASELINE));
    assert_eq!(body["messages"][1]["content"], "What services do you offer?");
}

#[tokio::test]
async fn test_server_error_falls_back_to_baseline() {
    let router = Router::new().route(
        PATH,
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let endpoint = spawn(router).await;

    let gateway = OpenRouterGateway::new(&config(endpoint.clone())).unwrap();
    let err = gateway.complete(&completion()).await.unwrap_err();
    assert!(matches!(err, EnhanceError::Status(500)));

    let enhancer = AnswerEnhancer::from_config(&config(endpoint)).unwrap();
    assert_eq!(enhancer.enhance(&request()).await, BASELINE);
}

#[tokio::test]
async fn test_malformed_json_falls_back_to_baseline() {
    let router = Router::new().route(PATH, post(|| async { "{not json at all" }));
    let endpoint = spawn(router).await;

    let gateway = OpenRouterGateway::new(&config(endpoint.clone())).unwrap();
    let err = gateway.complete(&completion()).await.unwrap_err();
    assert!(matches!(err, EnhanceError::Malformed(_)));

    let enhancer = AnswerEnhancer::from_config(&config(endpoint)).unwrap();
    assert_eq!(enhancer.enhance(&request()).await, BASELINE);
}

#[tokio::test]
async fn test_timeout_falls_back_to_baseline() {
    let router = Router::new().route(
        PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"choices": [{"message": {"content": "too late"}}]}))
        }),
    );
    let endpoint = spawn(router).await;

    let gateway = OpenRouterGateway::new(&config(endpoint.clone())).unwrap();
    let err = gateway.complete(&completion()).await.unwrap_err();
    assert!(matches!(err, EnhanceError::Timeout));

    let enhancer = AnswerEnhancer::from_config(&config(endpoint)).unwrap();
    assert_eq!(enhancer.enhance(&request()).await, BASELINE);
}

#[tokio::test]
async fn test_empty_choices_falls_back_to_baseline() {
    let router = Router::new().route(PATH, post(|| async { Json(json!({"choices": []})) }));
    let endpoint = spawn(router).await;

    let gateway = OpenRouterGateway::new(&config(endpoint.clone())).unwrap();
    let err = gateway.complete(&completion()).await.unwrap_err();
    assert!(matches!(err, EnhanceError::EmptyCompletion));

    let enhancer = AnswerEnhancer::from_config(&config(endpoint)).unwrap();
    let result = enhancer.enhance_detailed(&request()).await;
    assert_eq!(result.text, BASELINE);
    assert!(!result.enhanced);
}

#[tokio::test]
async fn test_connection_refused_falls_back_to_baseline() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let enhancer =
        AnswerEnhancer::from_config(&config(format!("http://{}{}", addr, PATH))).unwrap();
    assert_eq!(enhancer.enhance(&request()).await, BASELINE);
}
