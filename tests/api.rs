use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use phishguard::api::{build_router, AppState};
use phishguard::errors::PhishguardError;
use phishguard::image::InlineImage;
use phishguard::llm::{LLMProvider, LLMResponse};
use phishguard::models::{PhishingReport, ReportStatus};
use phishguard::store::ReportStore;

const SAFE_REPLY: &str = r#"{"verdict":"Safe","confidence_score":3,"explanation":"Ordinary page.","hacker_dest":"N/A"}"#;

// PNG magic bytes, base64-encoded
const PNG_B64: &str = "iVBORw0KGgo=";

/// Provider stub: returns a canned reply (or fails when `reply` is None),
/// recording the prompt and whether an image was attached.
struct StubProvider {
    reply: Option<String>,
    saw_image: AtomicBool,
    last_prompt: Mutex<Option<String>>,
}

impl StubProvider {
    fn with_reply(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            saw_image: AtomicBool::new(false),
            last_prompt: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            saw_image: AtomicBool::new(false),
            last_prompt: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LLMProvider for StubProvider {
    async fn analyze(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<LLMResponse, PhishguardError> {
        self.saw_image.store(image.is_some(), Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.reply {
            Some(content) => Ok(LLMResponse {
                content: content.clone(),
                input_tokens: None,
                output_tokens: None,
                model: "stub".to_string(),
            }),
            None => Err(PhishguardError::LLMApi("stub model failure".into())),
        }
    }

    fn provider_name(&self) -> &str { "stub" }
    fn model_name(&self) -> &str { "stub" }
}

/// Store stub collecting appended reports, optionally failing every write.
#[derive(Default)]
struct StubStore {
    fail: bool,
    appended: Mutex<Vec<PhishingReport>>,
}

#[async_trait]
impl ReportStore for StubStore {
    async fn append(&self, report: &PhishingReport) -> Result<(), PhishguardError> {
        if self.fail {
            return Err(PhishguardError::Store("stub write failure".into()));
        }
        self.appended.lock().unwrap().push(report.clone());
        Ok(())
    }
}

fn state_with(
    model: Arc<dyn LLMProvider>,
    store: Option<Arc<dyn ReportStore>>,
) -> AppState {
    AppState { model, store }
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = state_with(Arc::new(StubProvider::with_reply(SAFE_REPLY)), None);
    let response = build_router(state)
        .oneshot(make_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "phishguard");
    assert_eq!(body["store"], "offline");
}

#[tokio::test]
async fn test_health_reports_store_online() {
    let state = state_with(
        Arc::new(StubProvider::with_reply(SAFE_REPLY)),
        Some(Arc::new(StubStore::default())),
    );
    let response = build_router(state)
        .oneshot(make_request("GET", "/health", None))
        .await
        .unwrap();

    let body = response_json(response).await;
    assert_eq!(body["store"], "online");
}

#[tokio::test]
async fn test_analyze_returns_model_verdict() {
    let state = state_with(Arc::new(StubProvider::with_reply(SAFE_REPLY)), None);
    let req = make_request("POST", "/analyze", Some(json!({"text": "Welcome to our site"})));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["verdict"], "Safe");
    assert_eq!(body["confidence_score"], 3);
    assert_eq!(body["hacker_dest"], "N/A");
}

#[tokio::test]
async fn test_analyze_model_error_returns_fallback() {
    let state = state_with(Arc::new(StubProvider::failing()), None);
    let req = make_request("POST", "/analyze", Some(json!({"text": ""})));
    let response = build_router(state).oneshot(req).await.unwrap();

    // Failures are reported as a valid-shaped payload, not an HTTP error
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(
        body,
        json!({
            "verdict": "Error",
            "confidence_score": 0,
            "explanation": "Server Error",
            "hacker_dest": "Unknown",
        })
    );
}

#[tokio::test]
async fn test_analyze_unparseable_reply_returns_fallback() {
    let state = state_with(
        Arc::new(StubProvider::with_reply("I'm sorry, I cannot help with that.")),
        None,
    );
    let req = make_request("POST", "/analyze", Some(json!({"text": "hi"})));
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["verdict"], "Error");
    assert_eq!(body["explanation"], "Server Error");
}

#[tokio::test]
async fn test_analyze_fenced_reply_parses() {
    let reply = format!("```json\n{}\n```", SAFE_REPLY);
    let state = state_with(Arc::new(StubProvider::with_reply(&reply)), None);
    let req = make_request("POST", "/analyze", Some(json!({"text": "hello"})));
    let response = build_router(state).oneshot(req).await.unwrap();

    let body = response_json(response).await;
    assert_eq!(body["verdict"], "Safe");
}

#[tokio::test]
async fn test_analyze_invalid_image_proceeds_text_only() {
    let provider = Arc::new(StubProvider::with_reply(SAFE_REPLY));
    let state = state_with(provider.clone(), None);

    let req = make_request(
        "POST",
        "/analyze",
        Some(json!({"text": "login page", "image": "!!!not-base64!!!"})),
    );
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["verdict"], "Safe");
    assert!(!provider.saw_image.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_analyze_data_uri_image_attached() {
    let provider = Arc::new(StubProvider::with_reply(SAFE_REPLY));
    let state = state_with(provider.clone(), None);

    let req = make_request(
        "POST",
        "/analyze",
        Some(json!({
            "text": "login page",
            "image": format!("data:image/png;base64,{}", PNG_B64),
        })),
    );
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(provider.saw_image.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_analyze_scrubs_email_from_prompt() {
    let provider = Arc::new(StubProvider::with_reply(SAFE_REPLY));
    let state = state_with(provider.clone(), None);

    let req = make_request(
        "POST",
        "/analyze",
        Some(json!({"text": "Contact me at a.b@example.com now"})),
    );
    build_router(state).oneshot(req).await.unwrap();

    let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("[REDACTED_EMAIL]"));
    assert!(!prompt.contains("a.b@example.com"));
}

#[tokio::test]
async fn test_analyze_missing_text_defaults_to_empty() {
    let provider = Arc::new(StubProvider::with_reply(SAFE_REPLY));
    let state = state_with(provider.clone(), None);

    let req = make_request("POST", "/analyze", Some(json!({})));
    let response = build_router(state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("DATA FROM PAGE:\n\"\""));
}

#[tokio::test]
async fn test_analyze_malformed_body_returns_fallback() {
    let state = state_with(Arc::new(StubProvider::with_reply(SAFE_REPLY)), None);
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from("this is not json"))
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["verdict"], "Error");
}

#[tokio::test]
async fn test_report_saved() {
    let store = Arc::new(StubStore::default());
    let state = state_with(Arc::new(StubProvider::failing()), Some(store.clone()));

    let req = make_request(
        "POST",
        "/report",
        Some(json!({
            "url": "http://phish.example/login",
            "destination": "http://collector.example/submit",
        })),
    );
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({"status": "saved"}));

    let appended = store.appended.lock().unwrap();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0].url, "http://phish.example/login");
    assert_eq!(appended[0].hacker_destination, "http://collector.example/submit");
    assert_eq!(appended[0].status, ReportStatus::UnderReview);
}

#[tokio::test]
async fn test_report_defaults_for_missing_fields() {
    let store = Arc::new(StubStore::default());
    let state = state_with(Arc::new(StubProvider::failing()), Some(store.clone()));

    let req = make_request("POST", "/report", Some(json!({})));
    let response = build_router(state).oneshot(req).await.unwrap();

    let body = response_json(response).await;
    assert_eq!(body["status"], "saved");

    let appended = store.appended.lock().unwrap();
    assert_eq!(appended[0].url, "Unknown URL");
    assert_eq!(appended[0].hacker_destination, "Unknown Dest");
}

#[tokio::test]
async fn test_report_offline_without_store() {
    let state = state_with(Arc::new(StubProvider::failing()), None);
    let req = make_request("POST", "/report", Some(json!({"url": "http://x.example"})));
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({"status": "offline"}));
}

#[tokio::test]
async fn test_report_write_failure_is_error_status() {
    let store = Arc::new(StubStore { fail: true, ..Default::default() });
    let state = state_with(Arc::new(StubProvider::failing()), Some(store.clone()));

    let req = make_request("POST", "/report", Some(json!({"url": "http://x.example"})));
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, json!({"status": "error"}));
    assert!(store.appended.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_malformed_body_is_error_status() {
    let state = state_with(
        Arc::new(StubProvider::failing()),
        Some(Arc::new(StubStore::default())),
    );
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/report")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let state = state_with(Arc::new(StubProvider::with_reply(SAFE_REPLY)), None);
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .header("origin", "chrome-extension://abcdef")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();
    let response = build_router(state).oneshot(req).await.unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
