//! Tests for transport.rs against a local chat-completion endpoint

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use factcheck_common::{
    ApiToken, CheckController, CheckOutcome, CheckSession, ChatTransport, FactCheckConfig,
    FactChecker, HttpTransport, ModelId, PromptVariant, ScreenProfile, TransportError,
};
use serde_json::{json, Value};
use std::time::Duration;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/chat/completions", addr)
}

/// Replies with a JSON verdict that echoes the user message
async fn verdict(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != "Bearer pplx-test" {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid token"})));
    }
    let text = body["messages"][1]["content"].as_str().unwrap_or_default();
    let content = json!({"score": 64, "analysis": format!("Checked **{}**", text)}).to_string();
    let message = json!({"role": "assistant", "content": format!("Verdict: {}", content)});
    (
        StatusCode::OK,
        Json(json!({
            "id": "cmpl-1",
            "model": body["model"],
            "choices": [{"index": 0, "message": message}]
        })),
    )
}

/// Answers only after the client timeout has passed
async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"choices": [{"message": {"content": "{\"score\": 1, \"analysis\": \"late\"}"}}]}))
}

fn spec(endpoint: &str, token: &str, text: &str) -> factcheck_common::RequestSpec {
    factcheck_common::build(
        text,
        &ModelId::default(),
        PromptVariant::FactCheck,
        endpoint,
        &ApiToken::new(token),
    )
    .unwrap()
}

#[tokio::test]
async fn test_http_round_trip_through_checker() {
    let endpoint = serve(Router::new().route("/chat/completions", post(verdict))).await;
    let config = FactCheckConfig {
        endpoint,
        ..FactCheckConfig::default()
    };
    let checker = FactChecker::new(
        HttpTransport::new(Some(10)).unwrap(),
        ScreenProfile::professional(),
        &config,
        ApiToken::new("pplx-test"),
    );

    let outcome = checker.check("Bats are blind.", None).await.unwrap();
    let CheckOutcome::Checked(result) = outcome else {
        panic!("expected a checked outcome");
    };
    assert_eq!(result.score(), Some(64));
    assert_eq!(result.analysis(), "Checked **Bats are blind.**");
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let endpoint = serve(Router::new().route("/chat/completions", post(verdict))).await;
    let transport = HttpTransport::new(None).unwrap();
    let err = transport
        .complete(&spec(&endpoint, "wrong-token", "claim"))
        .await
        .unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid token"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_status_without_body_uses_reason() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    );
    let endpoint = serve(router).await;
    let err = HttpTransport::new(None)
        .unwrap()
        .complete(&spec(&endpoint, "pplx-test", "claim"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 429,
            body: "Too Many Requests".to_string()
        }
    );
}

#[tokio::test]
async fn test_missing_choices_is_envelope_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let endpoint = serve(router).await;
    let err = HttpTransport::new(None)
        .unwrap()
        .complete(&spec(&endpoint, "pplx-test", "claim"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Envelope(_)));
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{}/chat/completions", addr);
    let err = HttpTransport::new(Some(5))
        .unwrap()
        .complete(&spec(&endpoint, "pplx-test", "claim"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Request(_)));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let endpoint = serve(Router::new().route("/chat/completions", post(slow))).await;
    let err = HttpTransport::new(Some(1))
        .unwrap()
        .complete(&spec(&endpoint, "pplx-test", "claim"))
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Timeout(1));
}

#[tokio::test]
async fn test_timeout_leaves_session_failed() {
    let endpoint = serve(Router::new().route("/chat/completions", post(slow))).await;
    let config = FactCheckConfig {
        endpoint,
        timeout_secs: Some(1),
        ..FactCheckConfig::default()
    };
    let checker = FactChecker::new(
        HttpTransport::new(config.timeout_secs).unwrap(),
        ScreenProfile::professional(),
        &config,
        ApiToken::new("pplx-test"),
    );
    let mut controller = CheckController::new(config.stale_reply);

    let session = controller.run(&checker, "claim", None).await;
    assert_eq!(
        session,
        &CheckSession::Failed {
            seq: 1,
            message: "Sorry, an error occurred while trying to fact-check.".to_string()
        }
    );
    assert!(!controller.session().is_loading());
}
