use std::time::Duration;

use assistant_core::{AnalysisRequest, Guidance, Step};
use assistant_engine::{AnalyzeSettings, Analyzer, FailureKind, ReqwestAnalyzer};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> AnalysisRequest {
    AnalysisRequest {
        subject_id: "u123".to_string(),
        text: "apt says package foo is missing".to_string(),
    }
}

fn analyzer_for(server: &MockServer, token: Option<&str>) -> ReqwestAnalyzer {
    let settings = AnalyzeSettings {
        endpoint: format!("{}/api/ai/analyze", server.uri()),
        bearer_token: token.map(ToOwned::to_owned),
        ..AnalyzeSettings::default()
    };
    ReqwestAnalyzer::new(settings).expect("client")
}

#[tokio::test]
async fn posts_json_with_bearer_and_parses_ui() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/analyze"))
        .and(header("authorization", "Bearer t0ken"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "student_id": "u123",
            "text": "apt says package foo is missing",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "raw": {},
            "latency_ms": 5,
            "ui": {
                "is_technical": true,
                "steps": ["Run the following commands/code:\napt install foo"],
                "verify": ["check foo -v"],
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = analyzer_for(&server, Some("t0ken"))
        .analyze(&request())
        .await
        .expect("analysis ok");

    assert_eq!(
        result.guidance,
        Guidance::Technical {
            declared: true,
            steps: vec![Step::Code("apt install foo".to_string())],
            verify: vec!["check foo -v".to_string()],
        }
    );
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ui": {"is_technical": false, "category": "billing"}
        })))
        .mount(&server)
        .await;

    let result = analyzer_for(&server, None)
        .analyze(&request())
        .await
        .expect("analysis ok");
    assert_eq!(result.guidance, Guidance::NonTechnical);
    assert_eq!(result.category.as_deref(), Some("billing"));

    let received = server.received_requests().await.expect("recording enabled");
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn detail_becomes_the_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(serde_json::json!({"detail": "rate limited"})),
        )
        .mount(&server)
        .await;

    let err = analyzer_for(&server, None)
        .analyze(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(429));
    assert_eq!(err.message, "rate limited");
}

#[tokio::test]
async fn status_is_used_when_body_is_not_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = analyzer_for(&server, None)
        .analyze(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.to_string(), "HTTP 502");
}

#[tokio::test]
async fn malformed_success_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ui\": "))
        .mount(&server)
        .await;

    let err = analyzer_for(&server, None)
        .analyze(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
    assert!(err.message.starts_with("invalid response body"));
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let settings = AnalyzeSettings {
        endpoint: "http://127.0.0.1:9/api/ai/analyze".to_string(),
        connect_timeout: Duration::from_secs(2),
        ..AnalyzeSettings::default()
    };
    let err = ReqwestAnalyzer::new(settings)
        .expect("client")
        .analyze(&request())
        .await
        .unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn optional_request_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(serde_json::json!({"ui": {}})),
        )
        .mount(&server)
        .await;

    let settings = AnalyzeSettings {
        endpoint: format!("{}/api/ai/analyze", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..AnalyzeSettings::default()
    };
    let err = ReqwestAnalyzer::new(settings)
        .expect("client")
        .analyze(&request())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
