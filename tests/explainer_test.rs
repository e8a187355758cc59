use churn_predictor::config::ExplainerConfig;
use churn_predictor::core::Explainer;
use churn_predictor::domain::model::{ExplanationRequest, EXPLANATION_ERROR_MARKER};
use churn_predictor::{ChatExplainer, CustomerRecord, Explanation};
use httpmock::prelude::*;
use serde_json::json;

fn explainer_for(api_base: String) -> ChatExplainer {
    ChatExplainer::new(ExplainerConfig {
        api_base,
        api_key: "openai-key".to_string(),
        timeout_seconds: Some(5),
        ..ExplainerConfig::default()
    })
    .unwrap()
}

fn request() -> ExplanationRequest {
    ExplanationRequest::from(&CustomerRecord {
        has_credit_card: false,
        ..CustomerRecord::default()
    })
}

#[tokio::test]
async fn test_explain_posts_chat_request_to_deployment() {
    let server = MockServer::start();

    let chat_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/gpt-explainer/chat/completions")
            .query_param("api-version", "2025-01-01-preview")
            .header("api-key", "openai-key")
            .body_contains("\"role\":\"system\"")
            .body_contains("You are a financial analyst assistant.")
            .body_contains("- Credit Score: 720")
            .body_contains("- Estimated Salary: 55000.0")
            .body_contains("- Has Credit Card: No")
            .body_contains("- Is Active Member: Yes")
            .body_contains("\"temperature\":0.7")
            .body_contains("\"max_tokens\":600");
        then.status(200).json_body(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "A credit score of 720 is healthy."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }));
    });

    let explainer = explainer_for(server.base_url());
    let explanation = explainer.explain(&request()).await;

    chat_mock.assert();
    assert_eq!(
        explanation,
        Explanation::Text("A credit score of 720 is healthy.".to_string())
    );
}

#[tokio::test]
async fn test_explain_error_status_becomes_failed() {
    let server = MockServer::start();
    let chat_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/gpt-explainer/chat/completions");
        then.status(404).json_body(json!({"error": {"code": "DeploymentNotFound"}}));
    });

    let explainer = explainer_for(server.base_url());
    let explanation = explainer.explain(&request()).await;

    chat_mock.assert();
    assert!(explanation.is_failed());
    let text = explanation.display_text();
    assert!(text.starts_with(EXPLANATION_ERROR_MARKER));
    assert!(text.contains("404"));
}

#[tokio::test]
async fn test_explain_without_choices_becomes_failed() {
    let server = MockServer::start();
    let chat_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/openai/deployments/gpt-explainer/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let explainer = explainer_for(server.base_url());
    let explanation = explainer.explain(&request()).await;

    chat_mock.assert();
    assert!(matches!(explanation, Explanation::Failed(ref reason) if reason.contains("no message content")));
}

#[tokio::test]
async fn test_explain_unreachable_service_does_not_raise() {
    let explainer = explainer_for("http://127.0.0.1:1".to_string());
    let explanation = explainer.explain(&request()).await;

    assert!(explanation.is_failed());
    assert!(explanation.display_text().starts_with(EXPLANATION_ERROR_MARKER));
}
