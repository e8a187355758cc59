use anyhow::Result;
use churn_predictor::adapters::terminal::{CHURN_BANNER, EXPLANATION_HEADING, UNKNOWN_BANNER};
use churn_predictor::core::pipeline::{EXPLAINING_NOTICE, SCORING_NOTICE};
use churn_predictor::{
    AppConfig, ChatExplainer, ChurnPipeline, CustomerRecord, Explanation, PredictionResult,
    ScoringClient, TerminalPresenter,
};
use httpmock::prelude::*;
use serde_json::json;

const CHAT_PATH: &str = "/openai/deployments/gpt-explainer/chat/completions";

fn config_for(server: &MockServer) -> Result<AppConfig> {
    let toml_content = format!(
        r#"
[scoring]
endpoint = "{}"
token = "ml-token"

[explainer]
api_base = "{}"
api_key = "openai-key"
"#,
        server.url("/score"),
        server.base_url()
    );
    Ok(AppConfig::from_toml_str(&toml_content)?)
}

fn pipeline_for(config: &AppConfig) -> Result<ChurnPipeline<ScoringClient, ChatExplainer>> {
    Ok(ChurnPipeline::new(
        ScoringClient::new(config.scoring.clone())?,
        Some(ChatExplainer::new(config.explainer.clone())?),
    ))
}

#[tokio::test]
async fn test_full_run_renders_prediction_and_explanation() -> Result<()> {
    let server = MockServer::start();

    let score_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/score")
            .header("Authorization", "Bearer ml-token");
        then.status(200).json_body(json!({"result": [1]}));
    });
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({
            "choices": [{"message": {"role": "assistant", "content": "Low activity raises churn risk."}}]
        }));
    });

    let config = config_for(&server)?;
    let pipeline = pipeline_for(&config)?;
    let mut presenter = TerminalPresenter::new(Vec::new());

    let report = pipeline
        .run(&CustomerRecord::default(), &mut presenter)
        .await?;

    score_mock.assert();
    chat_mock.assert();
    assert_eq!(report.prediction, Ok(PredictionResult::WillChurn));
    assert_eq!(
        report.explanation,
        Some(Explanation::Text("Low activity raises churn risk.".to_string()))
    );

    let out = String::from_utf8(presenter.into_inner())?;
    let expected = format!(
        "{}\n{}\n{}\n\n{}\nLow activity raises churn risk.\n",
        SCORING_NOTICE, CHURN_BANNER, EXPLAINING_NOTICE, EXPLANATION_HEADING
    );
    assert_eq!(out, expected);
    Ok(())
}

#[tokio::test]
async fn test_unrecognised_prediction_still_explains() -> Result<()> {
    let server = MockServer::start();

    let score_mock = server.mock(|when, then| {
        when.method(POST).path("/score");
        then.status(200).json_body(json!({"status": "ok"}));
    });
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "Balance is moderate."}}]
        }));
    });

    let config = config_for(&server)?;
    let pipeline = pipeline_for(&config)?;
    let mut presenter = TerminalPresenter::new(Vec::new());

    let report = pipeline
        .run(&CustomerRecord::default(), &mut presenter)
        .await?;

    score_mock.assert();
    chat_mock.assert();
    assert_eq!(report.prediction, Ok(PredictionResult::Indeterminate));

    let out = String::from_utf8(presenter.into_inner())?;
    assert!(out.contains(UNKNOWN_BANNER));
    assert!(out.contains("Balance is moderate."));
    Ok(())
}

#[tokio::test]
async fn test_scoring_failure_shows_error_and_skips_explanation() -> Result<()> {
    let server = MockServer::start();

    let score_mock = server.mock(|when, then| {
        when.method(POST).path("/score");
        then.status(200).body("upstream timeout");
    });
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({"choices": []}));
    });

    let config = config_for(&server)?;
    let pipeline = pipeline_for(&config)?;
    let mut presenter = TerminalPresenter::new(Vec::new());

    let report = pipeline
        .run(&CustomerRecord::default(), &mut presenter)
        .await?;

    score_mock.assert();
    chat_mock.assert_hits(0);
    assert!(report.scoring_failed());
    assert_eq!(report.explanation, None);

    let out = String::from_utf8(presenter.into_inner())?;
    assert!(out.starts_with(SCORING_NOTICE));
    assert!(out.contains("❌ Azure ML error: Malformed response from Scoring endpoint"));
    assert!(!out.contains(EXPLANATION_HEADING));
    Ok(())
}

#[tokio::test]
async fn test_empty_prediction_array_skips_explanation() -> Result<()> {
    let server = MockServer::start();

    let score_mock = server.mock(|when, then| {
        when.method(POST).path("/score");
        then.status(200).json_body(json!({"result": []}));
    });
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "should not be requested"}}]
        }));
    });

    let config = config_for(&server)?;
    let pipeline = pipeline_for(&config)?;
    let mut presenter = TerminalPresenter::new(Vec::new());

    let report = pipeline
        .run(&CustomerRecord::default(), &mut presenter)
        .await?;

    score_mock.assert();
    chat_mock.assert_hits(0);
    assert!(report.scoring_failed());
    assert_eq!(report.explanation, None);

    let out = String::from_utf8(presenter.into_inner())?;
    assert!(out.contains("❌ Azure ML error: Malformed response from Scoring endpoint: prediction array is empty"));
    assert!(!out.contains(UNKNOWN_BANNER));
    Ok(())
}

#[tokio::test]
async fn test_explanation_failure_is_rendered_inline() -> Result<()> {
    let server = MockServer::start();

    let score_mock = server.mock(|when, then| {
        when.method(POST).path("/score");
        then.status(200).json_body(json!([0]));
    });
    let chat_mock = server.mock(|when, then| {
        when.method(POST).path(CHAT_PATH);
        then.status(500).body("model overloaded");
    });

    let config = config_for(&server)?;
    let pipeline = pipeline_for(&config)?;
    let mut presenter = TerminalPresenter::new(Vec::new());

    let report = pipeline
        .run(&CustomerRecord::default(), &mut presenter)
        .await?;

    score_mock.assert();
    chat_mock.assert();
    assert_eq!(report.prediction, Ok(PredictionResult::WillStay));
    assert!(matches!(report.explanation, Some(Explanation::Failed(_))));

    let out = String::from_utf8(presenter.into_inner())?;
    assert!(out.contains("⚠️ GPT error: Chat completion endpoint returned HTTP 500: model overloaded"));
    Ok(())
}
