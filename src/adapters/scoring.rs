use crate::config::ScoringConfig;
use crate::domain::model::{CustomerRecord, PredictionResult};
use crate::domain::ports::ChurnScorer;
use crate::utils::error::{ChurnError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

const SERVICE: &str = "Scoring endpoint";

/// Column order of the deployed model's input schema.
pub const COLUMNS: [&str; 13] = [
    "RowNumber",
    "CustomerId",
    "Surname",
    "CreditScore",
    "Geography",
    "Gender",
    "Age",
    "Tenure",
    "Balance",
    "NumOfProducts",
    "HasCrCard",
    "IsActiveMember",
    "EstimatedSalary",
];

// Placeholder identity columns the schema requires but the model ignores.
pub const ROW_NUMBER: u32 = 1;
pub const CUSTOMER_ID: u32 = 10001;
pub const SURNAME: &str = "Smith";

#[derive(Debug, Serialize)]
pub struct ScoringRequest {
    pub input_data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub columns: Vec<&'static str>,
    pub index: Vec<u32>,
    pub data: Vec<Vec<Value>>,
}

impl ScoringRequest {
    pub fn from_record(record: &CustomerRecord) -> Self {
        let row = vec![
            json!(ROW_NUMBER),
            json!(CUSTOMER_ID),
            json!(SURNAME),
            json!(record.credit_score),
            json!(record.geography.as_str()),
            json!(record.gender.code()),
            json!(record.age),
            json!(record.tenure),
            json!(record.balance),
            json!(record.num_products),
            json!(u8::from(record.has_credit_card)),
            json!(u8::from(record.is_active_member)),
            json!(record.estimated_salary),
        ];

        Self {
            input_data: InputData {
                columns: COLUMNS.to_vec(),
                index: vec![0],
                data: vec![row],
            },
        }
    }
}

/// Reads the prediction out of either `[p, ...]` or `{"result": [p, ...]}`.
///
/// An empty prediction array is an error. A body of any other shape is `Indeterminate`.
pub fn parse_prediction(body: &Value) -> Result<PredictionResult> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("result") {
            Some(Value::Array(items)) => items,
            _ => return Ok(PredictionResult::Indeterminate),
        },
        _ => return Ok(PredictionResult::Indeterminate),
    };

    items
        .first()
        .map(PredictionResult::from_raw)
        .ok_or_else(|| ChurnError::MalformedResponse {
            service: SERVICE.to_string(),
            message: "prediction array is empty".to_string(),
        })
}

pub struct ScoringClient {
    config: ScoringConfig,
    client: Client,
}

impl ScoringClient {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl ChurnScorer for ScoringClient {
    async fn predict(&self, record: &CustomerRecord) -> Result<PredictionResult> {
        let payload = ScoringRequest::from_record(record);

        tracing::debug!("Posting scoring request to: {}", self.config.endpoint);
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Scoring response status: {}", status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ChurnError::UnexpectedStatus {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ChurnError::MalformedResponse {
                service: SERVICE.to_string(),
                message: format!("body is not JSON: {}", e),
            })?;

        let prediction = parse_prediction(&body)?;
        if prediction == PredictionResult::Indeterminate {
            tracing::warn!("Scoring response had no usable prediction: {}", body);
        } else {
            tracing::info!("Prediction: {:?}", prediction);
        }

        Ok(prediction)
    }
}
