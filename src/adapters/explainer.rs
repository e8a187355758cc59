use crate::config::ExplainerConfig;
use crate::domain::model::{Explanation, ExplanationRequest};
use crate::domain::ports::Explainer;
use crate::utils::error::{ChurnError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Chat completion endpoint";

pub const SYSTEM_INSTRUCTION: &str = "You are a financial analyst assistant.";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Floats keep their literal form, so `55000.0` is not shortened to `55000`.
pub fn build_prompt(request: &ExplanationRequest) -> String {
    format!(
        "
The following customer was evaluated for churn risk. Provide a detailed explanation \
of each parameter and how it may contribute to churn.

- Credit Score: {}
- Age: {}
- Balance: {:?}
- Number of Products: {}
- Has Credit Card: {}
- Is Active Member: {}
- Estimated Salary: {:?}

Explain clearly in plain business terms for a non-technical audience.
",
        request.credit_score,
        request.age,
        request.balance,
        request.num_products,
        yes_no(request.has_credit_card),
        yes_no(request.is_active_member),
        request.estimated_salary,
    )
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatRequest {
    pub fn new(config: &ExplainerConfig, request: &ExplanationRequest) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(request),
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Azure OpenAI style chat-completion client.
pub struct ChatExplainer {
    config: ExplainerConfig,
    client: Client,
}

impl ChatExplainer {
    pub fn new(config: ExplainerConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    async fn request_explanation(&self, request: &ExplanationRequest) -> Result<String> {
        let url = self.config.chat_completions_url();
        let body = ChatRequest::new(&self.config, request);

        tracing::debug!(
            "Requesting explanation from deployment '{}' at {}",
            self.config.deployment,
            url
        );
        let response = self
            .client
            .post(&url)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Chat completion response status: {}", status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ChurnError::UnexpectedStatus {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ChurnError::MalformedResponse {
                service: SERVICE.to_string(),
                message: e.to_string(),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChurnError::MalformedResponse {
                service: SERVICE.to_string(),
                message: "no message content in choices".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl Explainer for ChatExplainer {
    async fn explain(&self, request: &ExplanationRequest) -> Explanation {
        match self.request_explanation(request).await {
            Ok(text) => Explanation::Text(text),
            Err(e) => {
                tracing::warn!("Explanation failed: {}", e);
                Explanation::Failed(e.to_string())
            }
        }
    }
}
