#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_secret, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";
pub const DEFAULT_DEPLOYMENT: &str = "gpt-explainer";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 600;

pub const ENV_ML_ENDPOINT: &str = "AZURE_ML_ENDPOINT";
pub const ENV_ML_TOKEN: &str = "AZURE_ML_TOKEN";
pub const ENV_OPENAI_BASE: &str = "AZURE_OPENAI_BASE";
pub const ENV_OPENAI_KEY: &str = "AZURE_OPENAI_KEY";
pub const ENV_OPENAI_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_OPENAI_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";

/// Settings for the hosted scoring model.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    pub endpoint: String,
    pub token: String,
    pub timeout_seconds: Option<u64>,
}

/// Settings for the chat-completion deployment that writes explanations.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainerConfig {
    pub api_base: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: Option<u64>,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: None,
        }
    }
}

// Secrets stay out of Debug output so `--verbose` never prints them.
impl std::fmt::Debug for ScoringConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl std::fmt::Debug for ExplainerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainerConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ScoringConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl ExplainerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// `{api_base}/openai/deployments/{deployment}/chat/completions`
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.api_base.trim_end_matches('/'),
            self.deployment
        )
    }
}

/// Process-wide settings, built once at startup and handed to the clients.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub explainer: ExplainerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys become empty and are
    /// reported by validation.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        let explainer_defaults = ExplainerConfig::default();

        Self {
            scoring: ScoringConfig {
                endpoint: get(ENV_ML_ENDPOINT),
                token: get(ENV_ML_TOKEN),
                timeout_seconds: None,
            },
            explainer: ExplainerConfig {
                api_base: get(ENV_OPENAI_BASE),
                api_key: get(ENV_OPENAI_KEY),
                api_version: lookup(ENV_OPENAI_API_VERSION)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(explainer_defaults.api_version),
                deployment: lookup(ENV_OPENAI_DEPLOYMENT)
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or(explainer_defaults.deployment),
                ..ExplainerConfig::default()
            },
        }
    }

    pub fn validate_scoring(&self) -> Result<()> {
        validate_url("scoring.endpoint (AZURE_ML_ENDPOINT)", &self.scoring.endpoint)?;
        validate_secret("scoring.token (AZURE_ML_TOKEN)", &self.scoring.token)?;
        Ok(())
    }

    pub fn validate_explainer(&self) -> Result<()> {
        let explainer = &self.explainer;
        validate_url("explainer.api_base (AZURE_OPENAI_BASE)", &explainer.api_base)?;
        validate_secret("explainer.api_key (AZURE_OPENAI_KEY)", &explainer.api_key)?;
        validate_non_empty_string("explainer.api_version", &explainer.api_version)?;
        validate_non_empty_string("explainer.deployment", &explainer.deployment)?;
        validate_range("explainer.temperature", explainer.temperature, 0.0, 2.0)?;
        validate_range("explainer.max_tokens", explainer.max_tokens, 1, u32::MAX)?;
        Ok(())
    }

    /// Explainer settings only matter when explanations are requested.
    pub fn validate_for(&self, explain: bool) -> Result<()> {
        self.validate_scoring()?;
        if explain {
            self.validate_explainer()?;
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_for(true)
    }
}
