use crate::config::AppConfig;
use crate::utils::error::{ChurnError, Result};
use regex::Regex;
use std::path::Path;

impl AppConfig {
    /// Loads settings from a TOML file, e.g.
    ///
    /// ```toml
    /// [scoring]
    /// endpoint = "${AZURE_ML_ENDPOINT}"
    /// token = "${AZURE_ML_TOKEN}"
    ///
    /// [explainer]
    /// api_base = "https://my-resource.openai.azure.com"
    /// api_key = "${AZURE_OPENAI_KEY}"
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChurnError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content, |key| std::env::var(key).ok())?;

        toml::from_str(&processed).map_err(|e| ChurnError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replaces `${VAR}` with the looked-up value. Unknown variables become empty
/// so validation reports them as missing instead of sending the placeholder.
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChurnError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| {
            tracing::warn!("Environment variable {} is not set", var_name);
            String::new()
        })
    });

    Ok(result.to_string())
}
