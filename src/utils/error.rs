use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },
}

impl ChurnError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ChurnError::ConfigError { .. }
                | ChurnError::MissingConfigError { .. }
                | ChurnError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChurnError::HttpError(e) if e.is_timeout() => {
                "The remote service did not answer in time".to_string()
            }
            ChurnError::HttpError(e) if e.is_connect() => {
                "Could not connect to the remote service".to_string()
            }
            ChurnError::HttpError(e) => format!("Network request failed: {}", e),
            ChurnError::IoError(e) => format!("File or terminal error: {}", e),
            ChurnError::ConfigError { message } => format!("Configuration problem: {}", message),
            ChurnError::MissingConfigError { field } => {
                format!("Required setting '{}' is not set", field)
            }
            ChurnError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ChurnError::UnexpectedStatus {
                service, status, ..
            } => format!("{} rejected the request (HTTP {})", service, status),
            ChurnError::MalformedResponse { service, message } => {
                format!("{} sent a response we could not understand: {}", service, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ChurnError::HttpError(_) => "Check the endpoint URL and your network connection",
            ChurnError::IoError(_) => "Check that the file exists and is readable",
            ChurnError::MalformedResponse { .. } => {
                "Check that the endpoint is the deployed scoring or chat service"
            }
            ChurnError::ConfigError { .. } => "Fix the configuration file syntax",
            ChurnError::MissingConfigError { .. } => {
                "Set the variable in the environment, a .env file or the --config file"
            }
            ChurnError::InvalidConfigValueError { .. } => {
                "Correct the value in the environment or the --config file"
            }
            ChurnError::UnexpectedStatus { status, .. } if *status == 401 || *status == 403 => {
                "Check the bearer token or API key"
            }
            ChurnError::UnexpectedStatus { .. } => "Check the endpoint URL and deployment name",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChurnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        let missing = ChurnError::MissingConfigError {
            field: "AZURE_ML_TOKEN".to_string(),
        };
        assert!(missing.is_config_error());
        assert!(missing.user_friendly_message().contains("AZURE_ML_TOKEN"));

        let status = ChurnError::UnexpectedStatus {
            service: "Scoring endpoint".to_string(),
            status: 500,
            body: String::new(),
        };
        assert!(!status.is_config_error());
    }

    #[test]
    fn test_auth_status_suggests_credentials() {
        let err = ChurnError::UnexpectedStatus {
            service: "Scoring endpoint".to_string(),
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.recovery_suggestion(), "Check the bearer token or API key");
        assert_eq!(
            err.to_string(),
            "Scoring endpoint returned HTTP 401: unauthorized"
        );
    }

    #[test]
    fn test_json_failures_are_malformed_responses() {
        let parse_error = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ChurnError::MalformedResponse {
            service: "Scoring endpoint".to_string(),
            message: format!("body is not JSON: {}", parse_error),
        };
        assert!(!err.is_config_error());
        assert!(err
            .user_friendly_message()
            .starts_with("Scoring endpoint sent a response we could not understand: body is not JSON"));
        assert_eq!(
            err.recovery_suggestion(),
            "Check that the endpoint is the deployed scoring or chat service"
        );
    }
}
