use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdviceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdviceError::ConfigError { .. }
            | AdviceError::ConfigValidationError { .. }
            | AdviceError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AdviceError::HttpClientError(_) => ErrorCategory::Network,
            AdviceError::IoError(_) | AdviceError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdviceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            AdviceError::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            AdviceError::ConfigError { message } => format!("Configuration problem: {}", message),
            AdviceError::HttpClientError(_) => {
                "Could not set up the completion provider client".to_string()
            }
            AdviceError::IoError(e) => format!("File system error: {}", e),
            AdviceError::ServerError { message } => format!("Server failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and the OPENAI_API_BASE / OOB_* environment variables"
            }
            ErrorCategory::Network => "Check network access to the completion provider",
            ErrorCategory::System => "Check that the bind address is free and files are readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdviceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = AdviceError::InvalidConfigValueError {
            field: "model".to_string(),
            value: " ".to_string(),
            reason: "Value cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("model"));
    }

    #[test]
    fn test_server_error_is_critical() {
        let err = AdviceError::ServerError {
            message: "address in use".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
