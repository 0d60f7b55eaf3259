//! Error types for cashbook-config

use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML format: {message}")]
    InvalidYaml { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field value: {field} - {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// Hints printed under the error on startup
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ConfigError::FileNotFound { .. } => vec![
                "Use --config to point at an existing file.".to_string(),
                "Run with --init-config to write a default configuration.".to_string(),
            ],
            ConfigError::MissingField { field } => {
                vec![format!("Add the '{}' field to your config file.", field)]
            }
            ConfigError::InvalidValue { reason, .. } => vec![reason.clone()],
            _ => Vec::new(),
        }
    }

    /// The message followed by its suggestions, one per line
    pub fn report(&self) -> String {
        let mut text = self.to_string();
        for suggestion in self.suggestions() {
            text.push_str("\n  - ");
            text.push_str(&suggestion);
        }
        text
    }
}

/// Result type with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_suggests_init() {
        let error = ConfigError::FileNotFound { path: "/etc/cashbook.yaml".to_string() };
        let report = error.report();
        assert!(report.starts_with("File not found: /etc/cashbook.yaml"));
        assert!(report.contains("--init-config"));
    }

    #[test]
    fn test_invalid_value_report_carries_reason() {
        let error = ConfigError::InvalidValue {
            field: "server.port".to_string(),
            reason: "Port must be greater than 0".to_string(),
        };
        assert_eq!(error.suggestions(), vec!["Port must be greater than 0".to_string()]);
        assert!(error.report().contains("server.port"));
    }

    #[test]
    fn test_validation_error_has_no_suggestions() {
        let error = ConfigError::ValidationError { message: "separators".to_string() };
        assert_eq!(error.report(), "Validation error: separators");
    }
}
