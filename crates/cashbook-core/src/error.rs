//! Error types for cashbook-core
//!
//! Every failure of a ledger operation carries a stable code, a severity and
//! optional suggestions so the API layer can render it without matching on
//! variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Date string not in `dd/mm/yyyy` form
    InvalidDate,
    /// Account not found
    AccountNotFound,
    /// Itemized transaction not found
    TransactionNotFound,
    /// Aggregate field derived from itemized transactions
    ReadOnlyField,
    /// Edit attempted on a multi-day range view
    RangeReadOnly,
    /// Validation error
    ValidationError,
    /// Duplicate entry
    DuplicateEntry,
    /// Persistence layer failure
    StorageError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::ReadOnlyField => write!(f, "READ_ONLY_FIELD"),
            ErrorCode::RangeReadOnly => write!(f, "RANGE_READ_ONLY"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    /// Operation rejected, ledger unchanged
    Warning,
    /// Operation failed
    Error,
    /// Application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for cashbook-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid date: {input} (expected dd/mm/yyyy)")]
    InvalidDate { input: String },

    #[error("Account not found: {name}")]
    AccountNotFound { name: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Field is computed from itemized transactions: {field}")]
    ReadOnlyField { field: String },

    #[error("Range views are read-only")]
    RangeReadOnly,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::ReadOnlyField { .. } => ErrorCode::ReadOnlyField,
            CoreError::RangeReadOnly => ErrorCode::RangeReadOnly,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::Storage(_) => ErrorCode::StorageError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidDate { .. } => ErrorSeverity::Warning,
            CoreError::AccountNotFound { .. } => ErrorSeverity::Info,
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::ReadOnlyField { .. } => ErrorSeverity::Warning,
            CoreError::RangeReadOnly => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Warning,
            CoreError::Storage(_) => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidDate { .. } => {
                details = details.with_suggestion(
                    "Use the dd/mm/yyyy format, or dd-mm-yyyy inside URL paths.".to_string(),
                );
            }
            CoreError::AccountNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/days/{date} endpoint to list the accounts of a day.".to_string(),
                );
            }
            CoreError::ReadOnlyField { field } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
                details = details.with_suggestion(
                    "Add or remove itemized transactions instead of editing the total.".to_string(),
                );
            }
            CoreError::RangeReadOnly => {
                details = details.with_suggestion(
                    "Select a single day to edit its accounts.".to_string(),
                );
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
            }
            CoreError::Storage(_) => {
                details = details.with_suggestion(
                    "The ledger file may be unreadable or locked; check the data path.".to_string(),
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidDate.to_string(), "INVALID_DATE");
        assert_eq!(ErrorCode::ReadOnlyField.to_string(), "READ_ONLY_FIELD");
        assert_eq!(ErrorCode::StorageError.to_string(), "STORAGE_ERROR");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::RangeReadOnly).unwrap();
        assert_eq!(json, "\"RANGE_READ_ONLY\"");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::RangeReadOnly.severity(), ErrorSeverity::Warning);
        let error = CoreError::InternalError { message: "x".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        let error = CoreError::Storage(StoreError::Io { message: "disk".to_string() });
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.code(), ErrorCode::StorageError);
    }

    #[test]
    fn test_read_only_field_details() {
        let error = CoreError::ReadOnlyField { field: "entradas".to_string() };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::ReadOnlyField);
        assert_eq!(details.details, Some(serde_json::json!({ "field": "entradas" })));
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_details_display() {
        let details = ErrorDetails::new(ErrorCode::ValidationError, "bad".to_string())
            .with_suggestion("fix it".to_string());
        let text = details.to_string();
        assert!(text.starts_with("[VALIDATION_ERROR] bad"));
        assert!(text.contains("  - fix it"));
    }
}
