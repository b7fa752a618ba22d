//! Structured error types for configuration passes.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
///
/// Every code marks a malformed document or a broken configurer, never a
/// transient condition; nothing in the engine retries.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Document shape errors
    UnknownOperation,
    TypeMismatch,
    InvalidArgument,
    MergeConflict,

    // Region construction errors
    CountMismatch,
    ContractViolation,
    MissingContainer,

    // Render/persist errors
    BackendError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation => write!(f, "UNKNOWN_OPERATION"),
            Self::TypeMismatch => write!(f, "TYPE_MISMATCH"),
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::MergeConflict => write!(f, "MERGE_CONFLICT"),
            Self::CountMismatch => write!(f, "COUNT_MISMATCH"),
            Self::ContractViolation => write!(f, "CONTRACT_VIOLATION"),
            Self::MissingContainer => write!(f, "MISSING_CONTAINER"),
            Self::BackendError => write!(f, "BACKEND_ERROR"),
        }
    }
}

/// Structured error raised by a configuration pass.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchError {
    pub code: ErrorCode,
    pub message: String,
    /// Configuration key the error is attached to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DispatchError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            key: None,
            details: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn unknown_operation(target: &str, key: &str, allowed: &[&str]) -> Self {
        Self::new(
            ErrorCode::UnknownOperation,
            format!("{} has no operation {:?}", target, key),
        )
        .with_key(key)
        .with_details(format!("allowed keys: {}", allowed.join(", ")))
    }

    pub fn type_mismatch(key: &str, expected: &str, found: &serde_json::Value) -> Self {
        Self::new(
            ErrorCode::TypeMismatch,
            format!("{:?} must be {}, got {}", key, expected, value_kind(found)),
        )
        .with_key(key)
    }

    pub fn invalid_argument(operation: &str, reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, reason).with_key(operation)
    }

    pub fn merge_conflict(key: &str) -> Self {
        Self::new(
            ErrorCode::MergeConflict,
            format!(
                "for key {:?}, one side is a mapping and the other is not",
                key
            ),
        )
        .with_key(key)
    }

    pub fn count_mismatch(regions: usize, configs: usize) -> Self {
        Self::new(
            ErrorCode::CountMismatch,
            format!(
                "created {} region(s) but got {} region configuration(s)",
                regions, configs
            ),
        )
    }

    pub fn contract_violation(strategy: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ContractViolation,
            format!("{} broke the region contract: {}", strategy, reason),
        )
    }

    pub fn missing_container() -> Self {
        Self::new(
            ErrorCode::MissingContainer,
            "figure is not created; create at least one axes first",
        )
    }

    pub fn backend(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::BackendError, err.to_string())
    }
}

/// Short name of a JSON value's shape, for error messages.
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for DispatchError {}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for DispatchError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(dispatch_err) => dispatch_err,
            Err(err) => DispatchError::backend(err),
        }
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError::backend(err)
    }
}

/// Result type for configuration passes.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
