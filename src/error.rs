//! Error types for the mortgage calculator.

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type MortgageResult<T> = Result<T, MortgageError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MortgageError {
    /// The payment frequency code is not one of the supported codes.
    #[error("Frequency: {code} is not valid")]
    InvalidFrequency { code: String },

    /// The prepayment frequency code is neither "once", "Y" nor a period count.
    #[error("Prepayment frequency: {code} is not valid")]
    InvalidPrepaymentFrequency { code: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A computed amount is NaN or infinite and cannot be rounded to cents.
    #[error("Non-finite result for {field}")]
    NonFiniteResult { field: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MortgageError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::Serialization(e.to_string())
    }
}
