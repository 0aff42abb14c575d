use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinanceError {
    /// Shorthand for the zero-denominator case, reported as invalid input.
    pub(crate) fn zero_denominator(field: &str, context: &str) -> Self {
        FinanceError::InvalidInput {
            field: field.into(),
            reason: format!("{context} would divide by zero"),
        }
    }

    /// A result that leaves the 128-bit decimal range, reported as invalid input.
    pub(crate) fn overflow(field: &str, context: &str) -> Self {
        FinanceError::InvalidInput {
            field: field.into(),
            reason: format!("{context} overflows"),
        }
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(e: serde_json::Error) -> Self {
        FinanceError::SerializationError(e.to_string())
    }
}
