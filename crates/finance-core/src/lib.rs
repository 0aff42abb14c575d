pub mod amortization;
pub mod cash_flow;
pub mod error;
pub mod precision;
pub mod ratios;
pub mod returns;
pub mod time_value;
pub mod types;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "depreciation")]
pub mod depreciation;

#[cfg(feature = "fixed_income")]
pub mod fixed_income;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all finance-core operations
pub type FinanceResult<T> = Result<T, FinanceError>;
