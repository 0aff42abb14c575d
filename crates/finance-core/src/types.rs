use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Year fractions or period counts
pub type Years = Decimal;

/// A rate written percent-scaled: 5% is `5`.
///
/// This is the convention of nearly every function in the catalog. The
/// exceptions (PMT, IAR and the XIRR starting guess) take a
/// [`FractionalRate`] instead, and the two types do not convert implicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentRate(pub Decimal);

/// A rate written as a fraction: 5% is `0.05`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FractionalRate(pub Decimal);

impl PercentRate {
    pub fn value(self) -> Decimal {
        self.0
    }

    /// `5` becomes `0.05`.
    pub fn as_fraction(self) -> Decimal {
        self.0 / dec!(100)
    }

    pub fn to_fractional(self) -> FractionalRate {
        FractionalRate(self.as_fraction())
    }
}

impl FractionalRate {
    pub fn value(self) -> Decimal {
        self.0
    }

    /// `0.05` becomes `5`, or `None` past the representable range.
    pub fn as_percent(self) -> Option<Decimal> {
        self.0.checked_mul(dec!(100))
    }

    pub fn to_percent(self) -> Option<PercentRate> {
        self.as_percent().map(PercentRate)
    }
}

impl From<Decimal> for PercentRate {
    fn from(value: Decimal) -> Self {
        PercentRate(value)
    }
}

impl From<Decimal> for FractionalRate {
    fn from(value: Decimal) -> Self {
        FractionalRate(value)
    }
}

impl fmt::Display for PercentRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl fmt::Display for FractionalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single dated cash flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatedCashFlow {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DatedCashFlow {
    /// Split a dated series into the parallel amount/date slices the
    /// root-finder consumes.
    pub fn unzip(flows: &[DatedCashFlow]) -> (Vec<Money>, Vec<NaiveDate>) {
        flows.iter().map(|cf| (cf.amount, cf.date)).unzip()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
