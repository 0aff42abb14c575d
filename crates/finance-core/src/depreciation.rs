use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::precision::{add, divide, mul, schedule_length, sub};
use crate::types::*;
use crate::FinanceResult;

/// Default declining-balance factor (double declining).
pub const DEFAULT_DDB_FACTOR: Decimal = dec!(2);

/// Straight-line depreciation per period: `(cost - salvage) / life`
pub fn sln(cost: Money, salvage: Money, life: Decimal) -> FinanceResult<Money> {
    let base = sub(cost, salvage, "cost", "Depreciable base")?;
    divide(base, life, "life", "Straight-line useful life")
}

/// Sum-of-years'-digits depreciation for `period` (1-based).
///
/// `(cost - salvage) · (life - period + 1) · 2 / (life · (life + 1))`
pub fn syd(cost: Money, salvage: Money, life: Decimal, period: u32) -> FinanceResult<Money> {
    validate_life_and_period(life, period)?;
    let remaining = life - Decimal::from(period) + Decimal::ONE;
    let next = add(life, Decimal::ONE, "life", "Sum of years' digits")?;
    let digits = mul(life, next, "life", "Sum of years' digits")? / dec!(2);
    let base = sub(cost, salvage, "cost", "Depreciable base")?;
    let weighted = mul(base, remaining, "cost", "Depreciable base")?;
    divide(weighted, digits, "life", "Sum of years' digits")
}

/// Declining-balance depreciation for `period` (1-based) at `factor / life`
/// per period, never taking book value below `salvage`.
///
/// `factor` defaults to 2 (double declining balance).
pub fn ddb(
    cost: Money,
    salvage: Money,
    life: Decimal,
    period: u32,
    factor: Option<Decimal>,
) -> FinanceResult<Money> {
    let factor = factor.unwrap_or(DEFAULT_DDB_FACTOR);
    if cost < Decimal::ZERO || salvage < Decimal::ZERO || factor <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "cost / salvage / factor".into(),
            reason: "Cost and salvage cannot be negative and factor must be positive".into(),
        });
    }
    validate_life_and_period(life, period)?;
    schedule_length(period, "period")?;

    let rate = divide(factor, life, "factor", "Declining-balance rate")?;
    let mut book_value = cost;
    let mut depreciation = Decimal::ZERO;
    for _ in 1..=period {
        depreciation = declining_step(book_value, salvage, rate)?;
        book_value -= depreciation;
    }
    Ok(depreciation)
}

// Book value stays within [salvage, cost] here, so only the charge can overflow.
fn declining_step(book_value: Money, salvage: Money, rate: Decimal) -> FinanceResult<Money> {
    let charge = mul(book_value, rate, "factor", "Declining-balance charge")?;
    if book_value - charge < salvage {
        Ok((book_value - salvage).max(Decimal::ZERO))
    } else {
        Ok(charge)
    }
}

fn validate_life_and_period(life: Decimal, period: u32) -> FinanceResult<()> {
    if life <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "life".into(),
            reason: "Useful life must be positive".into(),
        });
    }
    if period == 0 || Decimal::from(period) > life {
        return Err(FinanceError::InvalidInput {
            field: "period".into(),
            reason: format!("Period must be between 1 and the useful life ({life})"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Depreciation method for a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    StraightLine,
    SumOfYearsDigits,
    DecliningBalance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        factor: Option<Decimal>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationInput {
    pub cost: Money,
    pub salvage: Money,
    /// Useful life in whole periods
    pub life: u32,
    pub method: DepreciationMethod,
}

/// A single period in the depreciation schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationPeriod {
    pub period: u32,
    pub depreciation: Money,
    pub accumulated: Money,
    pub book_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationOutput {
    pub periods: Vec<DepreciationPeriod>,
    pub total_depreciation: Money,
    pub ending_book_value: Money,
}

/// Period-by-period depreciation schedule over the whole useful life.
pub fn depreciation_schedule(
    input: &DepreciationInput,
) -> FinanceResult<ComputationOutput<DepreciationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.life == 0 {
        return Err(FinanceError::InvalidInput {
            field: "life".into(),
            reason: "Useful life must be at least 1 period".into(),
        });
    }
    if input.salvage > input.cost {
        warnings.push(format!(
            "Salvage ({}) exceeds cost ({}); depreciation will be negative",
            input.salvage, input.cost
        ));
    }

    schedule_length(input.life, "life")?;

    let life = Decimal::from(input.life);
    let mut periods = Vec::new();
    let mut accumulated = Decimal::ZERO;
    let mut book_value = input.cost;

    let (methodology, ddb_rate) = match input.method {
        DepreciationMethod::StraightLine => ("Straight-line depreciation", None),
        DepreciationMethod::SumOfYearsDigits => ("Sum-of-years'-digits depreciation", None),
        DepreciationMethod::DecliningBalance { factor } => {
            let factor = factor.unwrap_or(DEFAULT_DDB_FACTOR);
            // Validates cost, salvage and factor once up front.
            ddb(input.cost, input.salvage, life, 1, Some(factor))?;
            ("Declining-balance depreciation", Some(factor / life))
        }
    };

    for period in 1..=input.life {
        let depreciation = match (&input.method, ddb_rate) {
            (DepreciationMethod::StraightLine, _) => sln(input.cost, input.salvage, life)?,
            (DepreciationMethod::SumOfYearsDigits, _) => syd(input.cost, input.salvage, life, period)?,
            (DepreciationMethod::DecliningBalance { .. }, Some(rate)) => {
                declining_step(book_value, input.salvage, rate)?
            }
            (DepreciationMethod::DecliningBalance { .. }, None) => Decimal::ZERO,
        };
        accumulated = add(accumulated, depreciation, "cost", "Accumulated depreciation")?;
        book_value = sub(book_value, depreciation, "cost", "Book value")?;
        periods.push(DepreciationPeriod {
            period,
            depreciation,
            accumulated,
            book_value,
        });
    }

    if ddb_rate.is_some() && book_value > input.salvage {
        warnings.push(format!(
            "Declining balance leaves {} above salvage at end of life",
            book_value - input.salvage
        ));
    }

    let output = DepreciationOutput {
        periods,
        total_depreciation: accumulated,
        ending_book_value: book_value,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}
