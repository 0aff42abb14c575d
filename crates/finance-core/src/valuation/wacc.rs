use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::precision::{add, divide, mul, round_half_up, sub};
use crate::types::{with_metadata, ComputationOutput, Money, PercentRate};
use crate::FinanceResult;

/// Input parameters for Weighted Average Cost of Capital calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccInput {
    /// Market value of equity
    pub market_value_of_equity: Money,
    /// Market value of debt
    pub market_value_of_debt: Money,
    /// Cost of equity (percent-scaled)
    pub cost_of_equity: PercentRate,
    /// Pre-tax cost of debt (percent-scaled)
    pub cost_of_debt: PercentRate,
    /// Marginal corporate tax rate (percent-scaled)
    pub tax_rate: PercentRate,
}

/// Output of the WACC calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccOutput {
    /// Weighted average cost of capital, percent, rounded to 1 decimal
    pub wacc: Decimal,
    /// E / V
    pub equity_weight: Decimal,
    /// D / V
    pub debt_weight: Decimal,
    /// Kd * (1 - t), percent
    pub after_tax_cost_of_debt: Decimal,
    /// V = E + D
    pub total_value: Money,
}

struct Weights {
    equity: Decimal,
    debt: Decimal,
    total: Money,
}

fn weights(equity: Money, debt: Money) -> FinanceResult<Weights> {
    let total = add(equity, debt, "market_value_of_equity + market_value_of_debt", "Total capital")?;
    Ok(Weights {
        equity: divide(equity, total, "market_value_of_equity + market_value_of_debt", "WACC capital weight")?,
        debt: divide(debt, total, "market_value_of_equity + market_value_of_debt", "WACC capital weight")?,
        total,
    })
}

fn after_tax(cost_of_debt: PercentRate, tax_rate: PercentRate) -> FinanceResult<Decimal> {
    let retained = sub(Decimal::ONE, tax_rate.as_fraction(), "tax_rate", "Tax shield")?;
    mul(cost_of_debt.value(), retained, "cost_of_debt", "After-tax cost of debt")
}

/// Weighted Average Cost of Capital, percent rounded to 1 decimal.
///
/// WACC = E/V · Re + D/V · Rd · (1 - T), every rate percent-scaled.
pub fn wacc(
    market_value_of_equity: Money,
    market_value_of_debt: Money,
    cost_of_equity: PercentRate,
    cost_of_debt: PercentRate,
    tax_rate: PercentRate,
) -> FinanceResult<Decimal> {
    let w = weights(market_value_of_equity, market_value_of_debt)?;
    let equity_part = mul(w.equity, cost_of_equity.value(), "cost_of_equity", "Weighted cost of equity")?;
    let debt_part = mul(w.debt, after_tax(cost_of_debt, tax_rate)?, "cost_of_debt", "Weighted cost of debt")?;
    let blended = add(equity_part, debt_part, "cost_of_equity", "WACC")?;
    Ok(round_half_up(blended, 1))
}

/// WACC with its building blocks and reasonableness warnings.
pub fn calculate_wacc(input: &WaccInput) -> FinanceResult<ComputationOutput<WaccOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_wacc_input(input)?;

    let w = weights(input.market_value_of_equity, input.market_value_of_debt)?;
    let wacc_value = wacc(
        input.market_value_of_equity,
        input.market_value_of_debt,
        input.cost_of_equity,
        input.cost_of_debt,
        input.tax_rate,
    )?;

    if input.cost_of_debt > input.cost_of_equity {
        warnings.push(format!(
            "Cost of debt ({}) exceeds cost of equity ({}); verify inputs",
            input.cost_of_debt, input.cost_of_equity
        ));
    }
    if wacc_value > dec!(20) {
        warnings.push(format!(
            "WACC of {wacc_value}% exceeds 20%; appropriate for high-risk situations only"
        ));
    }

    let output = WaccOutput {
        wacc: wacc_value,
        equity_weight: w.equity,
        debt_weight: w.debt,
        after_tax_cost_of_debt: after_tax(input.cost_of_debt, input.tax_rate)?,
        total_value: w.total,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "WACC from market-value capital weights",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_wacc_input(input: &WaccInput) -> FinanceResult<()> {
    if input.market_value_of_equity < Decimal::ZERO || input.market_value_of_debt < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "market_value_of_equity / market_value_of_debt".into(),
            reason: "Market values cannot be negative".into(),
        });
    }
    if input.tax_rate.value() < Decimal::ZERO || input.tax_rate.value() > dec!(100) {
        return Err(FinanceError::InvalidInput {
            field: "tax_rate".into(),
            reason: "Tax rate must be between 0 and 100".into(),
        });
    }
    Ok(())
}
