use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceError;
use crate::precision::{add, divide, mul, pow, round_money, sub};
use crate::types::{FractionalRate, Money, Years};
use crate::FinanceResult;

/// Return on Investment, percent. The sign of `initial_investment` is ignored.
pub fn roi(initial_investment: Money, earnings: Money) -> FinanceResult<Decimal> {
    let invested = initial_investment.abs();
    let gain = sub(earnings, invested, "earnings", "Investment gain")?;
    let ratio = divide(gain, invested, "initial_investment", "ROI")?;
    Ok(round_money(mul(ratio, dec!(100), "earnings", "ROI percentage")?))
}

/// Compound Annual Growth Rate, percent.
pub fn cagr(beginning_value: Money, ending_value: Money, periods: Years) -> FinanceResult<Decimal> {
    let growth = divide(ending_value, beginning_value, "beginning_value", "CAGR growth")?;
    let exponent = divide(Decimal::ONE, periods, "periods", "CAGR exponent")?;
    if growth < Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "ending_value".into(),
            reason: "Beginning and ending values must share a sign".into(),
        });
    }
    let annual = pow(growth, exponent, "periods")? - Decimal::ONE;
    Ok(round_money(mul(annual, dec!(100), "ending_value", "CAGR percentage")?))
}

/// Inflation-adjusted return, percent: `100 · ((1 + r) / (1 + i) - 1)`.
///
/// Both inputs are fractional (8% is `0.08`). Not rounded.
pub fn iar(investment_return: FractionalRate, inflation_rate: FractionalRate) -> FinanceResult<Decimal> {
    let nominal = add(Decimal::ONE, investment_return.value(), "investment_return", "Nominal growth")?;
    let inflation = add(Decimal::ONE, inflation_rate.value(), "inflation_rate", "Inflation growth")?;
    let real = divide(nominal, inflation, "inflation_rate", "Inflation adjustment")?;
    mul(dec!(100), real - Decimal::ONE, "investment_return", "Real return percentage")
}
