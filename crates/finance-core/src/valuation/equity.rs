use rust_decimal::Decimal;

use crate::precision::{add, divide, mul, round_half_up, sub};
use crate::types::{FractionalRate, Money, PercentRate};
use crate::FinanceResult;

/// CAPM expected return: `rf + β · (emr - rf)`.
///
/// Inputs are percent-scaled; the result is a *fraction* and is not rounded.
pub fn capm(
    risk_free_rate: PercentRate,
    beta: Decimal,
    expected_market_return: PercentRate,
) -> FinanceResult<FractionalRate> {
    let rf = risk_free_rate.as_fraction();
    let premium = sub(expected_market_return.as_fraction(), rf, "expected_market_return", "Market risk premium")?;
    let exposure = mul(beta, premium, "beta", "Systematic risk premium")?;
    Ok(FractionalRate(add(rf, exposure, "beta", "Expected return")?))
}

/// Gordon growth value of a stock, rounded to a whole unit:
/// `d0 · (1 + g) / (ke - g)`.
pub fn stock_pv(growth_rate: PercentRate, cost_of_equity: PercentRate, last_dividend: Money) -> FinanceResult<Money> {
    let g = growth_rate.as_fraction();
    let growth = add(Decimal::ONE, g, "growth_rate", "Dividend growth factor")?;
    let next_dividend = mul(last_dividend, growth, "last_dividend", "Next dividend")?;
    let spread = sub(cost_of_equity.as_fraction(), g, "cost_of_equity", "Cost of equity less growth")?;
    let value = divide(
        next_dividend,
        spread,
        "cost_of_equity",
        "Cost of equity less growth",
    )?;
    Ok(round_half_up(value, 0))
}
