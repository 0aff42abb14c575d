use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::precision::{add, divide, sub};
use crate::types::{Money, Years};
use crate::FinanceResult;

/// Payback period in periods.
///
/// `periods == 0` selects even flows: `|cash_flows[0]| / cash_flows[1]`.
/// Any other value selects uneven flows, accumulated from `cash_flows[0]`
/// until the running total turns positive; the crossing period contributes
/// `(cumulative - cf) / cf`. A series that never pays back returns the
/// number of periods walked.
pub fn pp(periods: u32, cash_flows: &[Money]) -> FinanceResult<Years> {
    if cash_flows.len() < 2 {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: "Payback period requires an investment and at least one cash flow".into(),
        });
    }

    if periods == 0 {
        return divide(
            cash_flows[0].abs(),
            cash_flows[1],
            "cash_flows",
            "Even payback per-period cash flow",
        );
    }

    let mut cumulative = cash_flows[0];
    let mut years = Decimal::ONE;
    for cf in &cash_flows[1..] {
        cumulative = add(cumulative, *cf, "cash_flows", "Cumulative cash flow")?;
        if cumulative > Decimal::ZERO {
            let shortfall = sub(cumulative, *cf, "cash_flows", "Payback shortfall")?;
            let fraction = divide(shortfall, *cf, "cash_flows", "Payback crossing-period cash flow")?;
            return add(years, fraction, "cash_flows", "Payback period");
        }
        years += Decimal::ONE;
    }
    Ok(years)
}

/// True when the running total of `cash_flows` ever turns positive.
pub fn pays_back(cash_flows: &[Money]) -> bool {
    let mut cumulative = Decimal::ZERO;
    for cf in cash_flows {
        match cumulative.checked_add(*cf) {
            Some(next) => cumulative = next,
            // Past the decimal range in the direction of the flow.
            None => return cf.is_sign_positive(),
        }
        if cumulative > Decimal::ZERO {
            return true;
        }
    }
    false
}
