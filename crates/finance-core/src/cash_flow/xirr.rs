use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cash_flow::discounting::{
    dated_npv, dated_npv_derivative, require_equal_lengths, require_sign_mix, year_fractions,
};
use crate::precision::{agree_to, round_money};
use crate::types::{FractionalRate, Money, PercentRate, Years};
use crate::FinanceResult;

/// Default Newton iteration cap for XIRR.
pub const MAX_XIRR_ITERATIONS: u32 = 100;

/// Successive guesses must agree to this many decimal places.
pub const XIRR_AGREEMENT_DP: u32 = 5;

/// Iteration policy for XIRR's Newton solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewtonPolicy {
    pub max_iterations: u32,
    pub agreement_dp: u32,
}

impl Default for NewtonPolicy {
    fn default() -> Self {
        NewtonPolicy {
            max_iterations: MAX_XIRR_ITERATIONS,
            agreement_dp: XIRR_AGREEMENT_DP,
        }
    }
}

/// Extended IRR for irregularly dated cash flows.
///
/// Durations are measured from `dates[0]` in 365-day years, as absolute
/// values. Newton's method starts from `guess` (fractional, default 0) and
/// stops once two successive guesses agree to 5 decimal places. The
/// converged rate is returned percent-scaled and rounded to 2 decimals.
///
/// Returns `Ok(None)` when the iteration does not converge within 100 steps,
/// or reaches a point where the valuation or its derivative is undefined.
/// Malformed input (unequal lengths, no sign change) is still an error.
pub fn xirr(
    cash_flows: &[Money],
    dates: &[NaiveDate],
    guess: Option<FractionalRate>,
) -> FinanceResult<Option<PercentRate>> {
    xirr_with_policy(cash_flows, dates, guess, &NewtonPolicy::default())
}

/// [`xirr`] with an explicit iteration policy.
pub fn xirr_with_policy(
    cash_flows: &[Money],
    dates: &[NaiveDate],
    guess: Option<FractionalRate>,
    policy: &NewtonPolicy,
) -> FinanceResult<Option<PercentRate>> {
    require_equal_lengths(cash_flows, dates)?;
    require_sign_mix("XIRR", cash_flows)?;

    let durations = year_fractions(dates);
    let mut current = guess.unwrap_or_default().value();

    for _iteration in 1..=policy.max_iterations {
        let Some(next) = newton_step(current, cash_flows, &durations) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(iteration = _iteration, guess = %current, "XIRR step undefined");
            return Ok(None);
        };

        if agree_to(current, next, policy.agreement_dp) {
            #[cfg(feature = "tracing")]
            tracing::debug!(iterations = _iteration, rate = %next, "XIRR converged");
            return Ok(next.checked_mul(Decimal::ONE_HUNDRED).map(|pct| PercentRate(round_money(pct))));
        }
        current = next;
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(
        iterations = policy.max_iterations,
        guess = %current,
        "XIRR did not converge"
    );
    Ok(None)
}

/// `r - f(r) / f'(r)`, or `None` if either term is undefined or f' is zero.
fn newton_step(rate: Decimal, cash_flows: &[Money], durations: &[Years]) -> Option<Decimal> {
    let rate = FractionalRate(rate);
    let value = dated_npv(rate, cash_flows, durations)?;
    let slope = dated_npv_derivative(rate, cash_flows, durations)?;
    if slope.is_zero() {
        return None;
    }
    rate.value().checked_sub(value.checked_div(slope)?)
}
