//! Rounding and guarded arithmetic shared by every formula.
//!
//! Results are rounded half-up (toward positive infinity on a tie).
//! Discount factor schedules round up instead; see [`ceil_dp`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::FinanceError;
use crate::FinanceResult;

/// Decimal places for monetary and percentage results.
pub const MONEY_DP: u32 = 2;

/// Decimal places for discount factors.
pub const FACTOR_DP: u32 = 3;

/// Longest row-per-period schedule (discount factors, amortization,
/// depreciation): 1000 years of monthly periods.
pub const MAX_SCHEDULE_PERIODS: u32 = 12_000;

/// Round to `dp` places, ties toward positive infinity.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let scale = Decimal::from(10u64.pow(dp));
    match value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(dec!(0.5)))
    {
        Some(shifted) => (shifted.floor() / scale).round_dp(dp),
        None => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
    }
}

/// Round to two decimal places, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, MONEY_DP)
}

/// Round up (ceiling) to `dp` places.
pub fn ceil_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::ToPositiveInfinity)
}

/// True when `a` and `b` print identically at `dp` fixed decimals.
pub fn agree_to(a: Decimal, b: Decimal, dp: u32) -> bool {
    a.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        == b.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `base^exponent`, or `None` when the result is undefined or overflows.
///
/// Integral exponents use exact repeated multiplication; fractional ones
/// need a positive base.
pub fn checked_pow(base: Decimal, exponent: Decimal) -> Option<Decimal> {
    if exponent.fract().is_zero() {
        let exp = exponent.to_i64()?;
        if base.is_zero() && exp < 0 {
            return None;
        }
        return base.checked_powi(exp);
    }
    if base <= Decimal::ZERO {
        return None;
    }
    base.checked_powd(exponent)
}

/// Like [`checked_pow`], reporting failure as invalid input on `field`.
pub fn pow(base: Decimal, exponent: Decimal, field: &str) -> FinanceResult<Decimal> {
    checked_pow(base, exponent).ok_or_else(|| FinanceError::InvalidInput {
        field: field.into(),
        reason: format!("{base} raised to {exponent} is undefined or out of range"),
    })
}

/// Guarded division: a zero or overflowing quotient is invalid input.
pub fn divide(
    numerator: Decimal,
    denominator: Decimal,
    field: &str,
    context: &str,
) -> FinanceResult<Decimal> {
    if denominator.is_zero() {
        return Err(FinanceError::zero_denominator(field, context));
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| FinanceError::overflow(field, context))
}

/// Guarded addition: overflow is invalid input on `field`.
pub fn add(a: Decimal, b: Decimal, field: &str, context: &str) -> FinanceResult<Decimal> {
    a.checked_add(b).ok_or_else(|| FinanceError::overflow(field, context))
}

/// Guarded subtraction.
pub fn sub(a: Decimal, b: Decimal, field: &str, context: &str) -> FinanceResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| FinanceError::overflow(field, context))
}

/// Guarded multiplication.
pub fn mul(a: Decimal, b: Decimal, field: &str, context: &str) -> FinanceResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| FinanceError::overflow(field, context))
}

/// Guarded running total.
pub fn sum<'a, I>(values: I, field: &str, context: &str) -> FinanceResult<Decimal>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, *v, field, context))
}

/// Reject schedules longer than [`MAX_SCHEDULE_PERIODS`] before building them.
pub fn schedule_length(count: u32, field: &str) -> FinanceResult<u32> {
    if count > MAX_SCHEDULE_PERIODS {
        return Err(FinanceError::InvalidInput {
            field: field.into(),
            reason: format!(
                "Schedule of {count} periods exceeds the limit of {MAX_SCHEDULE_PERIODS}"
            ),
        });
    }
    Ok(count)
}
