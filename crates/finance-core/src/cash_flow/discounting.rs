//! Cash-flow valuation used by the root-finders.
//!
//! All functions here are unrounded. `None` means the valuation is undefined
//! at the requested rate (a rate at or below -100%, or a discount factor that
//! leaves the 128-bit decimal range).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceError;
use crate::precision::checked_pow;
use crate::types::{FractionalRate, Money, PercentRate, Years};
use crate::FinanceResult;

/// Days per year for XIRR durations.
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// NPV of uniformly spaced flows, `cf[0] + Σ cf[i] / (1 + r)^i`.
pub fn npv_at(rate: PercentRate, cash_flows: &[Money]) -> Option<Money> {
    let one_plus_r = Decimal::ONE + rate.as_fraction();
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    let mut result = Decimal::ZERO;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            match discount.checked_mul(one_plus_r) {
                Some(d) => discount = d,
                // Every later term rounds to zero.
                None => break,
            }
        }
        result = result.checked_add(cf.checked_div(discount)?)?;
    }

    Some(result)
}

/// Elapsed years from the first date, `|date[i] - date[0]| / 365`.
///
/// The absolute value means a date earlier than the first one still yields a
/// positive duration. Callers should pass dates in chronological order.
pub fn year_fractions(dates: &[NaiveDate]) -> Vec<Years> {
    let Some(first) = dates.first() else {
        return Vec::new();
    };
    dates
        .iter()
        .map(|date| Decimal::from((*date - *first).num_days().abs()) / DAYS_PER_YEAR)
        .collect()
}

/// NPV of dated flows, `Σ cf[i] / (1 + r)^d[i]`.
pub fn dated_npv(rate: FractionalRate, cash_flows: &[Money], durations: &[Years]) -> Option<Money> {
    let one_plus_r = Decimal::ONE.checked_add(rate.value())?;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    cash_flows
        .iter()
        .zip(durations)
        .try_fold(Decimal::ZERO, |acc, (cf, d)| {
            let discount = checked_pow(one_plus_r, *d)?;
            acc.checked_add(cf.checked_div(discount)?)
        })
}

/// Derivative of [`dated_npv`] with respect to the rate,
/// `Σ -cf[i]·d[i]·(1 + r)^(-1 - d[i])`.
pub fn dated_npv_derivative(
    rate: FractionalRate,
    cash_flows: &[Money],
    durations: &[Years],
) -> Option<Money> {
    let one_plus_r = Decimal::ONE.checked_add(rate.value())?;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    cash_flows
        .iter()
        .zip(durations)
        .try_fold(Decimal::ZERO, |acc, (cf, d)| {
            if d.is_zero() {
                return Some(acc);
            }
            let discount = checked_pow(one_plus_r, Decimal::ONE + *d)?;
            let term = (-*cf).checked_mul(*d)?.checked_div(discount)?;
            acc.checked_add(term)
        })
}

/// A rate of return exists only for a series with at least one inflow and
/// one outflow.
pub fn require_sign_mix(function: &str, cash_flows: &[Money]) -> FinanceResult<()> {
    if cash_flows.len() < 2 {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: format!("{function} requires at least 2 cash flows"),
        });
    }
    let positive = cash_flows.iter().any(|cf| *cf > Decimal::ZERO);
    let negative = cash_flows.iter().any(|cf| *cf < Decimal::ZERO);
    if !positive || !negative {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: format!("{function} requires at least one positive and one negative cash flow"),
        });
    }
    Ok(())
}

pub fn require_equal_lengths(cash_flows: &[Money], dates: &[NaiveDate]) -> FinanceResult<()> {
    if cash_flows.len() != dates.len() {
        return Err(FinanceError::InvalidInput {
            field: "dates".into(),
            reason: format!(
                "length mismatch: {} cash flows but {} dates",
                cash_flows.len(),
                dates.len()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_npv_at_matches_hand_calculation() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv_at(PercentRate(dec!(10)), &cfs).unwrap();
        // -1000 + 300/1.1 + 400/1.21 + 500/1.331 = -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_at_zero_rate_is_plain_sum() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        assert_eq!(npv_at(PercentRate(Decimal::ZERO), &cfs), Some(dec!(50)));
    }

    #[test]
    fn test_npv_at_undefined_below_minus_100() {
        let cfs = vec![dec!(-100), dec!(50)];
        assert!(npv_at(PercentRate(dec!(-100)), &cfs).is_none());
        assert!(npv_at(PercentRate(dec!(-150)), &cfs).is_none());
    }

    #[test]
    fn test_npv_at_survives_discount_overflow() {
        let mut cfs = vec![dec!(-100)];
        cfs.extend(std::iter::repeat(dec!(10)).take(200));
        let result = npv_at(PercentRate(dec!(900)), &cfs).unwrap();
        // Only the first few terms matter: -100 + 10/10 + 10/100 + ...
        assert!((result - dec!(-98.8889)).abs() < dec!(0.001));
    }

    #[test]
    fn test_year_fractions_use_365_day_year() {
        let dates = vec![date(2015, 12, 1), date(2016, 8, 1), date(2016, 8, 19)];
        let durs = year_fractions(&dates);
        assert_eq!(durs[0], Decimal::ZERO);
        assert_eq!(durs[1], Decimal::from(244) / dec!(365));
        assert_eq!(durs[2], Decimal::from(262) / dec!(365));
    }

    #[test]
    fn test_year_fractions_take_absolute_value() {
        let dates = vec![date(2020, 1, 1), date(2019, 1, 1)];
        let durs = year_fractions(&dates);
        assert_eq!(durs[1], Decimal::ONE);
    }

    #[test]
    fn test_dated_npv_and_derivative_at_zero() {
        let cfs = vec![dec!(-1000), dec!(1100)];
        let durs = vec![Decimal::ZERO, Decimal::ONE];
        assert_eq!(dated_npv(FractionalRate(Decimal::ZERO), &cfs, &durs), Some(dec!(100)));
        // d/dr of 1100/(1+r) at r=0 is -1100
        assert_eq!(
            dated_npv_derivative(FractionalRate(Decimal::ZERO), &cfs, &durs),
            Some(dec!(-1100))
        );
    }

    #[test]
    fn test_require_sign_mix() {
        assert!(require_sign_mix("IRR", &[dec!(-1), dec!(2)]).is_ok());
        assert!(require_sign_mix("IRR", &[dec!(100), dec!(200)]).is_err());
        assert!(require_sign_mix("IRR", &[dec!(-100), dec!(0)]).is_err());
        assert!(require_sign_mix("IRR", &[dec!(-100)]).is_err());
    }

    #[test]
    fn test_require_equal_lengths() {
        let err = require_equal_lengths(&[dec!(-1), dec!(2)], &[date(2020, 1, 1)]).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
    }
}
