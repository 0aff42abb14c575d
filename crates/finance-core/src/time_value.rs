use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cash_flow::discounting::npv_at;
use crate::error::FinanceError;
use crate::precision::{add, ceil_dp, divide, mul, pow, round_money, schedule_length, sub, FACTOR_DP};
use crate::types::{FractionalRate, Money, PercentRate};
use crate::FinanceResult;

/// `1 + r` for a percent-scaled rate, rejecting rates at or below -100%.
fn growth_base(rate: PercentRate) -> FinanceResult<Decimal> {
    if rate.value() <= dec!(-100) {
        return Err(FinanceError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }
    Ok(Decimal::ONE + rate.as_fraction())
}

/// Present Value of a single cash flow `periods` periods out
pub fn pv(rate: PercentRate, cash_flow: Money, periods: u32) -> FinanceResult<Money> {
    let factor = pow(growth_base(rate)?, Decimal::from(periods), "periods")?;
    Ok(round_money(divide(cash_flow, factor, "rate", "PV factor")?))
}

/// Present Value one period out
pub fn pv_single(rate: PercentRate, cash_flow: Money) -> FinanceResult<Money> {
    pv(rate, cash_flow, 1)
}

/// Future Value
pub fn fv(rate: PercentRate, cash_flow: Money, periods: u32) -> FinanceResult<Money> {
    let factor = pow(growth_base(rate)?, Decimal::from(periods), "periods")?;
    Ok(round_money(mul(cash_flow, factor, "periods", "Future value")?))
}

/// Net Present Value. `cash_flows[0]` is the undiscounted initial investment.
pub fn npv(rate: PercentRate, cash_flows: &[Money]) -> FinanceResult<Money> {
    if cash_flows.is_empty() {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: "NPV requires at least an initial investment".into(),
        });
    }
    growth_base(rate)?;
    let value = npv_at(rate, cash_flows).ok_or_else(|| FinanceError::InvalidInput {
        field: "rate".into(),
        reason: "NPV is out of range at this rate".into(),
    })?;
    Ok(round_money(value))
}

/// Loan payment per period, `-principal · r / (1 - (1 + r)^-n)`.
///
/// Unlike its siblings this takes a *fractional* rate (2% is `0.02`) and the
/// result is not rounded.
pub fn pmt(rate: FractionalRate, num_payments: u32, principal: Money) -> FinanceResult<Money> {
    if num_payments == 0 {
        return Err(FinanceError::InvalidInput {
            field: "num_payments".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }
    let one_plus_r = add(Decimal::ONE, rate.value(), "rate", "PMT growth factor")?;
    let discount = pow(one_plus_r, -Decimal::from(num_payments), "rate")?;
    divide(
        mul(-principal, rate.value(), "principal", "PMT interest")?,
        sub(Decimal::ONE, discount, "rate", "PMT annuity factor")?,
        "rate",
        "PMT annuity factor",
    )
}

/// Compound Interest: `principal · (1 + r/m)^(m·t)`
pub fn ci(
    rate: PercentRate,
    compoundings_per_period: Decimal,
    principal: Money,
    periods: Decimal,
) -> FinanceResult<Money> {
    let periodic = divide(
        rate.as_fraction(),
        compoundings_per_period,
        "compoundings_per_period",
        "Compounding frequency",
    )?;
    let factor = pow(
        add(Decimal::ONE, periodic, "rate", "Periodic growth factor")?,
        mul(compoundings_per_period, periods, "periods", "Number of compoundings")?,
        "periods",
    )?;
    Ok(round_money(mul(principal, factor, "periods", "Compounded amount")?))
}

/// Discount factors `1 / (1 + r)^(i-1)` for `i` in `1..num_periods`, each
/// rounded *up* to 3 decimals. The first factor is always 1.
pub fn df(rate: PercentRate, num_periods: u32) -> FinanceResult<Vec<Decimal>> {
    let one_plus_r = growth_base(rate)?;
    let count = schedule_length(num_periods, "num_periods")?.saturating_sub(1);
    let mut factors = Vec::new();
    let mut compound = Decimal::ONE;

    for i in 0..count {
        if i > 0 {
            compound = compound
                .checked_mul(one_plus_r)
                .ok_or_else(|| FinanceError::InvalidInput {
                    field: "num_periods".into(),
                    reason: format!("Discount factor out of range at period {}", i + 1),
                })?;
        }
        let factor = divide(Decimal::ONE, compound, "rate", "Discount factor")?;
        factors.push(ceil_dp(factor, FACTOR_DP));
    }

    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pv_basic() {
        assert_eq!(pv_single(PercentRate(dec!(5)), dec!(100)).unwrap(), dec!(95.24));
        assert_eq!(pv(PercentRate(dec!(5)), dec!(100), 5).unwrap(), dec!(78.35));
    }

    #[test]
    fn test_fv_basic() {
        assert_eq!(fv(PercentRate(dec!(0.5)), dec!(1000), 12).unwrap(), dec!(1061.68));
    }

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-500000), dec!(200000), dec!(300000), dec!(200000)];
        assert_eq!(npv(PercentRate(dec!(10)), &cfs).unwrap(), dec!(80015.03));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        assert_eq!(npv(PercentRate(dec!(0.0)), &cfs).unwrap(), dec!(50));
    }

    #[test]
    fn test_npv_rejects_rate_below_minus_100() {
        let cfs = vec![dec!(-100), dec!(50)];
        assert!(npv(PercentRate(dec!(-100)), &cfs).is_err());
        assert!(npv(PercentRate(dec!(10)), &[]).is_err());
    }

    #[test]
    fn test_pmt_fractional_rate() {
        let result = pmt(FractionalRate(dec!(0.02)), 36, dec!(-1000000)).unwrap();
        assert_eq!(result.round_dp(4), dec!(39232.8526));
    }

    #[test]
    fn test_pmt_zero_rate_is_invalid() {
        assert!(matches!(
            pmt(FractionalRate(Decimal::ZERO), 12, dec!(1000)),
            Err(FinanceError::InvalidInput { .. })
        ));
        assert!(pmt(FractionalRate(dec!(0.01)), 0, dec!(1000)).is_err());
    }

    #[test]
    fn test_ci_quarterly() {
        let result = ci(PercentRate(dec!(4.3)), dec!(4), dec!(1500), dec!(6)).unwrap();
        assert_eq!(result, dec!(1938.84));
    }

    #[test]
    fn test_overflowing_inputs_are_invalid_not_panics() {
        assert!(matches!(
            pmt(FractionalRate(dec!(5)), 12, Decimal::MAX),
            Err(FinanceError::InvalidInput { .. })
        ));
        assert!(matches!(
            pmt(FractionalRate(Decimal::MAX), 12, dec!(1000)),
            Err(FinanceError::InvalidInput { .. })
        ));
        assert!(matches!(
            ci(PercentRate(dec!(5)), dec!(10000000000000000000), dec!(1), dec!(10000000000000000000)),
            Err(FinanceError::InvalidInput { .. })
        ));
        assert!(matches!(
            fv(PercentRate(dec!(10)), Decimal::MAX, 2),
            Err(FinanceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_df_huge_period_count_is_invalid() {
        assert!(matches!(
            df(PercentRate(dec!(10)), u32::MAX),
            Err(FinanceError::InvalidInput { .. })
        ));
        // Below the schedule limit the compounding itself leaves the decimal range.
        assert!(df(PercentRate(dec!(10)), 5_000).is_err());
    }

    #[test]
    fn test_ci_zero_compoundings_is_invalid() {
        assert!(ci(PercentRate(dec!(4.3)), Decimal::ZERO, dec!(1500), dec!(6)).is_err());
    }

    #[test]
    fn test_df_schedule() {
        let factors = df(PercentRate(dec!(10)), 6).unwrap();
        assert_eq!(
            factors,
            vec![dec!(1), dec!(0.91), dec!(0.827), dec!(0.752), dec!(0.684)]
        );
    }

    #[test]
    fn test_df_short_schedules() {
        assert!(df(PercentRate(dec!(10)), 0).unwrap().is_empty());
        assert!(df(PercentRate(dec!(10)), 1).unwrap().is_empty());
        assert_eq!(df(PercentRate(dec!(10)), 2).unwrap(), vec![dec!(1)]);
    }
}
