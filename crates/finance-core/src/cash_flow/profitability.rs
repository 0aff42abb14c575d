use rust_decimal::Decimal;

use crate::error::FinanceError;
use crate::precision::{add, divide, round_money};
use crate::types::{Money, PercentRate};
use crate::FinanceResult;

/// Profitability Index: present value of `cash_flows[1..]` over
/// `|cash_flows[0]|`, rounded to 2 decimals.
pub fn pi(rate: PercentRate, cash_flows: &[Money]) -> FinanceResult<Decimal> {
    let Some((initial, returns)) = cash_flows.split_first() else {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: "Profitability index requires an initial investment".into(),
        });
    };

    let one_plus_r = Decimal::ONE + rate.as_fraction();
    if one_plus_r <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut total_pv = Decimal::ZERO;
    let mut discount = Decimal::ONE;
    for cf in returns {
        discount = match discount.checked_mul(one_plus_r) {
            Some(d) => d,
            None => break,
        };
        let present = divide(*cf, discount, "rate", "Profitability index discount factor")?;
        total_pv = add(total_pv, present, "cash_flows", "Present value of returns")?;
    }

    let index = divide(
        total_pv,
        initial.abs(),
        "cash_flows",
        "Profitability index initial investment",
    )?;
    Ok(round_money(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pi_basic() {
        let cfs = [
            dec!(-40000),
            dec!(18000),
            dec!(12000),
            dec!(10000),
            dec!(9000),
            dec!(6000),
        ];
        assert_eq!(pi(PercentRate(dec!(10)), &cfs).unwrap(), dec!(1.09));
    }

    #[test]
    fn test_pi_zero_investment_is_invalid() {
        let cfs = [Decimal::ZERO, dec!(100)];
        assert!(matches!(
            pi(PercentRate(dec!(10)), &cfs),
            Err(FinanceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_pi_overflowing_returns_are_invalid() {
        let cfs = [dec!(-1), Decimal::MAX, Decimal::MAX];
        match pi(PercentRate(Decimal::ZERO), &cfs).unwrap_err() {
            FinanceError::InvalidInput { field, reason } => {
                assert_eq!(field, "cash_flows");
                assert!(reason.contains("overflows"));
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_pi_empty_is_invalid() {
        assert!(pi(PercentRate(dec!(10)), &[]).is_err());
    }
}
