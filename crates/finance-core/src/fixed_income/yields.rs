use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceError;
use crate::precision::{add, divide, mul, round_money};
use crate::types::{Money, PercentRate, Years};
use crate::FinanceResult;

/// Approximate yield to maturity, percent rounded to 2 decimals.
///
/// YTM ≈ (C + (F - P) / n) / ((F + P) / 2), where `C` is the annual coupon
/// `F · coupon_rate`, `F` the face value, `P` the price and `n` the years to
/// maturity. Closed form; no iteration.
pub fn ytm(
    face_value: Money,
    price: Money,
    coupon_rate: PercentRate,
    years_to_maturity: Years,
) -> FinanceResult<Decimal> {
    if face_value <= Decimal::ZERO || price <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "face_value / price".into(),
            reason: "Face value and price must be positive".into(),
        });
    }
    let coupon = mul(face_value, coupon_rate.as_fraction(), "coupon_rate", "Annual coupon")?;
    let accretion = divide(
        face_value - price,
        years_to_maturity,
        "years_to_maturity",
        "Pull to par",
    )?;
    let average_price = add(face_value, price, "face_value / price", "Face value plus price")? / dec!(2);
    let annual_return = add(coupon, accretion, "coupon_rate", "Annual return")?;
    let yield_fraction = divide(annual_return, average_price, "price", "Average price")?;
    Ok(round_money(mul(yield_fraction, dec!(100), "coupon_rate", "Yield percentage")?))
}

/// Current yield: annual coupon over price, percent rounded to 2 decimals.
pub fn current_yield(face_value: Money, price: Money, coupon_rate: PercentRate) -> FinanceResult<Decimal> {
    let coupon = mul(face_value, coupon_rate.as_fraction(), "coupon_rate", "Annual coupon")?;
    let yield_fraction = divide(coupon, price, "price", "Current yield")?;
    Ok(round_money(mul(yield_fraction, dec!(100), "coupon_rate", "Yield percentage")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ytm_discount_bond() {
        // C = 50, (1000 - 950) / 10 = 5, average price 975 -> 5.64%
        let result = ytm(dec!(1000), dec!(950), PercentRate(dec!(5)), dec!(10)).unwrap();
        assert_eq!(result, dec!(5.64));
    }

    #[test]
    fn test_ytm_at_par_equals_coupon() {
        let result = ytm(dec!(1000), dec!(1000), PercentRate(dec!(6)), dec!(5)).unwrap();
        assert_eq!(result, dec!(6));
    }

    #[test]
    fn test_ytm_zero_years_is_invalid() {
        assert!(ytm(dec!(1000), dec!(950), PercentRate(dec!(5)), Decimal::ZERO).is_err());
        assert!(ytm(dec!(1000), Decimal::ZERO, PercentRate(dec!(5)), dec!(10)).is_err());
    }

    #[test]
    fn test_overflowing_bond_inputs_are_invalid() {
        match ytm(Decimal::MAX, Decimal::MAX, PercentRate(dec!(5)), dec!(10)).unwrap_err() {
            FinanceError::InvalidInput { reason, .. } => assert_eq!(reason, "Face value plus price overflows"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
        assert!(matches!(
            current_yield(Decimal::MAX, dec!(1), PercentRate(dec!(500))),
            Err(FinanceError::InvalidInput { .. })
        ));
        assert!(matches!(
            current_yield(Decimal::MAX, dec!(0.5), PercentRate(dec!(100))),
            Err(FinanceError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_current_yield() {
        let result = current_yield(dec!(1000), dec!(950), PercentRate(dec!(5))).unwrap();
        // 50 / 950
        assert_eq!(result, dec!(5.26));
    }
}
