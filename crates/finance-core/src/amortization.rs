use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinanceError;
use crate::precision::{add, divide, mul, pow, round_money, schedule_length, sub};
use crate::types::*;
use crate::FinanceResult;

/// Unit of the loan term passed to [`am`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    /// Term in years; payments are monthly, so the count is `period * 12`.
    Years,
    /// Term in months.
    Months,
}

impl PeriodUnit {
    pub fn months(self, period: u32) -> FinanceResult<u32> {
        match self {
            PeriodUnit::Years => period.checked_mul(12).ok_or_else(|| FinanceError::InvalidInput {
                field: "period".into(),
                reason: "Term in months overflows".into(),
            }),
            PeriodUnit::Months => Ok(period),
        }
    }
}

/// The legacy numeric flag: `0` is years, `1` is months.
impl TryFrom<u8> for PeriodUnit {
    type Error = FinanceError;

    fn try_from(flag: u8) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(PeriodUnit::Years),
            1 => Ok(PeriodUnit::Months),
            other => Err(FinanceError::InvalidInput {
                field: "year_or_month".into(),
                reason: format!("Unknown period unit flag {other}; expected 0 (years) or 1 (months)"),
            }),
        }
    }
}

/// Monthly rate for an annual percent-scaled rate.
fn monthly_rate(rate: PercentRate) -> Decimal {
    rate.as_fraction() / dec!(12)
}

/// Level monthly payment that retires `principal`, rounded to 2 decimals.
///
/// `payment = P · r(1+r)^k / ((1+r)^n - 1)` with `r` the monthly rate,
/// `n` the number of payments and `k = n`, or `n - 1` when payments fall at
/// the start of each period.
pub fn am(
    principal: Money,
    rate: PercentRate,
    period: u32,
    unit: PeriodUnit,
    pay_at_beginning: bool,
) -> FinanceResult<Money> {
    let payments = unit.months(period)?;
    Ok(round_money(level_payment(
        principal,
        monthly_rate(rate),
        payments,
        pay_at_beginning,
    )?))
}

fn level_payment(
    principal: Money,
    r: Decimal,
    payments: u32,
    pay_at_beginning: bool,
) -> FinanceResult<Money> {
    let base = add(Decimal::ONE, r, "rate", "Monthly growth factor")?;
    let accruals = i64::from(payments) - i64::from(pay_at_beginning);
    let numerator = mul(r, pow(base, Decimal::from(accruals), "rate")?, "rate", "Amortization effective rate")?;
    let denominator = pow(base, Decimal::from(payments), "period")? - Decimal::ONE;
    let ratio = divide(numerator, denominator, "rate", "Amortization effective rate")?;
    mul(principal, ratio, "principal", "Payment")
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Input for a full amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    /// Annual rate, percent-scaled
    pub annual_rate: PercentRate,
    pub period: u32,
    pub unit: PeriodUnit,
    #[serde(default)]
    pub pay_at_beginning: bool,
}

/// A single payment in the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub payment: Money,
    pub periods: Vec<AmortizationPeriod>,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Build the payment-by-payment schedule for a level-payment loan.
///
/// Each row pays the rounded level payment; the final row absorbs whatever
/// rounding residue is left so the balance closes at zero.
pub fn amortization_schedule(
    input: &AmortizationInput,
) -> FinanceResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    let payments = schedule_length(input.unit.months(input.period)?, "period")?;
    if payments == 0 {
        return Err(FinanceError::InvalidInput {
            field: "period".into(),
            reason: "Loan term must be at least one payment".into(),
        });
    }

    let payment = am(
        input.principal,
        input.annual_rate,
        input.period,
        input.unit,
        input.pay_at_beginning,
    )?;
    let r = monthly_rate(input.annual_rate);

    let mut periods = Vec::new();
    let mut balance = input.principal;
    // Annuity due: interest accrues after each payment and is settled by the next.
    let mut accrued = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=payments {
        let interest = if input.pay_at_beginning {
            accrued
        } else {
            round_money(mul(balance, r, "principal", "Interest")?)
        };

        let (paid, principal_part) = if period == payments {
            (add(balance, interest, "principal", "Final payment")?, balance)
        } else {
            (payment, sub(payment, interest, "principal", "Principal portion")?)
        };

        balance = sub(balance, principal_part, "principal", "Balance")?;
        if input.pay_at_beginning {
            accrued = round_money(mul(balance, r, "principal", "Interest")?);
        }
        total_paid = add(total_paid, paid, "principal", "Total paid")?;
        total_interest = add(total_interest, interest, "principal", "Total interest")?;

        periods.push(AmortizationPeriod {
            period,
            payment: paid,
            interest,
            principal: principal_part,
            balance,
        });
    }

    if let Some(last) = periods.last() {
        let residue = last.payment - payment;
        if !residue.is_zero() {
            warnings.push(format!(
                "Final payment adjusted by {residue} to clear rounding residue"
            ));
        }
    }

    let output = AmortizationOutput {
        payment,
        periods,
        total_paid,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
