use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::precision::{add, divide};
use crate::types::{Money, PercentRate};
use crate::FinanceResult;

/// Leverage Ratio: `(total_liabilities + total_debts) / total_income`
pub fn lr(total_liabilities: Money, total_debts: Money, total_income: Money) -> FinanceResult<Decimal> {
    let obligations = add(total_liabilities, total_debts, "total_liabilities", "Total obligations")?;
    divide(
        obligations,
        total_income,
        "total_income",
        "Leverage ratio",
    )
}

/// Rule of 72: approximate periods to double at `rate`.
pub fn r72(rate: PercentRate) -> FinanceResult<Decimal> {
    divide(dec!(72), rate.value(), "rate", "Rule of 72")
}
