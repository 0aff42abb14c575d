use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cash_flow::{irr, payback, profitability, xirr};
use crate::error::FinanceError;
use crate::precision::{add, sum};
use crate::time_value;
use crate::types::*;
use crate::FinanceResult;

/// Input for a full cash-flow appraisal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowAnalysisInput {
    /// Discount rate for NPV, PI and discount factors (percent-scaled)
    pub rate: PercentRate,
    /// Periodic cash flows (index 0 = initial investment, usually negative)
    pub cash_flows: Vec<Money>,
    /// One date per cash flow; enables XIRR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,
    /// XIRR starting guess (fractional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<FractionalRate>,
    /// IRR valuation budget, defaults to 1000
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_evaluations: Option<u32>,
    /// Payback mode: 0 for even flows, anything else for uneven.
    /// Defaults to uneven.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_periods: Option<u32>,
}

/// Output of a cash-flow appraisal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowAnalysisOutput {
    pub npv: Money,
    pub irr: Option<PercentRate>,
    pub xirr: Option<PercentRate>,
    pub profitability_index: Option<Decimal>,
    pub payback_period: Option<Years>,
    pub discount_factors: Vec<Decimal>,
    pub total_outflows: Money,
    pub total_inflows: Money,
}

/// Appraise a cash-flow series: NPV, IRR, XIRR, profitability index,
/// payback period and the discount factor schedule.
///
/// Only NPV failures and overflowing totals are errors. Root-finder, ratio
/// and discount factor failures are reported as warnings with the
/// corresponding field left empty.
pub fn analyze_cash_flows(
    input: &CashFlowAnalysisInput,
) -> FinanceResult<ComputationOutput<CashFlowAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.cash_flows.len() < 2 {
        return Err(FinanceError::InvalidInput {
            field: "cash_flows".into(),
            reason: "At least an investment and one return are required".into(),
        });
    }

    let npv = time_value::npv(input.rate, &input.cash_flows)?;

    let policy = match input.max_evaluations {
        Some(n) => irr::SeekPolicy::with_max_evaluations(n),
        None => irr::SeekPolicy::default(),
    };
    let irr_result = match irr::irr_with_policy(&input.cash_flows, &policy) {
        Ok(r) => Some(r),
        Err(e) => {
            warnings.push(format!("IRR calculation warning: {e}"));
            None
        }
    };

    let xirr_result = match input.dates {
        Some(ref dates) => match xirr::xirr(&input.cash_flows, dates, input.guess) {
            Ok(Some(r)) => Some(r),
            Ok(None) => {
                warnings.push(format!(
                    "XIRR did not converge within {} iterations",
                    xirr::MAX_XIRR_ITERATIONS
                ));
                None
            }
            Err(e) => {
                warnings.push(format!("XIRR calculation warning: {e}"));
                None
            }
        },
        None => None,
    };

    let profitability_index = match profitability::pi(input.rate, &input.cash_flows) {
        Ok(v) => Some(v),
        Err(e) => {
            warnings.push(format!("Profitability index warning: {e}"));
            None
        }
    };

    let mode = input
        .payback_periods
        .unwrap_or((input.cash_flows.len() - 1) as u32);
    if mode != 0 && !payback::pays_back(&input.cash_flows) {
        warnings.push("Cumulative cash flow never turns positive; payback not reached".into());
    }
    let payback_period = match payback::pp(mode, &input.cash_flows) {
        Ok(v) => Some(v),
        Err(e) => {
            warnings.push(format!("Payback period warning: {e}"));
            None
        }
    };

    let factor_count = u32::try_from(input.cash_flows.len() + 1).unwrap_or(u32::MAX);
    let discount_factors = match time_value::df(input.rate, factor_count) {
        Ok(factors) => factors,
        Err(e) => {
            warnings.push(format!("Discount factor warning: {e}"));
            Vec::new()
        }
    };

    let total_outflows = input
        .cash_flows
        .iter()
        .filter(|cf| cf.is_sign_negative())
        .try_fold(Decimal::ZERO, |acc, cf| {
            add(acc, cf.abs(), "cash_flows", "Total outflows")
        })?;
    let total_inflows = sum(
        input.cash_flows.iter().filter(|cf| **cf > Decimal::ZERO),
        "cash_flows",
        "Total inflows",
    )?;

    if npv > Decimal::ZERO && irr_result.is_some_and(|r| r < input.rate) {
        warnings.push(
            "Positive NPV with IRR below the discount rate: check for multiple sign changes".into(),
        );
    }

    let output = CashFlowAnalysisOutput {
        npv,
        irr: irr_result,
        xirr: xirr_result,
        profitability_index,
        payback_period,
        discount_factors,
        total_outflows,
        total_inflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Cash flow appraisal: NPV, IRR (coarse/fine seek), XIRR (Newton), PI, payback",
        &serde_json::json!({
            "rate": input.rate.value().to_string(),
            "periods": input.cash_flows.len(),
            "dated": input.dates.is_some(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
