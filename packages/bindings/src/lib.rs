use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finance_core::{DatedCashFlow, FractionalRate};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Cash flows
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_cash_flows(input_json: String) -> NapiResult<String> {
    let input: finance_core::cash_flow::CashFlowAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_core::cash_flow::analyze_cash_flows(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct XirrInput {
    flows: Vec<DatedCashFlow>,
    #[serde(default)]
    guess: Option<FractionalRate>,
}

/// Returns `{"xirr": "<percent>"}`, or `{"xirr": null}` when the iteration
/// does not converge.
#[napi]
pub fn xirr(input_json: String) -> NapiResult<String> {
    let input: XirrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let (amounts, dates) = DatedCashFlow::unzip(&input.flows);
    let rate = finance_core::cash_flow::xirr(&amounts, &dates, input.guess).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "xirr": rate })).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: finance_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finance_core::amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn depreciation_schedule(input_json: String) -> NapiResult<String> {
    let input: finance_core::depreciation::DepreciationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finance_core::depreciation::depreciation_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn wacc(input_json: String) -> NapiResult<String> {
    let input: finance_core::valuation::wacc::WaccInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finance_core::valuation::wacc::calculate_wacc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
