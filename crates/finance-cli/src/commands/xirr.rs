use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use finance_core::cash_flow::xirr;
use finance_core::{DatedCashFlow, FractionalRate};

use crate::input;

/// Arguments for XIRR on irregularly dated flows
#[derive(Args)]
pub struct XirrArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Cash flow amounts (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// One date per cash flow (comma-separated, YYYY-MM-DD)
    #[arg(long, value_delimiter = ',')]
    pub dates: Option<Vec<NaiveDate>>,

    /// Starting guess as a fraction (default 0)
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<Decimal>,
}

/// File/stdin shape: `{ "flows": [{ "date": ..., "amount": ... }], "guess": ... }`
#[derive(Deserialize)]
struct XirrRequest {
    flows: Vec<DatedCashFlow>,
    #[serde(default)]
    guess: Option<FractionalRate>,
}

pub fn run_xirr(args: XirrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (cash_flows, dates, guess) = match input::from_file_or_stdin::<XirrRequest>(args.input.as_deref())? {
        Some(request) => {
            let (amounts, dates) = DatedCashFlow::unzip(&request.flows);
            (amounts, dates, request.guess)
        }
        None => {
            let cash_flows = args
                .cash_flows
                .ok_or("--cash-flows is required (or provide --input)")?;
            let dates = args.dates.ok_or("--dates is required (or provide --input)")?;
            (cash_flows, dates, args.guess.map(FractionalRate))
        }
    };

    let rate = xirr::xirr(&cash_flows, &dates, guess)?;
    let mut warnings: Vec<String> = Vec::new();
    if rate.is_none() {
        warnings.push(format!(
            "XIRR did not converge within {} iterations",
            xirr::MAX_XIRR_ITERATIONS
        ));
    }

    Ok(json!({
        "result": {
            "xirr": rate,
            "converged": rate.is_some(),
            "flows": cash_flows.len(),
        },
        "methodology": "XIRR (Newton-Raphson on actual/365 year fractions)",
        "warnings": warnings,
    }))
}
