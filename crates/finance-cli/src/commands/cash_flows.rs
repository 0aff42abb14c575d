use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_core::cash_flow::{analyze_cash_flows, CashFlowAnalysisInput};
use finance_core::{FractionalRate, PercentRate};

use crate::input;

/// Arguments for a full cash-flow appraisal
#[derive(Args)]
pub struct CashFlowsArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Discount rate, percent (e.g. 10 for 10%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Periodic cash flows (comma-separated, e.g. "-1000,400,400,400")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub cash_flows: Option<Vec<Decimal>>,

    /// One date per cash flow (comma-separated, YYYY-MM-DD); enables XIRR
    #[arg(long, value_delimiter = ',')]
    pub dates: Option<Vec<NaiveDate>>,

    /// XIRR starting guess as a fraction (e.g. 0.1)
    #[arg(long, allow_hyphen_values = true)]
    pub guess: Option<Decimal>,

    /// IRR valuation budget
    #[arg(long)]
    pub max_evaluations: Option<u32>,

    /// Payback mode: 0 for even flows, otherwise uneven
    #[arg(long)]
    pub payback_periods: Option<u32>,
}

pub fn run_cash_flows(args: CashFlowsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis_input: CashFlowAnalysisInput =
        match input::from_file_or_stdin(args.input.as_deref())? {
            Some(parsed) => parsed,
            None => {
                let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
                let cash_flows = args
                    .cash_flows
                    .ok_or("--cash-flows is required (or provide --input)")?;

                CashFlowAnalysisInput {
                    rate: PercentRate(rate),
                    cash_flows,
                    dates: args.dates,
                    guess: args.guess.map(FractionalRate),
                    max_evaluations: args.max_evaluations,
                    payback_periods: args.payback_periods,
                }
            }
        };

    let result = analyze_cash_flows(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}
