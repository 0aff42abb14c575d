use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_core::valuation::wacc::{self, WaccInput};
use finance_core::PercentRate;

use crate::input;

/// Arguments for WACC calculation
#[derive(Args)]
pub struct WaccArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Market value of equity
    #[arg(long, alias = "equity")]
    pub market_value_of_equity: Option<Decimal>,

    /// Market value of debt
    #[arg(long, alias = "debt")]
    pub market_value_of_debt: Option<Decimal>,

    /// Cost of equity, percent (e.g. 6)
    #[arg(long)]
    pub cost_of_equity: Option<Decimal>,

    /// Pre-tax cost of debt, percent
    #[arg(long)]
    pub cost_of_debt: Option<Decimal>,

    /// Marginal corporate tax rate, percent
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

pub fn run_wacc(args: WaccArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let wacc_input: WaccInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => WaccInput {
            market_value_of_equity: args
                .market_value_of_equity
                .ok_or("--market-value-of-equity is required (or provide --input)")?,
            market_value_of_debt: args
                .market_value_of_debt
                .ok_or("--market-value-of-debt is required (or provide --input)")?,
            cost_of_equity: PercentRate(
                args.cost_of_equity
                    .ok_or("--cost-of-equity is required (or provide --input)")?,
            ),
            cost_of_debt: PercentRate(
                args.cost_of_debt
                    .ok_or("--cost-of-debt is required (or provide --input)")?,
            ),
            tax_rate: PercentRate(args.tax_rate.ok_or("--tax-rate is required (or provide --input)")?),
        },
    };

    let result = wacc::calculate_wacc(&wacc_input)?;
    Ok(serde_json::to_value(result)?)
}
