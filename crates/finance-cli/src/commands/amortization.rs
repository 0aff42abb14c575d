use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finance_core::amortization::{amortization_schedule, AmortizationInput, PeriodUnit};
use finance_core::PercentRate;

use crate::input;

/// Arguments for a level-payment amortization schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate, percent (e.g. 7.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term, in years unless --months is given
    #[arg(long)]
    pub period: Option<u32>,

    /// Read --period as a number of months
    #[arg(long)]
    pub months: bool,

    /// Payments fall at the start of each month (annuity due)
    #[arg(long)]
    pub pay_at_beginning: bool,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: AmortizationInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let principal = args
                .principal
                .ok_or("--principal is required (or provide --input)")?;
            let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
            let period = args.period.ok_or("--period is required (or provide --input)")?;

            AmortizationInput {
                principal,
                annual_rate: PercentRate(rate),
                period,
                unit: if args.months {
                    PeriodUnit::Months
                } else {
                    PeriodUnit::Years
                },
                pay_at_beginning: args.pay_at_beginning,
            }
        }
    };

    let result = amortization_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}
