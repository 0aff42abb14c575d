use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use finance_core::depreciation::{depreciation_schedule, DepreciationInput, DepreciationMethod};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum MethodArg {
    /// Straight line
    Sln,
    /// Sum of years' digits
    Syd,
    /// Declining balance (see --factor)
    Ddb,
}

/// Arguments for a depreciation schedule
#[derive(Args)]
pub struct DepreciateArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Asset cost
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Salvage value at end of life
    #[arg(long)]
    pub salvage: Option<Decimal>,

    /// Useful life in periods
    #[arg(long)]
    pub life: Option<u32>,

    /// Depreciation method
    #[arg(long, value_enum, default_value = "sln")]
    pub method: MethodArg,

    /// Declining-balance factor (default 2)
    #[arg(long)]
    pub factor: Option<Decimal>,
}

pub fn run_depreciate(args: DepreciateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let asset: DepreciationInput = match input::from_file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let cost = args.cost.ok_or("--cost is required (or provide --input)")?;
            let salvage = args.salvage.ok_or("--salvage is required (or provide --input)")?;
            let life = args.life.ok_or("--life is required (or provide --input)")?;

            DepreciationInput {
                cost,
                salvage,
                life,
                method: match args.method {
                    MethodArg::Sln => DepreciationMethod::StraightLine,
                    MethodArg::Syd => DepreciationMethod::SumOfYearsDigits,
                    MethodArg::Ddb => DepreciationMethod::DecliningBalance {
                        factor: args.factor,
                    },
                },
            }
        }
    };

    let result = depreciation_schedule(&asset)?;
    Ok(serde_json::to_value(result)?)
}
