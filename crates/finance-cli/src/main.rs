mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::AmortizeArgs;
use commands::cash_flows::CashFlowsArgs;
use commands::depreciation::DepreciateArgs;
use commands::valuation::WaccArgs;
use commands::xirr::XirrArgs;

/// Decimal-precision finance formulas
#[derive(Parser)]
#[command(
    name = "fin",
    version,
    about = "Decimal-precision finance formulas",
    long_about = "A CLI for time-value, cash-flow and capital calculations with decimal \
                  precision. Supports NPV/IRR/XIRR appraisal, loan amortization, \
                  depreciation schedules and WACC."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Appraise a cash-flow series (NPV, IRR, XIRR, PI, payback, discount factors)
    CashFlows(CashFlowsArgs),
    /// Internal rate of return for irregularly dated flows
    Xirr(XirrArgs),
    /// Level-payment loan amortization schedule
    Amortize(AmortizeArgs),
    /// Depreciation schedule (straight line, SYD, declining balance)
    Depreciate(DepreciateArgs),
    /// Weighted Average Cost of Capital from market values
    Wacc(WaccArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::CashFlows(args) => commands::cash_flows::run_cash_flows(args),
        Commands::Xirr(args) => commands::xirr::run_xirr(args),
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::Depreciate(args) => commands::depreciation::run_depreciate(args),
        Commands::Wacc(args) => commands::valuation::run_wacc(args),
        Commands::Version => {
            println!("fin {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
