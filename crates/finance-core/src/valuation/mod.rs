pub mod equity;
pub mod wacc;

pub use equity::{capm, stock_pv};
pub use wacc::{calculate_wacc, wacc, WaccInput, WaccOutput};
