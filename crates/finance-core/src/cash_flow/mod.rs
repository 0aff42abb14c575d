//! Cash-flow appraisal: valuation, the IRR/XIRR root-finders, payback and
//! profitability index.

pub mod analysis;
pub mod discounting;
pub mod irr;
pub mod payback;
pub mod profitability;
pub mod xirr;

pub use analysis::{analyze_cash_flows, CashFlowAnalysisInput, CashFlowAnalysisOutput};
pub use irr::{irr, irr_with_policy, SeekPolicy};
pub use payback::pp;
pub use profitability::pi;
pub use xirr::{xirr, xirr_with_policy, NewtonPolicy};
