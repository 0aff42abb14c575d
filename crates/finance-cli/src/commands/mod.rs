pub mod amortization;
pub mod cash_flows;
pub mod depreciation;
pub mod valuation;
pub mod xirr;
