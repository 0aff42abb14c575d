pub mod yields;

pub use yields::{current_yield, ytm};
