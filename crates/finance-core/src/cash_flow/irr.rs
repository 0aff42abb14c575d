use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cash_flow::discounting::{npv_at, require_sign_mix};
use crate::error::FinanceError;
use crate::precision::round_money;
use crate::types::{Money, PercentRate};
use crate::FinanceResult;

/// Default valuation budget for one IRR call.
pub const MAX_IRR_EVALUATIONS: u32 = 1000;

/// Iteration policy for the IRR seek. All rates are percent-scaled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekPolicy {
    /// Valuations allowed before the seek gives up.
    pub max_evaluations: u32,
    /// First trial rate.
    pub start: Decimal,
    /// Step of the coarse ascent.
    pub coarse_step: Decimal,
    /// Step of the fine descent; also the precision of the result.
    pub fine_step: Decimal,
}

impl Default for SeekPolicy {
    fn default() -> Self {
        SeekPolicy {
            max_evaluations: MAX_IRR_EVALUATIONS,
            start: dec!(1),
            coarse_step: dec!(1),
            fine_step: dec!(0.01),
        }
    }
}

impl SeekPolicy {
    /// Default policy with a different evaluation budget.
    pub fn with_max_evaluations(max_evaluations: u32) -> Self {
        SeekPolicy {
            max_evaluations,
            ..SeekPolicy::default()
        }
    }
}

/// Per-call seek state. Never outlives the call that created it.
struct Seek<'a> {
    cash_flows: &'a [Money],
    max_evaluations: u32,
    trial: Decimal,
    evaluations: u32,
    last_npv: Decimal,
}

impl Seek<'_> {
    fn npv(&mut self) -> FinanceResult<Decimal> {
        self.evaluations += 1;
        if self.evaluations > self.max_evaluations {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                evaluations = self.max_evaluations,
                trial = %self.trial,
                "IRR evaluation budget exhausted"
            );
            return Err(self.failure());
        }
        let value = npv_at(PercentRate(self.trial), self.cash_flows).ok_or_else(|| self.failure())?;
        self.last_npv = value;
        Ok(value)
    }

    /// Move the trial rate; a rate past the representable range ends the seek.
    fn shift(&mut self, delta: Decimal) -> FinanceResult<()> {
        self.trial = self.trial.checked_add(delta).ok_or_else(|| self.failure())?;
        Ok(())
    }

    fn failure(&self) -> FinanceError {
        FinanceError::ConvergenceFailure {
            function: "IRR".into(),
            iterations: self.evaluations.min(self.max_evaluations),
            last_delta: self.last_npv,
        }
    }
}

/// Internal Rate of Return, percent-scaled and rounded to 2 decimals.
///
/// `cash_flows[0]` is the initial investment; later entries are one period
/// apart. The root is located by walking up from 1% in whole-percent steps
/// while NPV is positive, then back down in 0.01 steps while NPV is negative,
/// so the result is within ±0.01 of the true root. The walk assumes NPV
/// decreases with the rate; a series for which it does not exhausts the
/// evaluation budget.
///
/// Budget exhaustion is a hard [`FinanceError::ConvergenceFailure`], unlike
/// [`xirr`](crate::cash_flow::xirr::xirr) which reports non-convergence as
/// `Ok(None)`.
pub fn irr(cash_flows: &[Money]) -> FinanceResult<PercentRate> {
    irr_with_policy(cash_flows, &SeekPolicy::default())
}

/// [`irr`] with an explicit iteration policy.
pub fn irr_with_policy(cash_flows: &[Money], policy: &SeekPolicy) -> FinanceResult<PercentRate> {
    require_sign_mix("IRR", cash_flows)?;
    if policy.coarse_step <= Decimal::ZERO || policy.fine_step <= Decimal::ZERO {
        return Err(FinanceError::InvalidInput {
            field: "policy".into(),
            reason: "Seek steps must be positive".into(),
        });
    }

    let mut seek = Seek {
        cash_flows,
        max_evaluations: policy.max_evaluations,
        trial: policy.start,
        evaluations: 0,
        last_npv: Decimal::ZERO,
    };

    while seek.npv()? > Decimal::ZERO {
        seek.shift(policy.coarse_step)?;
    }
    while seek.npv()? < Decimal::ZERO {
        seek.shift(-policy.fine_step)?;
    }
    seek.shift(policy.fine_step)?;

    let rate = round_money(seek.trial);

    #[cfg(feature = "tracing")]
    tracing::debug!(evaluations = seek.evaluations, rate = %rate, "IRR converged");

    Ok(PercentRate(rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irr_capital_project() {
        let cfs = vec![dec!(-500000), dec!(200000), dec!(300000), dec!(200000)];
        let result = irr(&cfs).unwrap().value();
        assert!(result >= dec!(18) && result <= dec!(19), "got {result}");
        assert!((result - dec!(18.82)).abs() <= dec!(0.02));
    }

    #[test]
    fn test_irr_level_annuity() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let result = irr(&cfs).unwrap().value();
        // True root ~9.70%
        assert!((result - dec!(9.70)).abs() <= dec!(0.02), "got {result}");
    }

    #[test]
    fn test_irr_negative_return() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(300), dec!(300)];
        let result = irr(&cfs).unwrap().value();
        // True root ~ -5.07%
        assert!((result - dec!(-5.07)).abs() <= dec!(0.02), "got {result}");
    }

    #[test]
    fn test_irr_requires_both_signs() {
        match irr(&[dec!(100), dec!(200)]).unwrap_err() {
            FinanceError::InvalidInput { field, reason } => {
                assert_eq!(field, "cash_flows");
                assert!(reason.contains("one positive and one negative"));
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_irr_increasing_npv_exhausts_budget() {
        // Inflow first: NPV rises with the rate, so the descent never ends.
        match irr(&[dec!(100), dec!(-200)]).unwrap_err() {
            FinanceError::ConvergenceFailure { function, iterations, .. } => {
                assert_eq!(function, "IRR");
                assert_eq!(iterations, MAX_IRR_EVALUATIONS);
            }
            e => panic!("Expected ConvergenceFailure, got {e:?}"),
        }
    }

    #[test]
    fn test_irr_small_budget_fails_fast() {
        let cfs = vec![dec!(-500000), dec!(200000), dec!(300000), dec!(200000)];
        let policy = SeekPolicy::with_max_evaluations(10);
        assert!(matches!(
            irr_with_policy(&cfs, &policy),
            Err(FinanceError::ConvergenceFailure { .. })
        ));
    }

    #[test]
    fn test_irr_oversized_step_fails_instead_of_overflowing() {
        let cfs = vec![dec!(-1), dec!(1000000)];
        let policy = SeekPolicy {
            coarse_step: Decimal::MAX,
            ..SeekPolicy::default()
        };
        match irr_with_policy(&cfs, &policy).unwrap_err() {
            FinanceError::ConvergenceFailure { iterations, .. } => assert_eq!(iterations, 1),
            e => panic!("Expected ConvergenceFailure, got {e:?}"),
        }
    }

    #[test]
    fn test_irr_rejects_non_positive_steps() {
        let cfs = vec![dec!(-100), dec!(110)];
        let policy = SeekPolicy {
            fine_step: Decimal::ZERO,
            ..SeekPolicy::default()
        };
        assert!(matches!(
            irr_with_policy(&cfs, &policy),
            Err(FinanceError::InvalidInput { .. })
        ));
    }
}
