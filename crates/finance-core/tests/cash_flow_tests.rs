use chrono::NaiveDate;
use finance_core::cash_flow::discounting::npv_at;
use finance_core::cash_flow::{
    analyze_cash_flows, irr, irr_with_policy, xirr, CashFlowAnalysisInput, SeekPolicy,
};
use finance_core::time_value::{df, npv};
use finance_core::{FinanceError, FractionalRate, PercentRate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ===========================================================================
// IRR
// ===========================================================================

/// The reported rate sits one fine step above the last non-negative NPV.
fn assert_brackets_root(cash_flows: &[Decimal]) {
    let rate = irr(cash_flows).unwrap().value();
    let below = npv_at(PercentRate(rate - dec!(0.01)), cash_flows).unwrap();
    let at = npv_at(PercentRate(rate), cash_flows).unwrap();
    assert!(below >= Decimal::ZERO, "NPV at {} was {below}", rate - dec!(0.01));
    assert!(at < Decimal::ZERO, "NPV at {rate} was {at}");
}

#[test]
fn test_irr_brackets_root_within_fine_step() {
    assert_brackets_root(&[dec!(-500000), dec!(200000), dec!(300000), dec!(200000)]);
    assert_brackets_root(&[dec!(-1000), dec!(400), dec!(400), dec!(400)]);
    assert_brackets_root(&[dec!(-1000), dec!(300), dec!(300), dec!(300)]);
    assert_brackets_root(&[dec!(-2500), dec!(100), dec!(200), dec!(3000)]);
}

#[test]
fn test_irr_known_values() {
    assert_eq!(irr(&[dec!(-1000), dec!(400), dec!(400), dec!(400)]).unwrap(), PercentRate(dec!(9.71)));
    assert_eq!(irr(&[dec!(-1000), dec!(300), dec!(300), dec!(300)]).unwrap(), PercentRate(dec!(-5.08)));
}

#[test]
fn test_irr_exact_root_at_whole_percent() {
    // NPV at 10% is exactly zero for a 10% bond-like stream
    let cfs = vec![dec!(-1000), dec!(100), dec!(1100)];
    let rate = irr(&cfs).unwrap().value();
    assert!((rate - dec!(10)).abs() <= dec!(0.02), "got {rate}");
}

#[test]
fn test_irr_budget_exhaustion_is_hard_error() {
    // A slow fine descent needs more than 50 valuations
    let cfs = vec![dec!(-1000), dec!(300), dec!(300), dec!(300)];
    match irr_with_policy(&cfs, &SeekPolicy::with_max_evaluations(50)).unwrap_err() {
        FinanceError::ConvergenceFailure { function, iterations, .. } => {
            assert_eq!(function, "IRR");
            assert_eq!(iterations, 50);
        }
        e => panic!("Expected ConvergenceFailure, got {e:?}"),
    }
}

#[test]
fn test_irr_all_negative_is_invalid() {
    assert!(matches!(
        irr(&[dec!(-100), dec!(-50)]),
        Err(FinanceError::InvalidInput { .. })
    ));
}

// ===========================================================================
// XIRR
// ===========================================================================

#[test]
fn test_xirr_short_holding() {
    let cfs = vec![dec!(-1000), dec!(-100), dec!(1200)];
    let dates = vec![date(2015, 12, 1), date(2016, 8, 1), date(2016, 8, 19)];
    let result = xirr(&cfs, &dates, None).unwrap();
    assert_eq!(result, Some(PercentRate(dec!(14.11))));
}

#[test]
fn test_xirr_one_year_ten_percent() {
    let cfs = vec![dec!(-1000), dec!(1100)];
    let dates = vec![date(2019, 1, 1), date(2020, 1, 1)];
    let result = xirr(&cfs, &dates, Some(FractionalRate(dec!(0.05)))).unwrap();
    assert_eq!(result, Some(PercentRate(dec!(10))));
}

#[test]
fn test_xirr_unequal_lengths_is_invalid() {
    let cfs = vec![dec!(-1000), dec!(1100)];
    let dates = vec![date(2019, 1, 1)];
    match xirr(&cfs, &dates, None).unwrap_err() {
        FinanceError::InvalidInput { reason, .. } => assert!(reason.contains("length mismatch")),
        e => panic!("Expected InvalidInput, got {e:?}"),
    }
}

#[test]
fn test_xirr_same_day_flows_do_not_converge() {
    let cfs = vec![dec!(-1000), dec!(1100)];
    let dates = vec![date(2019, 1, 1), date(2019, 1, 1)];
    assert_eq!(xirr(&cfs, &dates, None).unwrap(), None);
}

// ===========================================================================
// NPV and discount factors
// ===========================================================================

#[test]
fn test_npv_decreases_with_rate_for_conventional_flows() {
    let cfs = vec![dec!(-500000), dec!(200000), dec!(300000), dec!(200000)];
    let low = npv(PercentRate(dec!(5)), &cfs).unwrap();
    let mid = npv(PercentRate(dec!(10)), &cfs).unwrap();
    let high = npv(PercentRate(dec!(20)), &cfs).unwrap();
    assert!(low > mid && mid > high);
    assert_eq!(mid, dec!(80015.03));
}

#[test]
fn test_df_is_non_increasing_for_positive_rates() {
    for rate in [dec!(1), dec!(7.5), dec!(25)] {
        let factors = df(PercentRate(rate), 30).unwrap();
        assert_eq!(factors.len(), 29);
        assert_eq!(factors[0], Decimal::ONE);
        for pair in factors.windows(2) {
            assert!(pair[1] <= pair[0], "rate {rate}: {} > {}", pair[1], pair[0]);
        }
    }
}

// ===========================================================================
// Appraisal envelope
// ===========================================================================

#[test]
fn test_appraisal_envelope_round_trips_through_json() {
    let input: CashFlowAnalysisInput = serde_json::from_str(
        r#"{
            "rate": "10",
            "cash_flows": ["-1000", "400", "400", "400"]
        }"#,
    )
    .unwrap();
    let result = analyze_cash_flows(&input).unwrap();
    assert_eq!(result.result.irr, Some(PercentRate(dec!(9.71))));
    assert_eq!(result.result.payback_period, Some(dec!(2.5)));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result"]["irr"], "9.71");
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
    assert!(json["methodology"].as_str().unwrap().contains("IRR"));
}
