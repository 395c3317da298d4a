//! Property-based tests for the financial and estimation invariants
//!
//! - NPV at a zero rate equals the plain sum of the series
//! - An accepted IRR zeroes the NPV
//! - Interpolated payback lies inside its payback period
//! - ROI sign follows net gain
//! - COCOMO effort grows strictly with code size
//! - PERT stays between the optimistic and pessimistic values
//! - The comparison mean covers exactly the successful methods

use approx::assert_relative_eq;
use proptest::prelude::*;

use project_economics::estimation::{CocomoMode, MethodOutcome};
use project_economics::financial::{calculate_irr, npv, payback_period, roi, IrrSolverConfig};
use project_economics::{CostComparisonRequest, CostEstimationEngine};

fn cocomo_mode() -> impl Strategy<Value = CocomoMode> {
    prop_oneof![
        Just(CocomoMode::Organic),
        Just(CocomoMode::SemiDetached),
        Just(CocomoMode::Embedded),
    ]
}

/// Investment followed by 1..30 non-negative inflows
fn investment_series() -> impl Strategy<Value = Vec<f64>> {
    (1_000u32..100_000, prop::collection::vec(0u32..50_000, 1..30)).prop_map(|(investment, flows)| {
        let mut series = vec![-(investment as f64)];
        series.extend(flows.into_iter().map(f64::from));
        series
    })
}

proptest! {
    #[test]
    fn npv_at_zero_rate_is_sum(series in prop::collection::vec(-1e6f64..1e6, 0..40)) {
        let sum: f64 = series.iter().sum();
        assert_relative_eq!(npv(&series, 0.0), sum, epsilon = 1e-6, max_relative = 1e-12);
    }

    #[test]
    fn accepted_irr_zeroes_npv(series in investment_series()) {
        if let Some(rate) = calculate_irr(&series, &IrrSolverConfig::default()) {
            prop_assert!(npv(&series, rate).abs() < 1e-6);
            prop_assert!(rate > -0.99 && rate < 10.0);
        }
    }

    #[test]
    fn payback_lies_in_its_period(series in investment_series()) {
        let investment = -series[0];
        if let Some(payback) = payback_period(investment, &series) {
            let mut cumulative = -investment;
            let k = series
                .iter()
                .enumerate()
                .skip(1)
                .find_map(|(i, cf)| {
                    cumulative += cf;
                    (cumulative >= 0.0).then_some(i)
                })
                .unwrap();
            prop_assert!(payback >= (k - 1) as f64 && payback <= k as f64 + 1e-12);
        }
    }

    #[test]
    fn roi_sign_follows_net_gain(investment in 1.0f64..1e6, total_return in 0.0f64..2e6) {
        let value = roi(investment, total_return).unwrap();
        let gain = total_return - investment;
        prop_assert_eq!(value > 0.0, gain > 0.0);
        prop_assert_eq!(value < 0.0, gain < 0.0);
    }

    #[test]
    fn cocomo_effort_strictly_increases_with_loc(loc in 1u32..1_000_000, extra in 1u32..10_000, mode in cocomo_mode()) {
        let coeffs = mode.coefficients();
        let smaller = coeffs.effort(loc as f64 / 1000.0);
        let larger = coeffs.effort((loc + extra) as f64 / 1000.0);
        prop_assert!(larger > smaller);

        // Rounded output can tie for nearby sizes but never decreases
        let engine = CostEstimationEngine::new().unwrap();
        let reported_smaller = engine.cocomo(loc as f64, mode).unwrap();
        let reported_larger = engine.cocomo((loc + extra) as f64, mode).unwrap();
        prop_assert!(reported_larger.effort_person_months >= reported_smaller.effort_person_months);
        prop_assert!(reported_larger.total_cost_euros >= reported_smaller.total_cost_euros);
    }

    #[test]
    fn pert_within_range(a in 0u32..1_000_000, b in 0u32..1_000_000, c in 0u32..1_000_000) {
        let mut values = [a as f64, b as f64, c as f64];
        values.sort_by(|x, y| x.total_cmp(y));

        let engine = CostEstimationEngine::new().unwrap();
        let estimate = engine.expert_judgment(&values).unwrap();
        prop_assert!(estimate.total_cost_euros >= values[0]);
        prop_assert!(estimate.total_cost_euros <= values[2]);
    }

    #[test]
    fn comparison_mean_covers_successful_methods(
        loc in -5_000.0f64..50_000.0,
        function_points in -100.0f64..2_000.0,
        estimate_count in 0usize..5,
        complexity_score in 1.0f64..10.0,
    ) {
        let engine = CostEstimationEngine::new().unwrap();
        let request = CostComparisonRequest {
            loc,
            function_points,
            expert_estimates: vec![20_000.0, 25_000.0, 40_000.0, 50_000.0][..estimate_count.min(4)].to_vec(),
            complexity_score,
            ..Default::default()
        };

        let result = engine.compare_all_methods(&request);
        let successes: Vec<f64> = result
            .estimates
            .values()
            .filter_map(|outcome| match outcome {
                MethodOutcome::Estimate(estimate) => Some(estimate.total_cost_euros),
                MethodOutcome::Failed { .. } => None,
            })
            .collect();

        // Regression never fails, so there is always at least one success
        let expected = successes.iter().sum::<f64>() / successes.len() as f64;
        assert_relative_eq!(result.final_recommendation.unwrap(), expected, epsilon = 0.006);
    }
}
