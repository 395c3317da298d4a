//! Project cost estimation engine
//!
//! Four independent estimators plus a comparison step that averages every
//! estimator that produced a result:
//! - **COCOMO**: effort from lines of code and development mode
//! - **Function Points**: size-based cost with a complexity weight
//! - **Expert Judgment**: PERT weighted three-point estimate
//! - **Linear Regression**: cost predicted from KLOC and a complexity score
//!
//! The regression model is fit once in [`CostEstimationEngine::new`] and is
//! read-only afterwards, so the engine can be shared across threads without
//! locking.

mod models;
mod regression;
mod compare;

pub use models::{cocomo, function_points, expert_judgment, CocomoMode, CocomoCoefficients, FunctionComplexity};
pub use regression::{synthetic_dataset, RegressionModel, TrainingSample};
pub use compare::{ComparisonResult, MethodOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EstimationError;
use crate::request::CostComparisonRequest;
use crate::rounding::round2;

/// Default loaded labour rate per person-month
pub const DEFAULT_COST_PER_PERSON_MONTH: f64 = 6000.0;
/// Default cost driver applied to each weighted function point
pub const DEFAULT_FUNCTION_POINT_MULTIPLIER: f64 = 30.0;
/// Default floor for regression predictions
pub const DEFAULT_MINIMUM_REGRESSION_COST: f64 = 5000.0;

/// Estimation rates and regression training parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub cost_per_person_month: f64,
    pub function_point_multiplier: f64,
    pub minimum_regression_cost: f64,
    pub training_seed: u64,
    pub training_projects: usize,
    pub training_noise_std_dev: f64,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            cost_per_person_month: DEFAULT_COST_PER_PERSON_MONTH,
            function_point_multiplier: DEFAULT_FUNCTION_POINT_MULTIPLIER,
            minimum_regression_cost: DEFAULT_MINIMUM_REGRESSION_COST,
            training_seed: 42,
            training_projects: 50,
            training_noise_std_dev: 5000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMethod {
    Cocomo,
    FunctionPoints,
    ExpertJudgment,
    LinearRegression,
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EstimationMethod::Cocomo => "COCOMO",
            EstimationMethod::FunctionPoints => "Function Points",
            EstimationMethod::ExpertJudgment => "Expert Judgment (PERT)",
            EstimationMethod::LinearRegression => "Linear Regression",
        };
        f.write_str(label)
    }
}

/// A single estimator's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub method: EstimationMethod,
    pub total_cost_euros: f64,

    // COCOMO only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_person_months: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_months: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_staffing: Option<f64>,

    // PERT only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_deviation: Option<f64>,
}

impl CostEstimate {
    pub fn new(method: EstimationMethod, total_cost_euros: f64) -> Self {
        Self {
            method,
            total_cost_euros,
            effort_person_months: None,
            development_months: None,
            average_staffing: None,
            standard_deviation: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CostEstimationEngine {
    config: EstimationConfig,
    model: RegressionModel,
}

impl CostEstimationEngine {
    /// Build the engine with default rates, training the regression model
    pub fn new() -> Result<Self, EstimationError> {
        Self::with_config(EstimationConfig::default())
    }

    pub fn with_config(config: EstimationConfig) -> Result<Self, EstimationError> {
        let model = RegressionModel::train(&config)?;
        Ok(Self { config, model })
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    pub fn cocomo(&self, loc: f64, mode: CocomoMode) -> Result<CostEstimate, EstimationError> {
        cocomo(loc, mode, &self.config)
    }

    pub fn function_points(
        &self,
        points: f64,
        complexity: FunctionComplexity,
    ) -> Result<CostEstimate, EstimationError> {
        function_points(points, complexity, &self.config)
    }

    pub fn expert_judgment(&self, estimates: &[f64]) -> Result<CostEstimate, EstimationError> {
        expert_judgment(estimates)
    }

    /// Regression prediction floored at the configured minimum cost
    pub fn linear_regression_estimate(&self, loc_thousands: f64, complexity_score: f64) -> CostEstimate {
        let predicted = self.model.predict(loc_thousands, complexity_score);
        let cost = predicted.max(self.config.minimum_regression_cost);
        CostEstimate::new(EstimationMethod::LinearRegression, round2(cost))
    }

    /// Run every estimator and average the ones that succeeded
    pub fn compare_all_methods(&self, request: &CostComparisonRequest) -> ComparisonResult {
        compare::compare_all_methods(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_estimate_floor() {
        let engine = CostEstimationEngine::new().unwrap();
        let estimate = engine.linear_regression_estimate(-10.0, 0.0);
        assert_eq!(estimate.total_cost_euros, DEFAULT_MINIMUM_REGRESSION_COST);
        assert_eq!(estimate.method, EstimationMethod::LinearRegression);
    }

    #[test]
    fn test_regression_estimate_tracks_model() {
        let engine = CostEstimationEngine::new().unwrap();
        let small = engine.linear_regression_estimate(10.0, 5.0);
        let large = engine.linear_regression_estimate(60.0, 5.0);

        assert!(large.total_cost_euros > small.total_cost_euros);
        let expected = round2(engine.model().predict(60.0, 5.0));
        assert_eq!(large.total_cost_euros, expected);
    }

    #[test]
    fn test_custom_rates() {
        let config = EstimationConfig {
            cost_per_person_month: 12000.0,
            function_point_multiplier: 60.0,
            ..Default::default()
        };
        let engine = CostEstimationEngine::with_config(config).unwrap();

        let fp = engine.function_points(100.0, FunctionComplexity::Simple).unwrap();
        assert_eq!(fp.total_cost_euros, 18000.0);

        let base = CostEstimationEngine::new().unwrap();
        let doubled = engine.cocomo(8000.0, CocomoMode::Organic).unwrap();
        let single = base.cocomo(8000.0, CocomoMode::Organic).unwrap();
        assert!((doubled.total_cost_euros - 2.0 * single.total_cost_euros).abs() < 0.02);
    }

    #[test]
    fn test_estimate_serialization_skips_unused_fields() {
        let estimate = CostEstimate::new(EstimationMethod::FunctionPoints, 42000.0);
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["method"], "function_points");
        assert_eq!(json["total_cost_euros"], 42000.0);
        assert!(json.get("effort_person_months").is_none());
    }
}
