//! Multi-method cost comparison

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CostEstimate, CostEstimationEngine, EstimationMethod};
use crate::error::EstimationError;
use crate::request::CostComparisonRequest;
use crate::rounding::round2;

/// Per-method outcome; failures are reported, not propagated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodOutcome {
    Estimate(CostEstimate),
    Failed { error: String },
}

impl MethodOutcome {
    pub fn total_cost(&self) -> Option<f64> {
        match self {
            MethodOutcome::Estimate(estimate) => Some(estimate.total_cost_euros),
            MethodOutcome::Failed { .. } => None,
        }
    }
}

impl From<Result<CostEstimate, EstimationError>> for MethodOutcome {
    fn from(result: Result<CostEstimate, EstimationError>) -> Self {
        match result {
            Ok(estimate) => MethodOutcome::Estimate(estimate),
            Err(e) => MethodOutcome::Failed { error: e.to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub estimates: BTreeMap<EstimationMethod, MethodOutcome>,
    /// Mean of the successful estimates, absent when every method failed
    pub final_recommendation: Option<f64>,
}

pub(super) fn compare_all_methods(
    engine: &CostEstimationEngine,
    request: &CostComparisonRequest,
) -> ComparisonResult {
    let mut estimates: BTreeMap<EstimationMethod, MethodOutcome> = BTreeMap::new();

    estimates.insert(
        EstimationMethod::Cocomo,
        engine.cocomo(request.loc, request.project_type).into(),
    );
    estimates.insert(
        EstimationMethod::FunctionPoints,
        engine
            .function_points(request.function_points, request.function_point_complexity)
            .into(),
    );
    estimates.insert(
        EstimationMethod::ExpertJudgment,
        engine.expert_judgment(&request.expert_estimates).into(),
    );
    estimates.insert(
        EstimationMethod::LinearRegression,
        MethodOutcome::Estimate(
            engine.linear_regression_estimate(request.loc / 1000.0, request.complexity_score),
        ),
    );

    for (method, outcome) in &estimates {
        if let MethodOutcome::Failed { error } = outcome {
            warn!("{} estimate excluded: {}", method, error);
        }
    }

    let final_recommendation = mean_of_successes(&estimates);
    debug!("Final recommendation across {} methods: {:?}", estimates.len(), final_recommendation);

    ComparisonResult {
        estimates,
        final_recommendation,
    }
}

fn mean_of_successes(estimates: &BTreeMap<EstimationMethod, MethodOutcome>) -> Option<f64> {
    let costs: Vec<f64> = estimates.values().filter_map(MethodOutcome::total_cost).collect();
    if costs.is_empty() {
        return None;
    }
    Some(round2(costs.iter().sum::<f64>() / costs.len() as f64))
}
