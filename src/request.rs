//! Request parameters accepted at the JSON boundary
//!
//! Every field is optional on the wire; missing fields take the documented
//! default so an empty object `{}` is always a valid request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::estimation::{CocomoMode, FunctionComplexity};
use crate::financial::{Expenses, DEFAULT_DISCOUNT_RATE};

/// Input for the multi-method cost comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComparisonRequest {
    /// Lines of code (default: 8000)
    #[serde(default = "default_loc")]
    pub loc: f64,

    /// Unadjusted function point count (default: 350)
    #[serde(default = "default_function_points")]
    pub function_points: f64,

    /// [optimistic, most likely, pessimistic] (default: 20000, 25000, 40000)
    #[serde(default = "default_expert_estimates")]
    pub expert_estimates: Vec<f64>,

    /// Complexity score on a 1-10 scale (default: 5)
    #[serde(default = "default_complexity_score")]
    pub complexity_score: f64,

    /// COCOMO mode (default: semi_detached)
    #[serde(default)]
    pub project_type: CocomoMode,

    /// Function point complexity class (default: average)
    #[serde(default)]
    pub function_point_complexity: FunctionComplexity,
}

fn default_loc() -> f64 { 8000.0 }
fn default_function_points() -> f64 { 350.0 }
fn default_expert_estimates() -> Vec<f64> { vec![20000.0, 25000.0, 40000.0] }
fn default_complexity_score() -> f64 { 5.0 }

impl Default for CostComparisonRequest {
    fn default() -> Self {
        Self {
            loc: default_loc(),
            function_points: default_function_points(),
            expert_estimates: default_expert_estimates(),
            complexity_score: default_complexity_score(),
            project_type: CocomoMode::default(),
            function_point_complexity: FunctionComplexity::default(),
        }
    }
}

/// Input for NPV/IRR/ROI/payback and for the investment analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetricsRequest {
    /// Investment amount; either sign is treated as an outflow (default: 25000)
    #[serde(default = "default_initial_investment")]
    pub initial_investment: f64,

    /// Net cash flows for periods 1..n (default: 24 x 1000)
    #[serde(default = "default_cash_flows")]
    pub cash_flows: Vec<f64>,

    /// Periodic discount rate (default: 0.10)
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
}

fn default_initial_investment() -> f64 { 25000.0 }
fn default_cash_flows() -> Vec<f64> { vec![1000.0; 24] }
fn default_discount_rate() -> f64 { DEFAULT_DISCOUNT_RATE }

impl Default for FinancialMetricsRequest {
    fn default() -> Self {
        Self {
            initial_investment: default_initial_investment(),
            cash_flows: default_cash_flows(),
            discount_rate: default_discount_rate(),
        }
    }
}

/// Planned and actual cost per phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetVarianceRequest {
    #[serde(default)]
    pub planned: BTreeMap<String, f64>,

    #[serde(default)]
    pub actual: BTreeMap<String, f64>,
}

/// Input for the monthly cash-flow forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub initial_revenue: f64,

    /// Annual growth rate, compounded monthly (default: 0)
    #[serde(default)]
    pub growth_rate: f64,

    pub expenses: Expenses,

    /// Number of months to project (default: 12)
    #[serde(default = "default_forecast_months")]
    pub months: u32,
}

fn default_forecast_months() -> u32 { 12 }
