//! Project Economics - cost estimation and financial metrics for software projects
//!
//! This library provides:
//! - Cash-flow analysis (NPV, IRR, ROI, payback period)
//! - Investment decision scoring
//! - Budget variance tracking and cash-flow forecasting
//! - Project cost estimation (COCOMO, Function Points, PERT, regression)
//! - Multi-method cost comparison

pub mod error;
pub mod financial;
pub mod estimation;
pub mod request;
pub mod budget_file;

mod rounding;

// Re-export commonly used types
pub use error::{EstimationError, BudgetFileError};
pub use financial::{FinancialMetricsEngine, FinancialConfig, FinancialMetrics, Expenses};
pub use estimation::{CostEstimationEngine, EstimationConfig, CostEstimate, ComparisonResult};
pub use request::{CostComparisonRequest, FinancialMetricsRequest};
