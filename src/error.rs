//! Error types for cost estimation and budget file handling
//!
//! Numeric results that cannot be computed (IRR non-convergence, zero
//! investment ROI) are reported as `None`, not as errors.

use thiserror::Error;

/// Errors raised by an individual cost estimator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// Lines of code must be strictly positive
    #[error("Lines of code must be positive (got {0})")]
    NonPositiveLoc(f64),

    /// Function point count must be strictly positive
    #[error("Function points must be positive (got {0})")]
    NonPositiveFunctionPoints(f64),

    /// PERT needs optimistic, most likely and pessimistic values
    #[error("Provide at least {required} estimates: optimistic, most likely, pessimistic (got {actual})")]
    InsufficientEstimates { required: usize, actual: usize },

    /// Least-squares fit of the regression model failed
    #[error("Regression model fit failed: {0}")]
    ModelFit(String),
}

/// Errors raised while reading or writing budget CSV files
#[derive(Error, Debug)]
pub enum BudgetFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate phase '{0}' in budget file")]
    DuplicatePhase(String),

    #[error("Negative amount for phase '{phase}': {amount}")]
    NegativeAmount { phase: String, amount: f64 },
}
