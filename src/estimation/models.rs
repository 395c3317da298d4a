//! Closed-form estimators: basic COCOMO, Function Points, PERT expert judgment

use serde::{Deserialize, Serialize};

use super::{CostEstimate, EstimationConfig, EstimationMethod};
use crate::error::EstimationError;
use crate::rounding::round2;

/// Basic COCOMO development mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CocomoMode {
    Organic,
    #[default]
    SemiDetached,
    Embedded,
}

/// Coefficients for effort = a * KLOC^b and schedule = c * effort^d
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CocomoCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CocomoCoefficients {
    /// Unrounded effort in person-months for a size in KLOC
    pub fn effort(&self, kloc: f64) -> f64 {
        self.a * kloc.powf(self.b)
    }
}

impl CocomoMode {
    pub fn coefficients(self) -> CocomoCoefficients {
        match self {
            CocomoMode::Organic => CocomoCoefficients { a: 2.4, b: 1.05, c: 2.5, d: 0.38 },
            CocomoMode::SemiDetached => CocomoCoefficients { a: 3.0, b: 1.12, c: 2.5, d: 0.35 },
            CocomoMode::Embedded => CocomoCoefficients { a: 3.6, b: 1.20, c: 2.5, d: 0.32 },
        }
    }
}

/// Function point complexity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionComplexity {
    Simple,
    #[default]
    Average,
    Complex,
}

impl FunctionComplexity {
    pub fn weight(self) -> f64 {
        match self {
            FunctionComplexity::Simple => 3.0,
            FunctionComplexity::Average => 4.0,
            FunctionComplexity::Complex => 6.0,
        }
    }
}

/// Basic COCOMO estimate from raw lines of code.
///
/// Reported figures are rounded to two decimals, so nearby sizes can report
/// the same effort; the underlying curve is strictly increasing.
pub fn cocomo(loc: f64, mode: CocomoMode, config: &EstimationConfig) -> Result<CostEstimate, EstimationError> {
    if loc.is_nan() || loc <= 0.0 {
        return Err(EstimationError::NonPositiveLoc(loc));
    }

    let kloc = loc / 1000.0;
    let coeffs = mode.coefficients();

    let effort = coeffs.effort(kloc);
    let duration = coeffs.c * effort.powf(coeffs.d);
    let total_cost = effort * config.cost_per_person_month;

    Ok(CostEstimate {
        effort_person_months: Some(round2(effort)),
        development_months: Some(round2(duration)),
        average_staffing: Some(round2(effort / duration)),
        ..CostEstimate::new(EstimationMethod::Cocomo, round2(total_cost))
    })
}

/// Function point estimate: points * weight * cost multiplier
pub fn function_points(
    points: f64,
    complexity: FunctionComplexity,
    config: &EstimationConfig,
) -> Result<CostEstimate, EstimationError> {
    if points.is_nan() || points <= 0.0 {
        return Err(EstimationError::NonPositiveFunctionPoints(points));
    }

    let cost_per_point = complexity.weight() * config.function_point_multiplier;
    Ok(CostEstimate::new(EstimationMethod::FunctionPoints, round2(points * cost_per_point)))
}

/// PERT three-point estimate from [optimistic, most likely, pessimistic].
///
/// Values beyond the third are ignored.
pub fn expert_judgment(estimates: &[f64]) -> Result<CostEstimate, EstimationError> {
    let [optimistic, most_likely, pessimistic] = match estimates {
        [o, m, p, ..] => [*o, *m, *p],
        _ => {
            return Err(EstimationError::InsufficientEstimates {
                required: 3,
                actual: estimates.len(),
            })
        }
    };

    let weighted_mean = (optimistic + 4.0 * most_likely + pessimistic) / 6.0;
    let std_dev = (pessimistic - optimistic).abs() / 6.0;

    Ok(CostEstimate {
        standard_deviation: Some(round2(std_dev)),
        ..CostEstimate::new(EstimationMethod::ExpertJudgment, round2(weighted_mean))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cocomo_semi_detached() {
        let estimate = cocomo(8000.0, CocomoMode::SemiDetached, &EstimationConfig::default()).unwrap();

        // 3.0 * 8^1.12 = 30.802 PM at 6000 per PM
        assert_eq!(estimate.method, EstimationMethod::Cocomo);
        assert_eq!(estimate.effort_person_months, Some(30.8));
        assert_relative_eq!(estimate.total_cost_euros, 184813.33, epsilon = 1e-6);
        assert_eq!(estimate.development_months, Some(8.3));
    }

    #[test]
    fn test_cocomo_modes_ordering() {
        let config = EstimationConfig::default();
        let organic = cocomo(50000.0, CocomoMode::Organic, &config).unwrap();
        let embedded = cocomo(50000.0, CocomoMode::Embedded, &config).unwrap();
        assert!(embedded.total_cost_euros > organic.total_cost_euros);
    }

    #[test]
    fn test_cocomo_rounded_effort_ties_but_curve_increases() {
        let config = EstimationConfig::default();
        let a = cocomo(8001.0, CocomoMode::SemiDetached, &config).unwrap();
        let b = cocomo(8002.0, CocomoMode::SemiDetached, &config).unwrap();
        assert_eq!(a.effort_person_months, b.effort_person_months);

        let coeffs = CocomoMode::SemiDetached.coefficients();
        assert!(coeffs.effort(8.002) > coeffs.effort(8.001));
    }

    #[test]
    fn test_cocomo_invalid_loc() {
        let config = EstimationConfig::default();
        assert_eq!(
            cocomo(0.0, CocomoMode::Organic, &config),
            Err(EstimationError::NonPositiveLoc(0.0))
        );
        assert!(cocomo(-10.0, CocomoMode::Organic, &config).is_err());
        assert!(cocomo(f64::NAN, CocomoMode::Organic, &config).is_err());
    }

    #[test]
    fn test_function_points() {
        let config = EstimationConfig::default();
        let estimate = function_points(350.0, FunctionComplexity::Average, &config).unwrap();
        // 350 * 4 * 30
        assert_eq!(estimate.total_cost_euros, 42000.0);

        let complex = function_points(100.0, FunctionComplexity::Complex, &config).unwrap();
        assert_eq!(complex.total_cost_euros, 18000.0);

        assert!(function_points(0.0, FunctionComplexity::Simple, &config).is_err());
    }

    #[test]
    fn test_expert_judgment_pert() {
        let estimate = expert_judgment(&[20000.0, 25000.0, 40000.0]).unwrap();
        assert_eq!(estimate.total_cost_euros, 26666.67);
        assert_eq!(estimate.standard_deviation, Some(3333.33));
    }

    #[test]
    fn test_expert_judgment_requires_three() {
        assert_eq!(
            expert_judgment(&[1000.0, 2000.0]),
            Err(EstimationError::InsufficientEstimates { required: 3, actual: 2 })
        );
        assert!(expert_judgment(&[]).is_err());

        let extra = expert_judgment(&[600.0, 600.0, 600.0, 99999.0]).unwrap();
        assert_eq!(extra.total_cost_euros, 600.0);
    }
}
