//! Linear regression cost model trained on a synthetic project dataset
//!
//! The dataset is generated from a fixed seed, so every engine built with the
//! same configuration fits exactly the same coefficients:
//!
//! ```text
//! cost = 2000 * loc_thousands + 3000 * complexity_score + N(0, noise_std_dev)
//! ```
//!
//! with `loc_thousands` drawn from the integers 5..100 and `complexity_score`
//! uniform on [1, 10).

use log::debug;
use nalgebra::{DMatrix, DVector};
use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::EstimationConfig;
use crate::error::EstimationError;

const COST_PER_KLOC: f64 = 2000.0;
const COST_PER_COMPLEXITY_POINT: f64 = 3000.0;

/// One synthetic training project
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub loc_thousands: f64,
    pub complexity_score: f64,
    pub cost_euros: f64,
}

/// Fitted model: cost = intercept + loc_coefficient * kloc + complexity_coefficient * complexity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub intercept: f64,
    pub loc_coefficient: f64,
    pub complexity_coefficient: f64,
    /// In-sample coefficient of determination
    pub r_squared: f64,
}

impl RegressionModel {
    /// Generate the synthetic dataset and fit it by ordinary least squares
    pub fn train(config: &EstimationConfig) -> Result<Self, EstimationError> {
        let samples = synthetic_dataset(config)?;
        let model = Self::fit(&samples)?;
        debug!(
            "Regression model trained on {} projects: intercept={:.2}, loc={:.2}, complexity={:.2}, r2={:.4}",
            samples.len(),
            model.intercept,
            model.loc_coefficient,
            model.complexity_coefficient,
            model.r_squared
        );
        Ok(model)
    }

    /// Ordinary least squares with an intercept term
    pub fn fit(samples: &[TrainingSample]) -> Result<Self, EstimationError> {
        if samples.len() < 3 {
            return Err(EstimationError::ModelFit(format!(
                "need at least 3 samples, got {}",
                samples.len()
            )));
        }

        let n = samples.len();
        let x = DMatrix::from_fn(n, 3, |i, j| match j {
            0 => 1.0,
            1 => samples[i].loc_thousands,
            _ => samples[i].complexity_score,
        });
        let y = DVector::from_iterator(n, samples.iter().map(|s| s.cost_euros));

        let xt = x.transpose();
        let beta = (&xt * &x)
            .cholesky()
            .ok_or_else(|| EstimationError::ModelFit("normal equations are singular".to_string()))?
            .solve(&(&xt * &y));

        let fitted = &x * &beta;
        let mean = y.mean();
        let ss_res: f64 = y.iter().zip(fitted.iter()).map(|(a, f)| (a - f).powi(2)).sum();
        let ss_tot: f64 = y.iter().map(|a| (a - mean).powi(2)).sum();
        let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

        Ok(Self {
            intercept: beta[0],
            loc_coefficient: beta[1],
            complexity_coefficient: beta[2],
            r_squared,
        })
    }

    /// Raw model prediction, unfloored
    pub fn predict(&self, loc_thousands: f64, complexity_score: f64) -> f64 {
        self.intercept
            + self.loc_coefficient * loc_thousands
            + self.complexity_coefficient * complexity_score
    }
}

/// Deterministic synthetic training set
pub fn synthetic_dataset(config: &EstimationConfig) -> Result<Vec<TrainingSample>, EstimationError> {
    let noise = Normal::new(0.0, config.training_noise_std_dev)
        .map_err(|e| EstimationError::ModelFit(format!("invalid noise distribution: {}", e)))?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.training_seed);

    let samples = (0..config.training_projects)
        .map(|_| {
            let loc_thousands = rng.gen_range(5..100) as f64;
            let complexity_score = rng.gen_range(1.0..10.0);
            let cost_euros = loc_thousands * COST_PER_KLOC
                + complexity_score * COST_PER_COMPLEXITY_POINT
                + noise.sample(&mut rng);
            TrainingSample {
                loc_thousands,
                complexity_score,
                cost_euros,
            }
        })
        .collect();

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dataset_shape() {
        let config = EstimationConfig::default();
        let samples = synthetic_dataset(&config).unwrap();

        assert_eq!(samples.len(), 50);
        for s in &samples {
            assert!(s.loc_thousands >= 5.0 && s.loc_thousands < 100.0);
            assert_eq!(s.loc_thousands.fract(), 0.0);
            assert!(s.complexity_score >= 1.0 && s.complexity_score < 10.0);
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let config = EstimationConfig::default();
        let first = RegressionModel::train(&config).unwrap();
        let second = RegressionModel::train(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recovers_generating_coefficients() {
        let model = RegressionModel::train(&EstimationConfig::default()).unwrap();

        assert!((model.loc_coefficient - 2000.0).abs() < 150.0, "loc coefficient {}", model.loc_coefficient);
        assert!(
            (model.complexity_coefficient - 3000.0).abs() < 1000.0,
            "complexity coefficient {}",
            model.complexity_coefficient
        );
        assert!(model.r_squared > 0.95);
    }

    #[test]
    fn test_exact_fit_without_noise() {
        let samples: Vec<TrainingSample> = [(10.0, 2.0), (20.0, 5.0), (35.0, 1.0), (50.0, 9.0), (80.0, 4.0)]
            .iter()
            .map(|&(loc, cx)| TrainingSample {
                loc_thousands: loc,
                complexity_score: cx,
                cost_euros: 1000.0 + 2000.0 * loc + 3000.0 * cx,
            })
            .collect();

        let model = RegressionModel::fit(&samples).unwrap();
        assert_relative_eq!(model.intercept, 1000.0, epsilon = 1e-6);
        assert_relative_eq!(model.loc_coefficient, 2000.0, epsilon = 1e-6);
        assert_relative_eq!(model.complexity_coefficient, 3000.0, epsilon = 1e-6);
        assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-9);
        assert_relative_eq!(model.predict(10.0, 2.0), 27000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_requires_three_samples() {
        assert!(RegressionModel::fit(&[]).is_err());

        let sample = TrainingSample {
            loc_thousands: 10.0,
            complexity_score: 2.0,
            cost_euros: 26000.0,
        };
        assert!(matches!(
            RegressionModel::fit(&[sample, sample]),
            Err(EstimationError::ModelFit(_))
        ));
    }
}
