//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson seeded at the configured guess, with a bisection fallback.
//! A root is only reported when it actually zeroes the NPV and lies inside
//! the admissible rate range; every other outcome is `None`.

use log::{debug, warn};

const MAX_STEP_HALVINGS: u32 = 200;

/// Solver settings for IRR root finding
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IrrSolverConfig {
    /// Starting rate for Newton-Raphson
    pub initial_guess: f64,
    /// Maximum |NPV| at the accepted root
    pub npv_tolerance: f64,
    /// Exclusive lower bound on an accepted rate
    pub min_rate: f64,
    /// Exclusive upper bound on an accepted rate
    pub max_rate: f64,
    /// Iteration cap for each solver stage
    pub max_iterations: u32,
}

impl Default for IrrSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            npv_tolerance: 1e-6,
            min_rate: -0.99,
            max_rate: 10.0,
            max_iterations: 1000,
        }
    }
}

/// Calculate the periodic Internal Rate of Return of a cash-flow series.
///
/// # Arguments
/// * `cashflows` - Cash flows indexed by period (period 0 first, negative = outflow)
/// * `config` - Solver settings
///
/// # Returns
/// * `Option<f64>` - Periodic IRR as a decimal (0.05 for 5%), or None if not computable
pub fn calculate_irr(cashflows: &[f64], config: &IrrSolverConfig) -> Option<f64> {
    if cashflows.len() < 2 {
        return None;
    }

    // Without a sign change NPV has no root (or, for all-zero flows, every rate is one)
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        debug!("IRR not computable: cash flows have no sign change");
        return None;
    }

    if let Some(rate) = newton_raphson(cashflows, config) {
        if is_admissible(cashflows, rate, config) {
            debug!("IRR converged via Newton-Raphson: {:.8}", rate);
            return Some(rate);
        }
    }

    match bisection(cashflows, config) {
        Some(rate) if is_admissible(cashflows, rate, config) => {
            debug!("IRR converged via bisection: {:.8}", rate);
            Some(rate)
        }
        _ => {
            warn!("IRR solver did not converge for {} cash flows", cashflows.len());
            None
        }
    }
}

fn is_admissible(cashflows: &[f64], rate: f64, config: &IrrSolverConfig) -> bool {
    rate.is_finite()
        && rate > config.min_rate
        && rate < config.max_rate
        && npv_at_rate(cashflows, rate).abs() < config.npv_tolerance
}

fn newton_raphson(cashflows: &[f64], config: &IrrSolverConfig) -> Option<f64> {
    let tolerance = 1e-12;
    let mut rate = config.initial_guess;

    for _ in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if !npv.is_finite() || !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            return None;
        }

        // Halve the step until it lands strictly inside the range on a finite NPV,
        // so (1 + rate) stays positive and the iterate never sticks to a bound
        let mut step = npv / dnpv;
        let mut new_rate = rate - step;
        let mut halvings = 0;
        while !(new_rate > config.min_rate
            && new_rate < config.max_rate
            && npv_at_rate(cashflows, new_rate).is_finite())
        {
            if halvings == MAX_STEP_HALVINGS {
                return None;
            }
            step /= 2.0;
            new_rate = rate - step;
            halvings += 1;
        }

        if (new_rate - rate).abs() < tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    None
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate().filter(|&(_, &cf)| cf != 0.0) {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Fallback over the whole admissible range
fn bisection(cashflows: &[f64], config: &IrrSolverConfig) -> Option<f64> {
    // Stay strictly inside the open interval
    let mut low = config.min_rate + 1e-9;
    let mut high = config.max_rate - 1e-9;
    let tolerance = 1e-15;

    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // Near -100% large opposite-signed terms can overflow to inf - inf;
    // walk the lower bracket up until NPV is defined there
    let mut attempts = 0;
    while npv_low.is_nan() && attempts < 64 {
        low = (2.0 * (1.0 + low) - 1.0).min((low + high) / 2.0);
        npv_low = npv_at_rate(cashflows, low);
        attempts += 1;
    }

    // Need a root in this interval
    let product = npv_low * npv_high;
    if product.is_nan() || product > 0.0 {
        return None;
    }

    for _ in 0..config.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < config.npv_tolerance * 1e-3 || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Calculate NPV at a given periodic rate
pub(crate) fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .filter(|&(_, &cf)| cf != 0.0)
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
