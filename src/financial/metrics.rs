//! Discounted cash-flow metrics: NPV, ROI, payback period

use serde::{Deserialize, Serialize};

use super::irr::{calculate_irr, npv_at_rate, IrrSolverConfig};
use crate::rounding::round2;

/// Headline metrics for an investment and its cash flows
///
/// `None` fields mean "not computable", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub npv: f64,
    pub irr_percent: Option<f64>,
    pub roi_percent: f64,
    pub payback_period_months: Option<u32>,
}

/// Net present value: sum of cf_t / (1 + rate)^t for t = 0..n-1
///
/// Rates at or below -1 are outside the domain and yield non-finite values.
pub fn npv(cash_flows: &[f64], rate: f64) -> f64 {
    npv_at_rate(cash_flows, rate)
}

/// Fractional payback period with linear interpolation inside the payback period.
///
/// `cash_flows` is the full series; its period 0 entry is ignored in favour of
/// `initial_investment`, whose magnitude is always treated as an outflow.
pub fn payback_period(initial_investment: f64, cash_flows: &[f64]) -> Option<f64> {
    let mut cumulative = -initial_investment.abs();

    for (period, &cash_flow) in cash_flows.iter().enumerate().skip(1) {
        let previous = cumulative;
        cumulative += cash_flow;

        if cumulative >= 0.0 {
            if previous >= 0.0 {
                return Some((period - 1) as f64);
            }
            return Some((period - 1) as f64 + previous.abs() / cash_flow);
        }
    }

    None
}

/// Return on investment as a percentage; not computable for a zero investment
pub fn roi(initial_investment: f64, total_return: f64) -> Option<f64> {
    if initial_investment == 0.0 {
        return None;
    }
    Some((total_return - initial_investment) / initial_investment * 100.0)
}

/// Present value of the flows after period 0 divided by the investment size
pub fn profitability_index(initial_investment: f64, cash_flows: &[f64], rate: f64) -> Option<f64> {
    let investment = initial_investment.abs();
    if investment == 0.0 {
        return None;
    }

    let pv_inflows: f64 = cash_flows
        .iter()
        .enumerate()
        .map(|(i, &cf)| cf / (1.0 + rate).powi(i as i32 + 1))
        .sum();

    Some(pv_inflows / investment)
}

/// Build the full series: investment as a negative period-0 flow, then `cash_flows`
pub fn full_series(initial_investment: f64, cash_flows: &[f64]) -> Vec<f64> {
    let mut series = Vec::with_capacity(cash_flows.len() + 1);
    series.push(-initial_investment.abs());
    series.extend_from_slice(cash_flows);
    series
}

/// Calculate NPV, IRR, ROI and whole-period payback for an investment.
///
/// # Arguments
/// * `initial_investment` - Investment amount, either sign (normalized to an outflow)
/// * `cash_flows` - Net cash flows for periods 1..n
/// * `discount_rate` - Periodic discount rate for NPV
/// * `irr_config` - Root solver settings
pub fn calculate_financial_metrics(
    initial_investment: f64,
    cash_flows: &[f64],
    discount_rate: f64,
    irr_config: &IrrSolverConfig,
) -> FinancialMetrics {
    let series = full_series(initial_investment, cash_flows);
    let investment = series[0];

    let npv = npv(&series, discount_rate);
    let irr = calculate_irr(&series, irr_config);

    let total_return: f64 = cash_flows.iter().sum();
    let roi = if investment != 0.0 {
        (total_return + investment) / investment.abs() * 100.0
    } else {
        0.0
    };

    // First period whose inclusive cumulative flow is non-negative
    let mut cumulative = 0.0;
    let mut payback = None;
    for (period, &cash_flow) in series.iter().enumerate() {
        cumulative += cash_flow;
        if cumulative >= 0.0 {
            payback = Some(period as u32);
            break;
        }
    }

    FinancialMetrics {
        npv: round2(npv),
        irr_percent: irr.map(|r| round2(r * 100.0)),
        roi_percent: round2(roi),
        payback_period_months: payback,
    }
}
