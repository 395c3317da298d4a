//! Financial metrics engine: cash-flow analysis, investment scoring,
//! budget variance and cash-flow forecasting
//!
//! All operations are pure functions of their inputs. The engine only holds
//! configuration, so one instance can be shared freely across threads.

mod irr;
mod metrics;
mod decision;
mod variance;
mod forecast;

pub use irr::{calculate_irr, IrrSolverConfig};
pub use metrics::{
    npv, payback_period, roi, profitability_index, full_series,
    calculate_financial_metrics, FinancialMetrics,
};
pub use decision::{investment_decision, InvestmentDecision, Recommendation, RiskLevel};
pub use variance::{track_budget_variance, BudgetStatus, BudgetVarianceReport, PhaseVariance, VarianceSummary};
pub use forecast::{forecast_cash_flow, CashFlowForecast, Expenses, ForecastEntry};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rounding::round2;

/// Default periodic discount rate
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialConfig {
    /// Discount rate used when a caller does not supply one
    pub default_discount_rate: f64,
    /// IRR root solver settings
    pub irr: IrrSolverConfig,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            default_discount_rate: DEFAULT_DISCOUNT_RATE,
            irr: IrrSolverConfig::default(),
        }
    }
}

/// Full investment appraisal: headline metrics plus the scored decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub npv: f64,
    pub irr_percent: Option<f64>,
    pub payback_period_months: Option<f64>,
    pub profitability_index: Option<f64>,
    pub decision: InvestmentDecision,
}

#[derive(Debug, Clone, Default)]
pub struct FinancialMetricsEngine {
    config: FinancialConfig,
}

impl FinancialMetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FinancialConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FinancialConfig {
        &self.config
    }

    pub fn npv(&self, cash_flows: &[f64], rate: f64) -> f64 {
        npv(cash_flows, rate)
    }

    /// Periodic IRR, `None` when the solver does not find an admissible root
    pub fn irr(&self, cash_flows: &[f64]) -> Option<f64> {
        calculate_irr(cash_flows, &self.config.irr)
    }

    pub fn payback_period(&self, initial_investment: f64, cash_flows: &[f64]) -> Option<f64> {
        payback_period(initial_investment, cash_flows)
    }

    pub fn roi(&self, initial_investment: f64, total_return: f64) -> Option<f64> {
        roi(initial_investment, total_return)
    }

    /// NPV, IRR, ROI and payback; `discount_rate` falls back to the configured default
    pub fn financial_metrics(
        &self,
        initial_investment: f64,
        cash_flows: &[f64],
        discount_rate: Option<f64>,
    ) -> FinancialMetrics {
        let rate = discount_rate.unwrap_or(self.config.default_discount_rate);
        calculate_financial_metrics(initial_investment, cash_flows, rate, &self.config.irr)
    }

    pub fn investment_decision(
        &self,
        npv: f64,
        irr: Option<f64>,
        payback_period: Option<f64>,
        profitability_index: f64,
    ) -> InvestmentDecision {
        investment_decision(npv, irr, payback_period, profitability_index)
    }

    /// Derive every decision input from the raw cash flows and score the investment.
    ///
    /// A zero investment has no profitability index and scores as PI = 0.
    pub fn analyze_investment(
        &self,
        initial_investment: f64,
        cash_flows: &[f64],
        discount_rate: Option<f64>,
    ) -> InvestmentAnalysis {
        let rate = discount_rate.unwrap_or(self.config.default_discount_rate);
        let series = full_series(initial_investment, cash_flows);

        let npv = npv(&series, rate);
        let irr = self.irr(&series);
        let payback = payback_period(initial_investment, &series);
        let pi = profitability_index(initial_investment, cash_flows, rate);

        let decision = investment_decision(npv, irr, payback, pi.unwrap_or(0.0));

        InvestmentAnalysis {
            npv: round2(npv),
            irr_percent: irr.map(|r| round2(r * 100.0)),
            payback_period_months: payback.map(round2),
            profitability_index: pi.map(round2),
            decision,
        }
    }

    pub fn track_budget_variance(
        &self,
        planned: &BTreeMap<String, f64>,
        actual: &BTreeMap<String, f64>,
    ) -> BudgetVarianceReport {
        track_budget_variance(planned, actual)
    }

    pub fn forecast_cash_flow(
        &self,
        initial_revenue: f64,
        annual_growth_rate: f64,
        expenses: &Expenses,
        months: u32,
    ) -> CashFlowForecast {
        forecast_cash_flow(initial_revenue, annual_growth_rate, expenses, months)
    }
}
