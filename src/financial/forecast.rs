//! Monthly cash-flow forecasting with compounding revenue growth

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rounding::round2;

/// Monthly expense input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expenses {
    /// One fixed amount per month
    Fixed(f64),
    /// Named categories, summed each month
    Itemized(BTreeMap<String, f64>),
}

impl Expenses {
    pub fn monthly_total(&self) -> f64 {
        match self {
            Expenses::Fixed(amount) => *amount,
            Expenses::Itemized(items) => items.values().sum(),
        }
    }
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub month: u32,
    pub revenue: f64,
    pub expenses: f64,
    pub net_cash_flow: f64,
    /// Running total of `net_cash_flow` up to and including this month
    pub cumulative_net_cash_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    pub forecast: Vec<ForecastEntry>,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_net_cash_flow: f64,
}

/// Project `months` months of revenue, expenses and net cash flow.
///
/// Revenue starts at `initial_revenue` in month 1 and compounds monthly by
/// `annual_growth_rate / 12` from month 2 on. Amounts are rounded to cents
/// per entry; running and grand totals sum the rounded entries.
pub fn forecast_cash_flow(
    initial_revenue: f64,
    annual_growth_rate: f64,
    expenses: &Expenses,
    months: u32,
) -> CashFlowForecast {
    let monthly_growth = 1.0 + annual_growth_rate / 12.0;
    let monthly_expenses = round2(expenses.monthly_total());

    let mut forecast = Vec::with_capacity(months as usize);
    let mut revenue = initial_revenue;
    let mut cumulative = 0.0;

    for month in 1..=months {
        if month > 1 {
            revenue *= monthly_growth;
        }

        let net_cash_flow = round2(revenue - monthly_expenses);
        cumulative += net_cash_flow;

        forecast.push(ForecastEntry {
            month,
            revenue: round2(revenue),
            expenses: monthly_expenses,
            net_cash_flow,
            cumulative_net_cash_flow: round2(cumulative),
        });
    }

    let total_revenue = round2(forecast.iter().map(|e| e.revenue).sum());
    let total_expenses = round2(forecast.iter().map(|e| e.expenses).sum());
    let total_net_cash_flow = round2(forecast.iter().map(|e| e.net_cash_flow).sum());

    CashFlowForecast {
        forecast,
        total_revenue,
        total_expenses,
        total_net_cash_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_expenses_no_growth() {
        let result = forecast_cash_flow(10000.0, 0.0, &Expenses::Fixed(7000.0), 3);

        assert_eq!(result.forecast.len(), 3);
        for (i, entry) in result.forecast.iter().enumerate() {
            assert_eq!(entry.month, i as u32 + 1);
            assert_eq!(entry.net_cash_flow, 3000.0);
            assert_eq!(entry.cumulative_net_cash_flow, 3000.0 * (i as f64 + 1.0));
        }
        assert_eq!(result.total_revenue, 30000.0);
        assert_eq!(result.total_expenses, 21000.0);
        assert_eq!(result.total_net_cash_flow, 9000.0);
    }

    #[test]
    fn test_monthly_compounding() {
        let result = forecast_cash_flow(1000.0, 0.12, &Expenses::Fixed(0.0), 3);

        assert_eq!(result.forecast[0].revenue, 1000.0);
        assert_eq!(result.forecast[1].revenue, 1010.0);
        assert_eq!(result.forecast[2].revenue, 1020.1);
    }

    #[test]
    fn test_itemized_expenses() {
        let items: BTreeMap<String, f64> = [("salaries", 5000.0), ("hosting", 250.5), ("tools", 100.0)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();

        let result = forecast_cash_flow(6000.0, 0.0, &Expenses::Itemized(items), 2);
        assert_eq!(result.forecast[0].expenses, 5350.5);
        assert_relative_eq!(result.forecast[1].cumulative_net_cash_flow, 1299.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cumulative_includes_current_month() {
        let result = forecast_cash_flow(500.0, 0.0, &Expenses::Fixed(800.0), 2);
        assert_eq!(result.forecast[0].cumulative_net_cash_flow, -300.0);
        assert_eq!(result.forecast[1].cumulative_net_cash_flow, -600.0);
    }

    #[test]
    fn test_zero_months() {
        let result = forecast_cash_flow(1000.0, 0.1, &Expenses::Fixed(100.0), 0);
        assert!(result.forecast.is_empty());
        assert_eq!(result.total_net_cash_flow, 0.0);
    }

    #[test]
    fn test_expenses_json_tagging() {
        let fixed: Expenses = serde_json::from_str(r#"{"fixed": 1200.0}"#).unwrap();
        assert_eq!(fixed, Expenses::Fixed(1200.0));

        let itemized: Expenses = serde_json::from_str(r#"{"itemized": {"rent": 800, "power": 150}}"#).unwrap();
        assert_eq!(itemized.monthly_total(), 950.0);
    }
}
