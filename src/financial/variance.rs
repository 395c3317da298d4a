//! Budget variance tracking across project phases

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::rounding::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "Over Budget")]
    OverBudget,
    #[serde(rename = "Under Budget")]
    UnderBudget,
    #[serde(rename = "On Budget")]
    OnBudget,
}

impl BudgetStatus {
    /// Status from variance = planned - actual
    pub fn from_variance(variance: f64) -> Self {
        if variance < 0.0 {
            BudgetStatus::OverBudget
        } else if variance == 0.0 {
            BudgetStatus::OnBudget
        } else {
            BudgetStatus::UnderBudget
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::OnBudget => "On Budget",
        };
        f.write_str(label)
    }
}

/// Variance record for a single phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseVariance {
    pub planned: f64,
    pub actual: f64,
    pub variance: f64,
    pub variance_percent: f64,
    pub status: BudgetStatus,
}

/// Whole-project totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceSummary {
    pub total_planned: f64,
    pub total_actual: f64,
    pub total_variance: f64,
    pub total_variance_percent: f64,
    pub estimate_at_completion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetVarianceReport {
    pub phase_analysis: BTreeMap<String, PhaseVariance>,
    pub summary: VarianceSummary,
}

/// Compare planned and actual cost per phase.
///
/// Phases are keyed by the planned map; a phase missing from `actual` has spent 0.
/// Actual costs for phases not in the plan still count toward the total actual.
pub fn track_budget_variance(
    planned: &BTreeMap<String, f64>,
    actual: &BTreeMap<String, f64>,
) -> BudgetVarianceReport {
    let total_planned: f64 = planned.values().sum();
    let total_actual: f64 = actual.values().sum();

    let phase_analysis = planned
        .iter()
        .map(|(phase, &planned_cost)| {
            let actual_cost = actual.get(phase).copied().unwrap_or(0.0);
            let variance = planned_cost - actual_cost;
            let variance_percent = if planned_cost > 0.0 {
                variance / planned_cost * 100.0
            } else {
                0.0
            };

            let record = PhaseVariance {
                planned: planned_cost,
                actual: actual_cost,
                variance: round2(variance),
                variance_percent: round2(variance_percent),
                status: BudgetStatus::from_variance(variance),
            };
            (phase.clone(), record)
        })
        .collect();

    let total_variance = total_planned - total_actual;
    let total_variance_percent = if total_planned > 0.0 {
        total_variance / total_planned * 100.0
    } else {
        0.0
    };

    BudgetVarianceReport {
        phase_analysis,
        summary: VarianceSummary {
            total_planned,
            total_actual,
            total_variance: round2(total_variance),
            total_variance_percent: round2(total_variance_percent),
            estimate_at_completion: round2(estimate_at_completion(total_planned, total_actual)),
        },
    }
}

/// EAC = actual / (actual / planned), falling back to planned when either total is zero.
///
/// This reduces to `total_planned` whenever both totals are positive.
/// Kept as-is until the intended spend-rate semantics are confirmed.
fn estimate_at_completion(total_planned: f64, total_actual: f64) -> f64 {
    if total_planned > 0.0 && total_actual > 0.0 {
        let cost_ratio = total_actual / total_planned;
        if total_actual > total_planned {
            warn!(
                "Actual spend {:.2} exceeds plan {:.2} but EAC still reports the plan",
                total_actual, total_planned
            );
        }
        total_actual / cost_ratio
    } else {
        total_planned
    }
}
