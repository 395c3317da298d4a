//! Investment decision scoring
//!
//! Four independent signals (NPV, IRR, payback, profitability index) each add
//! to an integer score. The score maps to a recommendation and a risk tier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// IRR above this earns the full bonus
pub const IRR_STRONG_THRESHOLD: f64 = 0.15;
/// IRR above this is acceptable
pub const IRR_ACCEPTABLE_THRESHOLD: f64 = 0.10;
/// Payback within this many months is quick
pub const QUICK_PAYBACK_MONTHS: f64 = 12.0;
/// Payback within this many months is reasonable
pub const REASONABLE_PAYBACK_MONTHS: f64 = 24.0;
/// Profitability index above this is excellent
pub const HIGH_PROFITABILITY_INDEX: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Highly Recommended")]
    HighlyRecommended,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Conditional")]
    Conditional,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl Recommendation {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 3 => Recommendation::HighlyRecommended,
            s if s >= 1 => Recommendation::Recommended,
            s if s >= -1 => Recommendation::Conditional,
            _ => Recommendation::NotRecommended,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Recommendation::HighlyRecommended => "Highly Recommended",
            Recommendation::Recommended => "Recommended",
            Recommendation::Conditional => "Conditional",
            Recommendation::NotRecommended => "Not Recommended",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        if score >= 2 {
            RiskLevel::Low
        } else if score >= 0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Scored recommendation with the rationale for each applied rule, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDecision {
    pub decision: Recommendation,
    pub score: i32,
    pub rationale: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Score an investment.
///
/// # Arguments
/// * `npv` - Net present value
/// * `irr` - Periodic IRR as a decimal; `None` skips the IRR rule
/// * `payback_period` - Payback in months; `None` skips the payback rule
/// * `profitability_index` - PV of inflows over investment
pub fn investment_decision(
    npv: f64,
    irr: Option<f64>,
    payback_period: Option<f64>,
    profitability_index: f64,
) -> InvestmentDecision {
    let mut rationale = Vec::new();
    let mut score = 0;

    if npv > 0.0 {
        rationale.push("NPV is positive - project adds value".to_string());
        score += 2;
    } else {
        rationale.push("NPV is negative - project destroys value".to_string());
        score -= 2;
    }

    if let Some(irr) = irr {
        let pct = irr * 100.0;
        if irr > IRR_STRONG_THRESHOLD {
            rationale.push(format!("IRR ({:.1}%) exceeds minimum threshold", pct));
            score += 2;
        } else if irr > IRR_ACCEPTABLE_THRESHOLD {
            rationale.push(format!("IRR ({:.1}%) is acceptable", pct));
            score += 1;
        } else {
            rationale.push(format!("IRR ({:.1}%) is below threshold", pct));
            score -= 1;
        }
    }

    if let Some(months) = payback_period {
        if months <= QUICK_PAYBACK_MONTHS {
            rationale.push(format!("Quick payback period ({:.1} months)", months));
            score += 1;
        } else if months <= REASONABLE_PAYBACK_MONTHS {
            rationale.push(format!("Reasonable payback period ({:.1} months)", months));
        } else {
            rationale.push(format!("Long payback period ({:.1} months)", months));
            score -= 1;
        }
    }

    if profitability_index > HIGH_PROFITABILITY_INDEX {
        rationale.push("High profitability index - excellent value creation".to_string());
        score += 1;
    } else if profitability_index > 1.0 {
        rationale.push("Positive profitability index - value creation".to_string());
    } else {
        rationale.push("Poor profitability index - value destruction".to_string());
        score -= 1;
    }

    InvestmentDecision {
        decision: Recommendation::from_score(score),
        score,
        rationale,
        risk_level: RiskLevel::from_score(score),
    }
}
