//! Plain-text rendering of verdicts for the terminal.

use crate::inheritance::PredictedRisk;
use crate::likelihood::{LikelihoodBand, LikelihoodVerdict};
use crate::triage::{FlagTable, FlagTier, TriageLevel, TriageVerdict};

/// Width of a full (100%) bar in the risk chart.
const BAR_WIDTH: usize = 20;

/// Display banding of a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 60 {
            Self::High
        } else if percent >= 30 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

fn level_badge(level: TriageLevel) -> &'static str {
    match level {
        TriageLevel::Red => "RED 🚨",
        TriageLevel::Orange => "ORANGE ⚠️",
        TriageLevel::Yellow => "YELLOW 🟡",
        TriageLevel::Green => "GREEN ✅",
    }
}

fn tier_heading(tier: FlagTier) -> &'static str {
    match tier {
        FlagTier::Red => "RED: go to hospital",
        FlagTier::Orange => "ORANGE: see a doctor today",
        FlagTier::Yellow => "YELLOW: mention at next review",
    }
}

pub fn symptoms(table: &FlagTable) -> String {
    let mut out = String::new();
    for tier in FlagTier::ALL {
        out.push_str(tier_heading(tier));
        out.push('\n');
        for category in table.tier(tier) {
            out.push_str(&format!("  {}\n", category.name));
            for symptom in &category.symptoms {
                out.push_str(&format!("    - {symptom}\n"));
            }
        }
    }
    out
}

pub fn conditions(names: &[&str]) -> String {
    names.iter().map(|name| format!("- {name}\n")).collect()
}

pub fn triage(verdict: &TriageVerdict) -> String {
    let mut out = format!(
        "Triage Level: {}\nAction: {} ({})\n",
        level_badge(verdict.level),
        verdict.message,
        verdict.action
    );
    if !verdict.matched_signs.is_empty() {
        out.push_str("Detected symptoms:\n");
        for sign in &verdict.matched_signs {
            out.push_str(&format!("- {sign}\n"));
        }
    }
    out
}

pub fn likelihood(verdict: &LikelihoodVerdict) -> String {
    let mut out = format!(
        "Pregnancy Likelihood: {} (score {})\n",
        verdict.band.as_str(),
        verdict.score
    );
    if verdict.positive_questions.is_empty() {
        out.push_str("No symptoms selected.\n");
    } else {
        out.push_str("Symptoms you selected:\n");
        for question in &verdict.positive_questions {
            out.push_str(&format!("- {question}\n"));
        }
    }
    out.push_str(&format!("Recommendation:\n- {}\n", verdict.recommendation));
    if verdict.band == LikelihoodBand::High {
        out.push_str("This is not a diagnosis. Only a test can confirm pregnancy.\n");
    }
    out
}

/// Horizontal bar chart, highest risk first.
pub fn risk_chart(risk: &PredictedRisk) -> String {
    if risk.is_empty() {
        return "No significant inherited risk detected.\n".to_string();
    }

    let mut rows: Vec<(&String, u8)> = risk.iter().map(|(name, pct)| (name, *pct)).collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let label_width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    rows.into_iter()
        .map(|(name, pct)| {
            let filled = (usize::from(pct) * BAR_WIDTH / 100).min(BAR_WIDTH);
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
            format!(
                "{name:<label_width$}  {bar} {pct:>3}%  {}\n",
                RiskBand::from_percent(pct).as_str()
            )
        })
        .collect()
}
