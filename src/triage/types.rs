use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three symptom buckets of the flag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagTier {
    /// Go to hospital now.
    Red,
    /// See a doctor the same day.
    Orange,
    /// Mention at the next review.
    Yellow,
}

impl FlagTier {
    /// Tiers in scan order.
    pub const ALL: [FlagTier; 3] = [FlagTier::Red, FlagTier::Orange, FlagTier::Yellow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
        }
    }
}

/// Urgency of a triage verdict. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl TriageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Orange => "ORANGE",
            Self::Red => "RED",
        }
    }

    /// Recommended time window before seeking care.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Red => "within 1 hour",
            Self::Orange => "within 24 hours",
            Self::Yellow => "within 7 days",
            Self::Green => "continue routine care",
        }
    }
}

/// Outcome of classifying one set of reported symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageVerdict {
    pub level: TriageLevel,
    /// Recommended timeframe text.
    pub action: String,
    /// Reported symptoms that matched the deciding tier, in table order.
    pub matched_signs: Vec<String>,
    /// Patient-facing summary.
    pub message: String,
    /// True when several orange signs were promoted to RED.
    pub escalated: bool,
}

/// One category of a flag tier with its exact symptom descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCategory {
    pub name: String,
    pub symptoms: Vec<String>,
}

impl FlagCategory {
    pub fn new<S: Into<String>>(name: S, symptoms: &[&str]) -> Self {
        Self {
            name: name.into(),
            symptoms: symptoms.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Flag table construction errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Symptom {symptom:?} appears in both the {first} and {second} tiers")]
    DuplicateAcrossTiers {
        symptom: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Symptom {symptom:?} is listed twice in the {tier} tier")]
    DuplicateWithinTier { symptom: String, tier: &'static str },

    #[error("Empty symptom text in category {category:?} of the {tier} tier")]
    EmptySymptom { category: String, tier: &'static str },
}
