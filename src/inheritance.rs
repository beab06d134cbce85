//! Inherited condition risk from family history.
//!
//! Every relative who has a condition adds that relative's weight to the
//! condition's running score. Scores are then converted to whole
//! percentages, and conditions below the significance threshold are dropped
//! from the result entirely.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Policy, RoundingMode};

/// Conditions offered for selection by the questionnaire.
pub const CONDITIONS: &[&str] = &[
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Epilepsy",
    "Heart Disease",
    "Sickle Cell Disease",
    "Thalassemia",
    "Cystic Fibrosis",
    "Hemophilia",
    "Down Syndrome",
];

/// Float noise tolerated when comparing against the threshold and rounding.
const EPSILON: f64 = 1e-9;

/// Percentages are snapped to this many steps per unit before rounding.
const ROUNDING_GRID: f64 = 1e6;

static BUILTIN: LazyLock<RelationWeights> = LazyLock::new(|| {
    RelationWeights::new(
        Relation::ALL
            .iter()
            .map(|relation| (*relation, relation.default_weight()))
            .collect(),
    )
    .expect("Invalid built-in relation weights")
});

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relation {
    Mother,
    Father,
    MaternalGrandparents,
    PaternalGrandparents,
}

impl Relation {
    pub const ALL: [Relation; 4] = [
        Relation::Mother,
        Relation::Father,
        Relation::MaternalGrandparents,
        Relation::PaternalGrandparents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mother => "Mother",
            Self::Father => "Father",
            Self::MaternalGrandparents => "Maternal Grandparents",
            Self::PaternalGrandparents => "Paternal Grandparents",
        }
    }

    fn default_weight(&self) -> f64 {
        match self {
            Self::Mother | Self::Father => 0.4,
            Self::MaternalGrandparents | Self::PaternalGrandparents => 0.1,
        }
    }
}

/// Conditions selected per relative.
pub type FamilyHistory = BTreeMap<Relation, BTreeSet<String>>;

/// Accumulated fractional score per condition.
pub type RiskMap = BTreeMap<String, f64>;

/// Whole-percentage risk per condition, significant entries only.
pub type PredictedRisk = BTreeMap<String, u8>;

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight for {relation} must be a non-negative number, got {weight}")]
    Invalid { relation: &'static str, weight: f64 },
}

/// Contribution of each relative to a condition's score.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationWeights {
    weights: BTreeMap<Relation, f64>,
}

impl RelationWeights {
    /// Relatives missing from `weights` contribute nothing.
    pub fn new(weights: BTreeMap<Relation, f64>) -> Result<Self, WeightError> {
        for (relation, weight) in &weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(WeightError::Invalid {
                    relation: relation.as_str(),
                    weight: *weight,
                });
            }
        }
        Ok(Self { weights })
    }

    /// Mother 0.4, Father 0.4, each set of grandparents 0.1.
    pub fn builtin() -> &'static RelationWeights {
        &BUILTIN
    }

    pub fn weight(&self, relation: Relation) -> f64 {
        self.weights.get(&relation).copied().unwrap_or(0.0)
    }
}

// ═══════════════════════════════════════════
// Aggregation
// ═══════════════════════════════════════════

/// Sum relation weights per condition across all relatives.
pub fn accumulate(history: &FamilyHistory, weights: &RelationWeights) -> RiskMap {
    let mut scores = RiskMap::new();
    for (relation, conditions) in history {
        let weight = weights.weight(*relation);
        for condition in conditions {
            *scores.entry(condition.clone()).or_insert(0.0) += weight;
        }
    }
    scores
}

/// Convert a fractional score to a whole percentage, capped at 100.
pub fn to_percent(value: f64, rounding: RoundingMode) -> u8 {
    let scaled = (value * 100.0 * ROUNDING_GRID).round() / ROUNDING_GRID;
    let rounded = match rounding {
        RoundingMode::HalfUp => scaled.round(),
        RoundingMode::HalfEven => scaled.round_ties_even(),
    };
    rounded.clamp(0.0, 100.0) as u8
}

/// Predict inherited risk with the built-in relation weights.
pub fn predict(history: &FamilyHistory, policy: &Policy) -> PredictedRisk {
    predict_with(RelationWeights::builtin(), history, policy)
}

/// Predict inherited risk with explicit relation weights.
pub fn predict_with(
    weights: &RelationWeights,
    history: &FamilyHistory,
    policy: &Policy,
) -> PredictedRisk {
    let scores = accumulate(history, weights);
    let total = scores.len();

    let risk: PredictedRisk = scores
        .into_iter()
        .filter(|(_, value)| value + EPSILON >= policy.significance_threshold)
        .map(|(condition, value)| (condition, to_percent(value, policy.rounding)))
        .collect();

    tracing::debug!(
        conditions = total,
        significant = risk.len(),
        "Inherited risk predicted"
    );
    risk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[(Relation, &[&str])]) -> FamilyHistory {
        entries
            .iter()
            .map(|(relation, conditions)| {
                (*relation, conditions.iter().map(|c| (*c).to_string()).collect())
            })
            .collect()
    }

    fn run(entries: &[(Relation, &[&str])]) -> PredictedRisk {
        predict(&history(entries), &Policy::default())
    }

    // ── Worked examples ────────────────────────────────────────

    #[test]
    fn both_parents_diabetes_is_80() {
        let risk = run(&[
            (Relation::Mother, &["Diabetes"]),
            (Relation::Father, &["Diabetes"]),
        ]);
        assert_eq!(risk, PredictedRisk::from([("Diabetes".to_string(), 80)]));
    }

    #[test]
    fn single_grandparent_condition_is_filtered_out() {
        let risk = run(&[(Relation::MaternalGrandparents, &["Asthma"])]);
        assert!(risk.is_empty());
        assert!(!risk.contains_key("Asthma"));
    }

    #[test]
    fn mother_and_paternal_grandparents_epilepsy_is_50() {
        let risk = run(&[
            (Relation::Mother, &["Epilepsy"]),
            (Relation::PaternalGrandparents, &["Epilepsy"]),
        ]);
        assert_eq!(risk, PredictedRisk::from([("Epilepsy".to_string(), 50)]));
    }

    // ── Threshold and cap ──────────────────────────────────────

    #[test]
    fn both_grandparent_sides_reach_threshold_exactly() {
        let risk = run(&[
            (Relation::MaternalGrandparents, &["Asthma"]),
            (Relation::PaternalGrandparents, &["Asthma"]),
        ]);
        assert_eq!(risk.get("Asthma"), Some(&20));
    }

    #[test]
    fn every_relative_reporting_is_100() {
        let conditions: &[&str] = &["Hypertension"];
        let all: Vec<(Relation, &[&str])> =
            Relation::ALL.iter().map(|r| (*r, conditions)).collect();
        let risk = run(&all);
        assert_eq!(risk.get("Hypertension"), Some(&100));
    }

    #[test]
    fn oversized_custom_weights_are_capped() {
        let weights = RelationWeights::new(BTreeMap::from([
            (Relation::Mother, 0.9),
            (Relation::Father, 0.9),
        ]))
        .unwrap();
        let h = history(&[
            (Relation::Mother, &["Thalassemia"]),
            (Relation::Father, &["Thalassemia"]),
        ]);
        let risk = predict_with(&weights, &h, &Policy::default());
        assert_eq!(risk.get("Thalassemia"), Some(&100));
    }

    #[test]
    fn threshold_follows_policy() {
        let policy = Policy {
            significance_threshold: 0.5,
            ..Policy::default()
        };
        let h = history(&[
            (Relation::Mother, &["Diabetes", "Asthma"]),
            (Relation::Father, &["Diabetes"]),
        ]);
        let risk = predict(&h, &policy);
        assert_eq!(risk, PredictedRisk::from([("Diabetes".to_string(), 80)]));
    }

    // ── Mixed histories ────────────────────────────────────────

    #[test]
    fn conditions_accumulate_independently() {
        let risk = run(&[
            (Relation::Mother, &["Diabetes", "Asthma"]),
            (Relation::Father, &["Hypertension"]),
            (Relation::MaternalGrandparents, &["Diabetes", "Epilepsy"]),
        ]);
        assert_eq!(risk.get("Diabetes"), Some(&50));
        assert_eq!(risk.get("Asthma"), Some(&40));
        assert_eq!(risk.get("Hypertension"), Some(&40));
        assert!(!risk.contains_key("Epilepsy"));
        assert_eq!(risk.len(), 3);
    }

    #[test]
    fn empty_history_is_empty_result() {
        assert!(run(&[]).is_empty());
        assert!(run(&[(Relation::Mother, &[])]).is_empty());
    }

    #[test]
    fn accumulate_keeps_raw_scores() {
        let h = history(&[
            (Relation::Mother, &["Asthma"]),
            (Relation::MaternalGrandparents, &["Asthma", "Hemophilia"]),
        ]);
        let scores = accumulate(&h, RelationWeights::builtin());
        assert!((scores["Asthma"] - 0.5).abs() < 1e-12);
        assert!((scores["Hemophilia"] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn predict_is_idempotent() {
        let h = history(&[
            (Relation::Father, &["Sickle Cell Disease"]),
            (Relation::PaternalGrandparents, &["Sickle Cell Disease"]),
        ]);
        let policy = Policy::default();
        assert_eq!(predict(&h, &policy), predict(&h, &policy));
    }

    // ── Rounding ───────────────────────────────────────────────

    #[test]
    fn half_up_rounding_boundaries() {
        assert_eq!(to_percent(0.245, RoundingMode::HalfUp), 25);
        assert_eq!(to_percent(0.255, RoundingMode::HalfUp), 26);
        assert_eq!(to_percent(0.2449, RoundingMode::HalfUp), 24);
    }

    #[test]
    fn half_even_rounding_boundaries() {
        assert_eq!(to_percent(0.245, RoundingMode::HalfEven), 24);
        assert_eq!(to_percent(0.255, RoundingMode::HalfEven), 26);
        assert_eq!(to_percent(0.2451, RoundingMode::HalfEven), 25);
    }

    #[test]
    fn exact_sums_do_not_drift() {
        assert_eq!(to_percent(0.4 + 0.4, RoundingMode::HalfUp), 80);
        assert_eq!(to_percent(0.1 + 0.1 + 0.1, RoundingMode::HalfEven), 30);
        assert_eq!(to_percent(1.7, RoundingMode::HalfUp), 100);
        assert_eq!(to_percent(0.0, RoundingMode::HalfUp), 0);
    }

    #[test]
    fn rounding_mode_reaches_prediction() {
        let weights = RelationWeights::new(BTreeMap::from([(Relation::Mother, 0.245)])).unwrap();
        let h = history(&[(Relation::Mother, &["Asthma"])]);

        let up = predict_with(&weights, &h, &Policy::default());
        assert_eq!(up.get("Asthma"), Some(&25));

        let even_policy = Policy {
            rounding: RoundingMode::HalfEven,
            ..Policy::default()
        };
        let even = predict_with(&weights, &h, &even_policy);
        assert_eq!(even.get("Asthma"), Some(&24));
    }

    // ── Weights ────────────────────────────────────────────────

    #[test]
    fn builtin_weights() {
        let weights = RelationWeights::builtin();
        assert!((weights.weight(Relation::Mother) - 0.4).abs() < f64::EPSILON);
        assert!((weights.weight(Relation::Father) - 0.4).abs() < f64::EPSILON);
        assert!((weights.weight(Relation::MaternalGrandparents) - 0.1).abs() < f64::EPSILON);
        assert!((weights.weight(Relation::PaternalGrandparents) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_weight_rejected() {
        let err = RelationWeights::new(BTreeMap::from([(Relation::Father, -0.1)])).unwrap_err();
        assert!(matches!(err, WeightError::Invalid { relation: "Father", .. }));
    }

    #[test]
    fn nan_weight_rejected() {
        assert!(RelationWeights::new(BTreeMap::from([(Relation::Mother, f64::NAN)])).is_err());
    }

    #[test]
    fn missing_relation_contributes_nothing() {
        let weights = RelationWeights::new(BTreeMap::from([(Relation::Mother, 0.4)])).unwrap();
        assert_eq!(weights.weight(Relation::Father), 0.0);
        let h = history(&[(Relation::Father, &["Diabetes"])]);
        assert!(predict_with(&weights, &h, &Policy::default()).is_empty());
    }
}
