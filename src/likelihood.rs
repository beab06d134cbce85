//! Early pregnancy likelihood questionnaire.
//!
//! Each question carries a fixed point weight. The score is the sum of the
//! weights of the questions answered "yes", and the band is read off the
//! policy thresholds.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Policy;

// ═══════════════════════════════════════════
// Questions and weights
// ═══════════════════════════════════════════

pub const QUESTIONS: &[(&str, u32)] = &[
    ("Have you missed your period?", 3),
    ("Do you feel nauseous or vomit especially in the morning?", 2),
    ("Are your breasts sore or swollen?", 2),
    ("Do you feel unusually tired?", 1),
    ("Are you urinating more frequently?", 2),
    ("Do you have unusual food cravings or aversions?", 1),
    ("Are you experiencing mood swings?", 1),
    ("Have you noticed light spotting or mild cramping?", 2),
];

static BUILTIN: LazyLock<QuestionWeights> = LazyLock::new(|| {
    QuestionWeights::new(QUESTIONS.iter().map(|(q, w)| ((*q).to_string(), *w)).collect())
        .expect("Invalid built-in question table")
});

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LikelihoodBand {
    Low,
    Moderate,
    High,
}

impl LikelihoodBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::High => "Take a pregnancy test and consult your doctor.",
            Self::Moderate => "Monitor symptoms and consider taking a test.",
            Self::Low => "Unlikely pregnancy. Recheck in a few days if needed.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikelihoodVerdict {
    pub score: u32,
    pub band: LikelihoodBand,
    /// Questions answered "yes", in the order they were supplied.
    pub positive_questions: Vec<String>,
    pub recommendation: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuestionError {
    #[error("Question {0:?} is listed twice")]
    Duplicate(String),

    #[error("Empty question text")]
    Empty,
}

/// Ordered question → weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionWeights {
    entries: Vec<(String, u32)>,
}

impl QuestionWeights {
    pub fn new(entries: Vec<(String, u32)>) -> Result<Self, QuestionError> {
        let mut seen = HashSet::new();
        for (question, _) in &entries {
            if question.trim().is_empty() {
                return Err(QuestionError::Empty);
            }
            if !seen.insert(question.as_str()) {
                return Err(QuestionError::Duplicate(question.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The eight built-in early pregnancy questions.
    pub fn builtin() -> &'static QuestionWeights {
        &BUILTIN
    }

    /// Question texts in display order.
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(q, _)| q.as_str())
    }

    pub fn weight(&self, question: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(q, _)| q == question)
            .map(|(_, w)| *w)
    }

    /// Score when every question is answered "yes".
    pub fn max_score(&self) -> u32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ═══════════════════════════════════════════
// Scoring
// ═══════════════════════════════════════════

/// Band for a score under the policy thresholds.
pub fn band_for(score: u32, policy: &Policy) -> LikelihoodBand {
    if score >= policy.high_likelihood_score {
        LikelihoodBand::High
    } else if score >= policy.moderate_likelihood_score {
        LikelihoodBand::Moderate
    } else {
        LikelihoodBand::Low
    }
}

/// Score answers against the built-in questions.
pub fn score<I, Q>(answers: I, policy: &Policy) -> LikelihoodVerdict
where
    I: IntoIterator<Item = (Q, bool)>,
    Q: AsRef<str>,
{
    score_with(QuestionWeights::builtin(), answers, policy)
}

/// Score answers against an explicit question table.
///
/// Questions missing from the answers count as "no". Questions the table
/// does not know contribute nothing and are not listed. A question answered
/// "yes" more than once is counted once.
pub fn score_with<I, Q>(weights: &QuestionWeights, answers: I, policy: &Policy) -> LikelihoodVerdict
where
    I: IntoIterator<Item = (Q, bool)>,
    Q: AsRef<str>,
{
    let mut total = 0u32;
    let mut counted: HashSet<String> = HashSet::new();
    let mut positive_questions = Vec::new();

    for (question, answer) in answers {
        if !answer {
            continue;
        }
        let question = question.as_ref();
        let Some(weight) = weights.weight(question) else {
            tracing::debug!("Ignoring answer to unknown question");
            continue;
        };
        if !counted.insert(question.to_string()) {
            continue;
        }
        total = total.saturating_add(weight);
        positive_questions.push(question.to_string());
    }

    let band = band_for(total, policy);
    tracing::debug!(score = total, band = band.as_str(), "Likelihood scored");

    LikelihoodVerdict {
        score: total,
        band,
        positive_questions,
        recommendation: band.recommendation().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSED: &str = "Have you missed your period?";
    const NAUSEA: &str = "Do you feel nauseous or vomit especially in the morning?";
    const BREASTS: &str = "Are your breasts sore or swollen?";
    const TIRED: &str = "Do you feel unusually tired?";
    const URINATING: &str = "Are you urinating more frequently?";
    const SPOTTING: &str = "Have you noticed light spotting or mild cramping?";

    fn yes(questions: &[&'static str]) -> Vec<(&'static str, bool)> {
        questions.iter().map(|q| (*q, true)).collect()
    }

    fn run(answers: Vec<(&'static str, bool)>) -> LikelihoodVerdict {
        score(answers, &Policy::default())
    }

    #[test]
    fn builtin_table_has_eight_questions() {
        let weights = QuestionWeights::builtin();
        assert_eq!(weights.len(), 8);
        assert_eq!(weights.max_score(), 14);
        assert_eq!(weights.questions().next(), Some(MISSED));
    }

    #[test]
    fn empty_answers_score_zero_low() {
        let v = run(vec![]);
        assert_eq!(v.score, 0);
        assert_eq!(v.band, LikelihoodBand::Low);
        assert!(v.positive_questions.is_empty());
        assert_eq!(v.recommendation, LikelihoodBand::Low.recommendation());
    }

    #[test]
    fn all_false_scores_zero() {
        let answers = QUESTIONS.iter().map(|(q, _)| (*q, false)).collect();
        let v = run(answers);
        assert_eq!(v.score, 0);
        assert_eq!(v.band, LikelihoodBand::Low);
    }

    #[test]
    fn missed_nausea_fatigue_is_moderate() {
        let v = run(yes(&[MISSED, NAUSEA, TIRED]));
        assert_eq!(v.score, 6);
        assert_eq!(v.band, LikelihoodBand::Moderate);
        assert_eq!(v.recommendation, "Monitor symptoms and consider taking a test.");
    }

    #[test]
    fn band_boundaries() {
        let policy = Policy::default();
        assert_eq!(band_for(4, &policy), LikelihoodBand::Low);
        assert_eq!(band_for(5, &policy), LikelihoodBand::Moderate);
        assert_eq!(band_for(8, &policy), LikelihoodBand::Moderate);
        assert_eq!(band_for(9, &policy), LikelihoodBand::High);
    }

    #[test]
    fn nine_points_is_high() {
        // 3 + 2 + 2 + 2 = 9
        let v = run(yes(&[MISSED, NAUSEA, BREASTS, URINATING]));
        assert_eq!(v.score, 9);
        assert_eq!(v.band, LikelihoodBand::High);
        assert_eq!(v.recommendation, "Take a pregnancy test and consult your doctor.");
    }

    #[test]
    fn positive_questions_keep_input_order() {
        let v = run(vec![(SPOTTING, true), (MISSED, false), (TIRED, true)]);
        assert_eq!(v.positive_questions, vec![SPOTTING.to_string(), TIRED.to_string()]);
        assert_eq!(v.score, 3);
    }

    #[test]
    fn unknown_question_ignored() {
        let v = run(vec![("Do you like tea?", true), (MISSED, true)]);
        assert_eq!(v.score, 3);
        assert_eq!(v.positive_questions, vec![MISSED.to_string()]);
    }

    #[test]
    fn repeated_question_counted_once() {
        let v = run(vec![(MISSED, true), (MISSED, true)]);
        assert_eq!(v.score, 3);
        assert_eq!(v.positive_questions.len(), 1);
    }

    #[test]
    fn score_is_monotone_in_yes_answers() {
        let mut answers = Vec::new();
        let mut previous = run(answers.clone()).score;
        for (question, _) in QUESTIONS {
            answers.push((*question, true));
            let current = run(answers.clone()).score;
            assert!(current >= previous);
            previous = current;
        }
        assert_eq!(previous, QuestionWeights::builtin().max_score());
    }

    #[test]
    fn accepts_owned_map_answers() {
        let answers: std::collections::BTreeMap<String, bool> =
            [(MISSED.to_string(), true), (TIRED.to_string(), true)].into_iter().collect();
        let v = score(answers, &Policy::default());
        assert_eq!(v.score, 4);
    }

    #[test]
    fn thresholds_follow_policy() {
        let policy = Policy {
            high_likelihood_score: 4,
            moderate_likelihood_score: 2,
            ..Policy::default()
        };
        let v = score(yes(&[MISSED, TIRED]), &policy);
        assert_eq!(v.band, LikelihoodBand::High);
    }

    #[test]
    fn score_is_idempotent() {
        let answers = yes(&[MISSED, SPOTTING]);
        assert_eq!(run(answers.clone()), run(answers));
    }

    #[test]
    fn duplicate_question_table_rejected() {
        let err = QuestionWeights::new(vec![("Q".into(), 1), ("Q".into(), 2)]).unwrap_err();
        assert_eq!(err, QuestionError::Duplicate("Q".into()));
    }

    #[test]
    fn empty_question_table_entry_rejected() {
        let err = QuestionWeights::new(vec![(" ".into(), 1)]).unwrap_err();
        assert_eq!(err, QuestionError::Empty);
    }

    #[test]
    fn custom_table_scoring() {
        let weights = QuestionWeights::new(vec![("A".into(), 5), ("B".into(), 4)]).unwrap();
        let v = score_with(&weights, vec![("A", true), ("B", true)], &Policy::default());
        assert_eq!(v.score, 9);
        assert_eq!(v.band, LikelihoodBand::High);
    }
}
