//! Read-only bundle of the questionnaire tables and policy.
//!
//! An `Assessor` is built once at startup and shared behind `Arc`. Nothing
//! in it is mutated after construction, so any number of threads may run
//! assessments against the same instance.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use crate::config::{ConfigError, Policy};
use crate::inheritance::{self, FamilyHistory, PredictedRisk, RelationWeights};
use crate::likelihood::{self, LikelihoodVerdict, QuestionWeights};
use crate::triage::{self, FlagTable, TriageVerdict};

#[derive(Debug, Clone)]
pub struct Assessor {
    flags: FlagTable,
    questions: QuestionWeights,
    relations: RelationWeights,
    policy: Policy,
}

impl Assessor {
    /// Assemble an assessor from already validated tables.
    pub fn new(
        flags: FlagTable,
        questions: QuestionWeights,
        relations: RelationWeights,
        policy: Policy,
    ) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self {
            flags,
            questions,
            relations,
            policy,
        })
    }

    /// Built-in tables with the default policy.
    pub fn standard() -> Self {
        Self {
            flags: FlagTable::builtin().clone(),
            questions: QuestionWeights::builtin().clone(),
            relations: RelationWeights::builtin().clone(),
            policy: Policy::default(),
        }
    }

    /// Built-in tables with a caller-supplied policy.
    pub fn with_policy(policy: Policy) -> Result<Self, ConfigError> {
        Self::new(
            FlagTable::builtin().clone(),
            QuestionWeights::builtin().clone(),
            RelationWeights::builtin().clone(),
            policy,
        )
    }

    pub fn flags(&self) -> &FlagTable {
        &self.flags
    }

    pub fn questions(&self) -> &QuestionWeights {
        &self.questions
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn classify<S>(&self, reported: &HashSet<S>) -> TriageVerdict
    where
        S: Borrow<str> + Hash + Eq,
    {
        triage::classify_with(&self.flags, reported, self.policy.orange_escalation_count)
    }

    pub fn score<I, Q>(&self, answers: I) -> LikelihoodVerdict
    where
        I: IntoIterator<Item = (Q, bool)>,
        Q: AsRef<str>,
    {
        likelihood::score_with(&self.questions, answers, &self.policy)
    }

    pub fn predict(&self, history: &FamilyHistory) -> PredictedRisk {
        inheritance::predict_with(&self.relations, history, &self.policy)
    }
}
