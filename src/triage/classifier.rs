//! Danger-sign triage.
//!
//! Tiers are scanned from most to least urgent and the first tier with a
//! match decides the verdict. Orange is the one tier that can escalate: when
//! enough orange signs are reported together the verdict is promoted to RED.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use super::flags::FlagTable;
use super::types::{FlagTier, TriageLevel, TriageVerdict};

pub const RED_MESSAGE: &str = "Go to hospital immediately";
pub const ESCALATED_MESSAGE: &str = "Multiple urgent symptoms – seek emergency care";
pub const ORANGE_MESSAGE: &str = "See a doctor within 24 hours";
pub const YELLOW_MESSAGE: &str = "Review within 7 days";
pub const GREEN_MESSAGE: &str = "No danger signs detected";

/// Classify reported symptoms against the built-in table.
pub fn classify<S>(reported: &HashSet<S>, orange_escalation_count: usize) -> TriageVerdict
where
    S: Borrow<str> + Hash + Eq,
{
    classify_with(FlagTable::builtin(), reported, orange_escalation_count)
}

/// Classify reported symptoms against an explicit table.
///
/// Strings that are not in the table are ignored. `matched_signs` follows
/// table order (category, then list position), not input order.
pub fn classify_with<S>(
    table: &FlagTable,
    reported: &HashSet<S>,
    orange_escalation_count: usize,
) -> TriageVerdict
where
    S: Borrow<str> + Hash + Eq,
{
    let red = matches_in(table, FlagTier::Red, reported);
    if !red.is_empty() {
        tracing::warn!(matched = red.len(), escalated = false, "RED danger signs reported");
        return verdict(TriageLevel::Red, red, RED_MESSAGE, false);
    }

    let orange = matches_in(table, FlagTier::Orange, reported);
    if !orange.is_empty() && orange.len() >= orange_escalation_count {
        tracing::warn!(
            matched = orange.len(),
            escalated = true,
            "Multiple orange signs escalated to RED"
        );
        return verdict(TriageLevel::Red, orange, ESCALATED_MESSAGE, true);
    }
    if !orange.is_empty() {
        tracing::debug!(matched = orange.len(), "ORANGE danger sign reported");
        return verdict(TriageLevel::Orange, orange, ORANGE_MESSAGE, false);
    }

    let yellow = matches_in(table, FlagTier::Yellow, reported);
    if !yellow.is_empty() {
        tracing::debug!(matched = yellow.len(), "YELLOW signs reported");
        return verdict(TriageLevel::Yellow, yellow, YELLOW_MESSAGE, false);
    }

    tracing::debug!(reported = reported.len(), "No danger signs matched");
    verdict(TriageLevel::Green, Vec::new(), GREEN_MESSAGE, false)
}

fn matches_in<S>(table: &FlagTable, tier: FlagTier, reported: &HashSet<S>) -> Vec<String>
where
    S: Borrow<str> + Hash + Eq,
{
    if reported.is_empty() {
        return Vec::new();
    }
    table
        .tier(tier)
        .iter()
        .flat_map(|category| category.symptoms.iter())
        .filter(|symptom| reported.contains(symptom.as_str()))
        .cloned()
        .collect()
}

fn verdict(
    level: TriageLevel,
    matched_signs: Vec<String>,
    message: &str,
    escalated: bool,
) -> TriageVerdict {
    TriageVerdict {
        level,
        action: level.action().to_string(),
        matched_signs,
        message: message.to_string(),
        escalated,
    }
}
