//! Pregnancy danger-sign triage: the flag table and the classifier.

pub mod classifier;
pub mod flags;
pub mod types;

pub use classifier::{classify, classify_with};
pub use flags::FlagTable;
pub use types::{FlagCategory, FlagTier, TableError, TriageLevel, TriageVerdict};
