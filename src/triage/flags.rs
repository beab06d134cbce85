//! Pregnancy danger-sign flag table.
//!
//! Three tiers of exact symptom descriptions, grouped by category. The
//! display layer offers these strings verbatim as selectable options, so the
//! classifier only ever needs exact membership tests.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::types::{FlagCategory, FlagTier, TableError};

// ── Built-in symptom sets ───────────────────────────────────

static RED_FLAGS: &[(&str, &[&str])] = &[
    (
        "Severe bleeding or fluid loss",
        &[
            "Bright-red bleeding soaking ≥ 1 pad/hour",
            "Passage of clots or tissue",
            "Sudden gush of clear/blood-stained fluid + abdominal pain",
        ],
    ),
    (
        "Hypertensive / neurological",
        &[
            "Severe headache with blurred vision or flashing lights",
            "Sudden swelling of face and hands with headache",
            "Fits or convulsions",
        ],
    ),
    (
        "Severe abdominal pain",
        &[
            "Severe constant abdominal pain",
            "Sharp one-sided lower abdominal pain with fainting",
        ],
    ),
    (
        "Breathing / circulation",
        &[
            "Difficulty breathing at rest",
            "Chest pain or coughing up blood",
            "Fainting or loss of consciousness",
        ],
    ),
    (
        "Absent fetal movement",
        &["No fetal movements felt for 12 hours or more (after 28 weeks)"],
    ),
];

static ORANGE_FLAGS: &[(&str, &[&str])] = &[
    (
        "Moderate bleeding / leakage",
        &[
            "Spotting or light bleeding persisting >2h",
            "Continuous watery leakage (PROM) without pain or fever",
        ],
    ),
    (
        "Infection signs",
        &[
            "Fever of 38°C or higher",
            "Burning or pain when passing urine",
            "Foul-smelling vaginal discharge",
        ],
    ),
    (
        "Persistent vomiting",
        &[
            "Unable to keep fluids down for 24 hours",
            "Vomiting with dizziness or dark urine",
        ],
    ),
    (
        "Reduced fetal movement",
        &["Fewer fetal movements than usual today"],
    ),
    (
        "Contractions / pelvic pressure",
        &[
            "Regular painful tightenings before 37 weeks",
            "Persistent lower back pain with pelvic pressure",
        ],
    ),
    (
        "Itching",
        &["Intense itching of palms and soles without rash"],
    ),
];

static YELLOW_FLAGS: &[(&str, &[&str])] = &[
    (
        "Mild oedema / varicosities",
        &[
            "Ankle swelling at day's end, improves overnight",
            "Visible varicose veins in legs",
        ],
    ),
    (
        "Digestive discomfort",
        &[
            "Heartburn after meals",
            "Constipation",
            "Mild nausea in the morning",
        ],
    ),
    (
        "Musculoskeletal",
        &[
            "Mild lower back ache relieved by rest",
            "Leg cramps at night",
        ],
    ),
    (
        "General",
        &[
            "Tiredness relieved by rest",
            "Mild headache relieved by rest and fluids",
            "Trouble sleeping",
        ],
    ),
];

static BUILTIN: LazyLock<FlagTable> = LazyLock::new(|| {
    FlagTable::new(
        to_categories(RED_FLAGS),
        to_categories(ORANGE_FLAGS),
        to_categories(YELLOW_FLAGS),
    )
    .expect("Invalid built-in flag table")
});

fn to_categories(raw: &[(&str, &[&str])]) -> Vec<FlagCategory> {
    raw.iter()
        .map(|(name, symptoms)| FlagCategory::new(*name, symptoms))
        .collect()
}

// ── Table ───────────────────────────────────────────────────

/// Validated three-tier symptom table. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagTable {
    red: Vec<FlagCategory>,
    orange: Vec<FlagCategory>,
    yellow: Vec<FlagCategory>,
}

impl FlagTable {
    /// Build a table, rejecting empty symptom text and any symptom that
    /// appears more than once, within a tier or across tiers.
    pub fn new(
        red: Vec<FlagCategory>,
        orange: Vec<FlagCategory>,
        yellow: Vec<FlagCategory>,
    ) -> Result<Self, TableError> {
        let table = Self { red, orange, yellow };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), TableError> {
        let mut seen: HashMap<&str, FlagTier> = HashMap::new();
        for tier in FlagTier::ALL {
            for category in self.tier(tier) {
                for symptom in &category.symptoms {
                    if symptom.trim().is_empty() {
                        return Err(TableError::EmptySymptom {
                            category: category.name.clone(),
                            tier: tier.as_str(),
                        });
                    }
                    if let Some(first) = seen.insert(symptom.as_str(), tier) {
                        return Err(if first == tier {
                            TableError::DuplicateWithinTier {
                                symptom: symptom.clone(),
                                tier: tier.as_str(),
                            }
                        } else {
                            TableError::DuplicateAcrossTiers {
                                symptom: symptom.clone(),
                                first: first.as_str(),
                                second: tier.as_str(),
                            }
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The built-in maternal danger-sign table, built on first use.
    pub fn builtin() -> &'static FlagTable {
        &BUILTIN
    }

    /// Categories of one tier, in table order.
    pub fn tier(&self, tier: FlagTier) -> &[FlagCategory] {
        match tier {
            FlagTier::Red => &self.red,
            FlagTier::Orange => &self.orange,
            FlagTier::Yellow => &self.yellow,
        }
    }

    /// Every selectable symptom: tier order, then category order, then list order.
    pub fn all_symptoms(&self) -> Vec<&str> {
        FlagTier::ALL
            .iter()
            .flat_map(|tier| self.tier(*tier))
            .flat_map(|category| category.symptoms.iter().map(String::as_str))
            .collect()
    }

    /// Tier a symptom belongs to, if any.
    pub fn tier_of(&self, symptom: &str) -> Option<FlagTier> {
        FlagTier::ALL.into_iter().find(|tier| {
            self.tier(*tier)
                .iter()
                .any(|category| category.symptoms.iter().any(|s| s == symptom))
        })
    }
}
