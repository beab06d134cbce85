use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "MatHealth";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the optional policy file inside the application data directory.
pub const POLICY_FILE_NAME: &str = "policy.json";

/// Log filter used when `RUST_LOG` is not set. Quiet by default so the
/// terminal only shows results.
pub fn default_log_filter() -> &'static str {
    "mathealth=error,mathealth_lib=error"
}

/// Get the application data directory
/// ~/MatHealth/ on all platforms. `None` when no home directory is known.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Default location of the policy file (~/MatHealth/policy.json).
pub fn default_policy_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(POLICY_FILE_NAME))
}

// ═══════════════════════════════════════════════════════════
// Policy
// ═══════════════════════════════════════════════════════════

/// How accumulated risk fractions are turned into whole percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 24.5 → 25, 25.5 → 26.
    #[default]
    HalfUp,
    /// 24.5 → 24, 25.5 → 26.
    HalfEven,
}

/// Tunable decision constants shared by the three assessments.
///
/// Every field has a default matching the built-in questionnaire, so a
/// policy file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Orange matches needed before triage escalates to RED.
    pub orange_escalation_count: usize,
    /// Likelihood score at or above which the band is High.
    pub high_likelihood_score: u32,
    /// Likelihood score at or above which the band is Moderate.
    pub moderate_likelihood_score: u32,
    /// Minimum accumulated inherited-risk fraction kept in the result.
    pub significance_threshold: f64,
    /// Rounding applied when converting risk fractions to percentages.
    pub rounding: RoundingMode,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            orange_escalation_count: 2,
            high_likelihood_score: 9,
            moderate_likelihood_score: 5,
            significance_threshold: 0.2,
            rounding: RoundingMode::HalfUp,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid policy: {0}")]
    Invalid(String),
}

impl Policy {
    /// Parse and validate a policy from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let policy: Policy = serde_json::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read and validate a policy file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "Loaded policy file");
        Ok(policy)
    }

    /// Pick the policy for this run.
    ///
    /// An explicit path must load. Otherwise the default file is used when
    /// present, and the built-in defaults when it is not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_policy_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject combinations that would make the bands or filters meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.orange_escalation_count == 0 {
            return Err(ConfigError::Invalid(
                "orange_escalation_count must be at least 1".into(),
            ));
        }
        if self.moderate_likelihood_score > self.high_likelihood_score {
            return Err(ConfigError::Invalid(format!(
                "moderate_likelihood_score ({}) exceeds high_likelihood_score ({})",
                self.moderate_likelihood_score, self.high_likelihood_score
            )));
        }
        if !(0.0..=1.0).contains(&self.significance_threshold) {
            return Err(ConfigError::Invalid(format!(
                "significance_threshold must be within [0, 1], got {}",
                self.significance_threshold
            )));
        }
        Ok(())
    }
}
