use serde::{Deserialize, Serialize};

use crate::analysis::constants::{SEVERITY_MILD_PCT, SEVERITY_MODERATE_PCT, SEVERITY_NONE_PCT};

/// How far intake falls below the recommended daily amount.
///
/// Totally ordered: `Severe < Moderate < Mild < None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Severe,
    Moderate,
    Mild,
    None,
}

impl Severity {
    /// Whether this severity is below the intervention threshold (70%).
    pub fn is_deficient(&self) -> bool {
        matches!(self, Severity::Severe | Severity::Moderate)
    }
}

/// Intake as a percentage of the recommendation.
///
/// Returns 0 whenever `recommended <= 0` so a misconfigured RDA can never
/// produce NaN or infinity.
pub fn percentage(consumed: f64, recommended: f64) -> f64 {
    if recommended > 0.0 {
        (consumed / recommended) * 100.0
    } else {
        0.0
    }
}

/// Classify a percentage into a severity band.
///
/// Bands (inclusive lower bounds): >=90 None, [70,90) Mild, [50,70) Moderate,
/// <50 Severe.
pub fn classify(pct: f64) -> Severity {
    if pct >= SEVERITY_NONE_PCT {
        Severity::None
    } else if pct >= SEVERITY_MILD_PCT {
        Severity::Mild
    } else if pct >= SEVERITY_MODERATE_PCT {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}
