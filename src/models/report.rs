use serde::{Deserialize, Serialize};

use crate::analysis::Severity;

/// Recommendation urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
}

/// One nutrient's intake versus its recommended daily amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientDetail {
    pub name: String,
    /// Per-day consumed amount over the analyzed window.
    pub consumed: f64,
    pub recommended: f64,
    pub percentage: f64,
    pub unit: String,
    pub severity: Severity,
}

/// A ranked food suggestion for a deficient nutrient.
///
/// Ephemeral: recomputed per analysis request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub nutrient: String,
    pub message: String,
    pub priority: Priority,
    pub foods: Vec<String>,
}

/// The analysis report consumed by the presentation layer.
///
/// Field names are part of the client contract; keep them stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Per-day average calories over the analyzed window.
    pub total_calories: f64,
    pub meal_count: usize,
    /// Average of all per-nutrient percentages, capped at 100.
    pub overall_score: f64,
    pub macronutrients: Vec<NutrientDetail>,
    pub micronutrients: Vec<NutrientDetail>,
    pub recommendations: Vec<Recommendation>,
}
