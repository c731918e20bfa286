use std::sync::LazyLock;

use crate::models::{Nutrient, NutrientAmounts};

// ─────────────────────────────────────────────────────────────────────────────
// Severity thresholds (percentage of RDA, inclusive lower bounds)
// ─────────────────────────────────────────────────────────────────────────────

/// At or above this percentage intake is adequate.
pub const SEVERITY_NONE_PCT: f64 = 90.0;

/// [70, 90) is a mild deficiency.
pub const SEVERITY_MILD_PCT: f64 = 70.0;

/// [50, 70) is moderate; below 50 is severe.
pub const SEVERITY_MODERATE_PCT: f64 = 50.0;

// ─────────────────────────────────────────────────────────────────────────────
// Recommendation thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Below this percentage a HIGH-priority recommendation is emitted.
pub const REC_HIGH_PCT: f64 = 50.0;

/// Below this percentage (and at/above [`REC_HIGH_PCT`]) a MEDIUM-priority
/// recommendation is emitted; at or above it, nothing.
pub const REC_MEDIUM_PCT: f64 = 80.0;

// ─────────────────────────────────────────────────────────────────────────────
// Intervention escalation (consecutive deficient days)
// ─────────────────────────────────────────────────────────────────────────────

/// Days 1-2: record exists but no intervention is surfaced.
pub const ESCALATE_NORMAL_DAYS: u32 = 3;

/// Days 5-6: elevated.
pub const ESCALATE_ELEVATED_DAYS: u32 = 5;

/// Day 7 and beyond: critical, triggers a notification.
pub const ESCALATE_CRITICAL_DAYS: u32 = 7;

// ─────────────────────────────────────────────────────────────────────────────
// BMI brackets for RDA personalization
// ─────────────────────────────────────────────────────────────────────────────

pub const BMI_UNDERWEIGHT_MAX: f64 = 18.5;
pub const BMI_NORMAL_MAX: f64 = 25.0;
pub const BMI_OVERWEIGHT_MAX: f64 = 30.0;

/// RDA multipliers for the underweight bracket (BMI < 18.5).
pub const UNDERWEIGHT_ADJUSTMENTS: &[(Nutrient, f64)] = &[
    (Nutrient::Protein, 1.3),
    (Nutrient::Carbohydrates, 1.2),
    (Nutrient::Fat, 1.1),
    (Nutrient::Calcium, 1.15),
    (Nutrient::Iron, 1.1),
];

/// RDA multipliers for the overweight bracket (25 <= BMI < 30).
pub const OVERWEIGHT_ADJUSTMENTS: &[(Nutrient, f64)] = &[
    (Nutrient::Carbohydrates, 0.85),
    (Nutrient::Fat, 0.85),
    (Nutrient::Protein, 1.1),
    (Nutrient::Fiber, 1.15),
];

/// RDA multipliers for the obese bracket (BMI >= 30).
pub const OBESE_ADJUSTMENTS: &[(Nutrient, f64)] = &[
    (Nutrient::Carbohydrates, 0.75),
    (Nutrient::Fat, 0.75),
    (Nutrient::Protein, 1.2),
    (Nutrient::Fiber, 1.25),
    (Nutrient::VitaminD, 1.3),
];

// ─────────────────────────────────────────────────────────────────────────────
// RDA tables
// ─────────────────────────────────────────────────────────────────────────────

/// Base recommended daily amounts (adult-average baseline).
pub static BASE_RDA: LazyLock<NutrientAmounts> = LazyLock::new(|| {
    [
        (Nutrient::Calories, 2000.0),
        (Nutrient::Protein, 50.0),
        (Nutrient::Carbohydrates, 275.0),
        (Nutrient::Fat, 78.0),
        (Nutrient::Fiber, 28.0),
        (Nutrient::VitaminA, 900.0),
        (Nutrient::VitaminC, 90.0),
        (Nutrient::VitaminD, 20.0),
        (Nutrient::VitaminE, 15.0),
        (Nutrient::VitaminK, 120.0),
        (Nutrient::VitaminB12, 2.4),
        (Nutrient::Calcium, 1000.0),
        (Nutrient::Iron, 18.0),
        (Nutrient::Magnesium, 400.0),
        (Nutrient::Zinc, 11.0),
        (Nutrient::Potassium, 2600.0),
    ]
    .into_iter()
    .collect()
});

/// Nutrients shown on the chart radar, in display order.
pub const RADAR_NUTRIENTS: [Nutrient; 12] = [
    Nutrient::Protein,
    Nutrient::Carbohydrates,
    Nutrient::Fat,
    Nutrient::Fiber,
    Nutrient::VitaminA,
    Nutrient::VitaminC,
    Nutrient::VitaminD,
    Nutrient::Calcium,
    Nutrient::Iron,
    Nutrient::Potassium,
    Nutrient::Zinc,
    Nutrient::Magnesium,
];

/// Fixed display-only RDA table for the chart radar.
///
/// Intentionally diverges from [`BASE_RDA`] (carbs 300 vs 275, fat 65 vs 78,
/// fiber 25 vs 28, magnesium 420 vs 400) and is never BMI-personalized.
/// Clients depend on the radar numbers staying as they are.
pub static CHART_RDA: LazyLock<NutrientAmounts> = LazyLock::new(|| {
    [
        (Nutrient::Protein, 50.0),
        (Nutrient::Carbohydrates, 300.0),
        (Nutrient::Fat, 65.0),
        (Nutrient::Fiber, 25.0),
        (Nutrient::VitaminA, 900.0),
        (Nutrient::VitaminC, 90.0),
        (Nutrient::VitaminD, 20.0),
        (Nutrient::Calcium, 1000.0),
        (Nutrient::Iron, 18.0),
        (Nutrient::Potassium, 2600.0),
        (Nutrient::Zinc, 11.0),
        (Nutrient::Magnesium, 420.0),
    ]
    .into_iter()
    .collect()
});

/// Radar percentages are capped here for display.
pub const RADAR_CAP_PCT: f64 = 150.0;

// ─────────────────────────────────────────────────────────────────────────────
// Recommendation candidate foods
// ─────────────────────────────────────────────────────────────────────────────

/// Candidate foods suggested per deficient nutrient. Nutrients without an
/// entry here never produce a recommendation.
pub const RECOMMENDATION_FOODS: &[(Nutrient, &[&str])] = &[
    (
        Nutrient::Protein,
        &["Chicken Breast", "Eggs", "Salmon", "Almonds"],
    ),
    (
        Nutrient::Fiber,
        &["Broccoli", "Brown Rice", "Apple", "Spinach"],
    ),
    (Nutrient::VitaminC, &["Broccoli", "Spinach", "Banana"]),
    (Nutrient::VitaminD, &["Salmon", "Egg", "Milk"]),
    (Nutrient::Calcium, &["Milk", "Broccoli", "Almonds"]),
    (
        Nutrient::Iron,
        &["Spinach", "Chicken Breast", "Brown Rice"],
    ),
    (Nutrient::Potassium, &["Banana", "Spinach", "Milk"]),
    (Nutrient::VitaminB12, &["Salmon", "Egg", "Milk"]),
];
