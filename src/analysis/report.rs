use crate::analysis::aggregate::aggregate;
use crate::analysis::rda::personalized_rda;
use crate::analysis::recommend::build_recommendations;
use crate::analysis::severity::{classify, percentage};
use crate::models::{
    AnalysisReport, BodyProfile, ConsumptionEntry, Nutrient, NutrientAmounts, NutrientDetail,
};
use crate::state::FoodCatalog;

/// How a window's totals are averaged into per-day numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisWindow {
    /// Single-day window; divisor is always 1.
    Today,
    /// Multi-day window; totals are averaged over distinct active days.
    MultiDay,
}

/// Build the full analysis report for a slice of consumption entries.
///
/// Aggregates totals, personalizes the RDA from the body profile (base table
/// when absent), classifies each nutrient, and attaches recommendations.
pub fn build_report(
    entries: &[ConsumptionEntry],
    catalog: &dyn FoodCatalog,
    profile: Option<&BodyProfile>,
    window: AnalysisWindow,
) -> AnalysisReport {
    let totals = aggregate(entries, catalog);
    let divisor = match window {
        AnalysisWindow::Today => 1.0,
        AnalysisWindow::MultiDay => totals.day_divisor(),
    };
    let per_day = totals.amounts.scaled(1.0 / divisor);
    let rda = personalized_rda(profile);

    let macronutrients = details_for(&Nutrient::MACROS, &per_day, &rda);
    let micronutrients = details_for(&Nutrient::MICROS, &per_day, &rda);

    let all_pcts = macronutrients
        .iter()
        .chain(micronutrients.iter())
        .map(|d| d.percentage);
    let count = macronutrients.len() + micronutrients.len();
    let overall_score = if count > 0 {
        (all_pcts.sum::<f64>() / count as f64).min(100.0)
    } else {
        0.0
    };

    let recommendations = build_recommendations(&per_day, &rda, catalog, profile);

    AnalysisReport {
        total_calories: per_day.get(Nutrient::Calories),
        meal_count: totals.entry_count,
        overall_score,
        macronutrients,
        micronutrients,
        recommendations,
    }
}

fn details_for(
    nutrients: &[Nutrient],
    per_day: &NutrientAmounts,
    rda: &NutrientAmounts,
) -> Vec<NutrientDetail> {
    nutrients
        .iter()
        .map(|&nutrient| {
            let consumed = per_day.get(nutrient);
            let recommended = rda.get(nutrient);
            let pct = percentage(consumed, recommended);
            NutrientDetail {
                name: nutrient.display_name().to_string(),
                consumed,
                recommended,
                percentage: pct,
                unit: nutrient.unit().to_string(),
                severity: classify(pct),
            }
        })
        .collect()
}
