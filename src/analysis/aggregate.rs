use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{ConsumptionEntry, NutrientAmounts};
use crate::state::FoodCatalog;

/// Summed nutrient amounts over a window of consumption entries.
#[derive(Debug, Clone, Default)]
pub struct NutrientTotals {
    pub amounts: NutrientAmounts,
    /// Unique calendar dates with at least one logged entry.
    pub distinct_active_days: usize,
    pub entry_count: usize,
}

impl NutrientTotals {
    /// Divisor for per-day averaging over a multi-day window.
    ///
    /// Averages are taken over the days the user actually logged, never
    /// diluted to the calendar length of the window. A user who logs on 2 of
    /// 7 requested days gets `sum / 2`.
    pub fn day_divisor(&self) -> f64 {
        self.distinct_active_days.max(1) as f64
    }
}

/// Sum nutrient contributions of the given entries.
///
/// Each entry contributes `profile[nutrient] * portion` for every tracked
/// nutrient. Entries whose food has no catalog profile are skipped rather
/// than failing the whole analysis.
pub fn aggregate(entries: &[ConsumptionEntry], catalog: &dyn FoodCatalog) -> NutrientTotals {
    let mut totals = NutrientTotals {
        entry_count: entries.len(),
        ..Default::default()
    };

    let mut active_days: BTreeSet<chrono::NaiveDate> = BTreeSet::new();

    for entry in entries {
        active_days.insert(entry.consumed_date());

        match catalog.lookup(entry.food_id) {
            Some(food) => {
                totals
                    .amounts
                    .add_scaled(&food.profile.amounts, entry.portion);
            }
            None => {
                debug!(food_id = entry.food_id, "no nutrient profile, skipping entry");
            }
        }
    }

    totals.distinct_active_days = active_days.len();
    totals
}
