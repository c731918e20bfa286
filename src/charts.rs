use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analysis::constants::{CHART_RDA, RADAR_CAP_PCT, RADAR_NUTRIENTS};
use crate::models::{ConsumptionEntry, Nutrient, NutrientAmounts};
use crate::state::FoodCatalog;

/// One day in the daily trend, zero-filled when nothing was logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTrendPoint {
    pub date: NaiveDate,
    /// Short weekday label, e.g. "Mon".
    pub label: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub entry_count: usize,
}

/// Gram totals and percentage shares of the three energy macros.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// Calories and entry count for one meal slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTypeSlice {
    pub meal_type: String,
    pub calories: f64,
    pub entry_count: usize,
}

/// A frequently logged food.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopFood {
    pub name: String,
    pub calories: f64,
    pub entry_count: usize,
}

/// Per-day-average percentage of the fixed display RDA, capped for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarPoint {
    pub nutrient: String,
    pub percentage: f64,
}

/// All five chart views over one consumption window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub daily_trend: Vec<DayTrendPoint>,
    pub macro_split: MacroSplit,
    pub meal_type_breakdown: Vec<MealTypeSlice>,
    pub top_foods: Vec<TopFood>,
    pub nutrient_radar: Vec<RadarPoint>,
}

/// Build all chart views for entries within the `days`-long window ending on
/// `end_date` (inclusive).
///
/// Charts bypass RDA personalization entirely; the radar uses the fixed
/// [`CHART_RDA`] table and averages over the requested window length rather
/// than distinct active days.
pub fn build_chart_data(
    entries: &[ConsumptionEntry],
    catalog: &dyn FoodCatalog,
    end_date: NaiveDate,
    days: u32,
) -> ChartData {
    ChartData {
        daily_trend: build_daily_trend(entries, catalog, end_date, days),
        macro_split: build_macro_split(entries, catalog),
        meal_type_breakdown: build_meal_breakdown(entries, catalog),
        top_foods: build_top_foods(entries, catalog),
        nutrient_radar: build_radar(entries, catalog, days),
    }
}

fn entry_amounts(entry: &ConsumptionEntry, catalog: &dyn FoodCatalog) -> Option<NutrientAmounts> {
    catalog
        .lookup(entry.food_id)
        .map(|food| food.profile.amounts.scaled(entry.portion))
}

fn build_daily_trend(
    entries: &[ConsumptionEntry],
    catalog: &dyn FoodCatalog,
    end_date: NaiveDate,
    days: u32,
) -> Vec<DayTrendPoint> {
    let mut by_date: HashMap<NaiveDate, Vec<&ConsumptionEntry>> = HashMap::new();
    for entry in entries {
        by_date.entry(entry.consumed_date()).or_default().push(entry);
    }

    let mut trend = Vec::with_capacity(days as usize);
    // Oldest day first; every requested day appears even with no entries.
    for offset in (0..days.max(1)).rev() {
        let Some(date) = end_date.checked_sub_days(Days::new(offset as u64)) else {
            continue;
        };
        let day_entries = by_date.get(&date).map(Vec::as_slice).unwrap_or(&[]);

        let mut totals = NutrientAmounts::new();
        for entry in day_entries {
            if let Some(amounts) = entry_amounts(entry, catalog) {
                totals.add_scaled(&amounts, 1.0);
            }
        }

        trend.push(DayTrendPoint {
            date,
            label: date.format("%a").to_string(),
            calories: round1(totals.get(Nutrient::Calories)),
            protein: round1(totals.get(Nutrient::Protein)),
            carbs: round1(totals.get(Nutrient::Carbohydrates)),
            fat: round1(totals.get(Nutrient::Fat)),
            entry_count: day_entries.len(),
        });
    }
    trend
}

fn build_macro_split(entries: &[ConsumptionEntry], catalog: &dyn FoodCatalog) -> MacroSplit {
    let mut totals = NutrientAmounts::new();
    for entry in entries {
        if let Some(amounts) = entry_amounts(entry, catalog) {
            totals.add_scaled(&amounts, 1.0);
        }
    }

    let protein = totals.get(Nutrient::Protein);
    let carbs = totals.get(Nutrient::Carbohydrates);
    let fat = totals.get(Nutrient::Fat);
    // Denominator floors at 1 so an empty window yields 0%, not NaN.
    let total = (protein + carbs + fat).max(1.0);

    MacroSplit {
        protein_g: round1(protein),
        carbs_g: round1(carbs),
        fat_g: round1(fat),
        protein_pct: round1(protein / total * 100.0),
        carbs_pct: round1(carbs / total * 100.0),
        fat_pct: round1(fat / total * 100.0),
    }
}

fn build_meal_breakdown(
    entries: &[ConsumptionEntry],
    catalog: &dyn FoodCatalog,
) -> Vec<MealTypeSlice> {
    // Buckets keep first-seen order; entries without a slot go to "OTHER".
    let mut slices: Vec<MealTypeSlice> = Vec::new();

    for entry in entries {
        let name = entry
            .meal_slot
            .map(|slot| slot.display_name().to_uppercase())
            .unwrap_or_else(|| "OTHER".to_string());
        let calories = entry_amounts(entry, catalog)
            .map(|a| a.get(Nutrient::Calories))
            .unwrap_or(0.0);

        match slices.iter_mut().find(|s| s.meal_type == name) {
            Some(slice) => {
                slice.calories += calories;
                slice.entry_count += 1;
            }
            None => slices.push(MealTypeSlice {
                meal_type: name,
                calories,
                entry_count: 1,
            }),
        }
    }

    for slice in &mut slices {
        slice.calories = round1(slice.calories);
    }
    slices
}

fn build_top_foods(entries: &[ConsumptionEntry], catalog: &dyn FoodCatalog) -> Vec<TopFood> {
    let mut foods: Vec<TopFood> = Vec::new();

    for entry in entries {
        let name = catalog
            .lookup(entry.food_id)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let calories = entry_amounts(entry, catalog)
            .map(|a| a.get(Nutrient::Calories))
            .unwrap_or(0.0);

        match foods.iter_mut().find(|f| f.name == name) {
            Some(food) => {
                food.calories += calories;
                food.entry_count += 1;
            }
            None => foods.push(TopFood {
                name,
                calories,
                entry_count: 1,
            }),
        }
    }

    // Ranked by how often the food was logged, not by calories; ties keep
    // first-logged order (stable sort).
    foods.sort_by(|a, b| b.entry_count.cmp(&a.entry_count));
    foods.truncate(10);
    for food in &mut foods {
        food.calories = round1(food.calories);
    }
    foods
}

fn build_radar(
    entries: &[ConsumptionEntry],
    catalog: &dyn FoodCatalog,
    days: u32,
) -> Vec<RadarPoint> {
    let mut totals = NutrientAmounts::new();
    for entry in entries {
        if let Some(amounts) = entry_amounts(entry, catalog) {
            totals.add_scaled(&amounts, 1.0);
        }
    }

    // Display averaging uses the requested window length, unlike the analysis
    // report which averages over distinct active days.
    let divisor = days.max(1) as f64;

    RADAR_NUTRIENTS
        .iter()
        .map(|&nutrient| {
            let rda = CHART_RDA.get(nutrient);
            let pct = if rda > 0.0 {
                round1(totals.get(nutrient) / divisor / rda * 100.0)
            } else {
                0.0
            };
            RadarPoint {
                nutrient: nutrient.display_name().to_string(),
                percentage: pct.min(RADAR_CAP_PCT),
            }
        })
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, FoodItem, FoodNutrientProfile, MealSlot};
    use crate::state::TrackerState;

    fn food(id: u64, name: &str, calories: f64, protein: f64) -> FoodItem {
        let mut amounts = NutrientAmounts::new();
        amounts.set(Nutrient::Calories, calories);
        amounts.set(Nutrient::Protein, protein);
        FoodItem {
            id,
            name: name.to_string(),
            category: FoodCategory::Other,
            tags: Vec::new(),
            profile: FoodNutrientProfile {
                serving_size: 100.0,
                amounts,
            },
        }
    }

    fn entry(food_id: u64, day: u32, slot: Option<MealSlot>) -> ConsumptionEntry {
        ConsumptionEntry {
            user_id: 1,
            food_id,
            portion: 1.0,
            consumed_at: NaiveDate::from_ymd_opt(2026, 5, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            meal_slot: slot,
        }
    }

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 7).unwrap()
    }

    #[test]
    fn test_daily_trend_zero_fills_missing_days() {
        let mut state = TrackerState::new();
        state.add_food(food(1, "Oats", 150.0, 5.0));

        let entries = vec![entry(1, 3, Some(MealSlot::Breakfast))];
        let trend = build_daily_trend(&entries, &state, end_date(), 7);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        assert_eq!(trend[6].date, end_date());

        // Day 3 has the entry, everything else is zero.
        assert_eq!(trend[2].calories, 150.0);
        assert_eq!(trend[2].entry_count, 1);
        assert_eq!(trend[0].calories, 0.0);
        assert_eq!(trend[0].entry_count, 0);
    }

    #[test]
    fn test_macro_split_zero_denominator() {
        let state = TrackerState::new();
        let split = build_macro_split(&[], &state);
        assert_eq!(split.protein_pct, 0.0);
        assert_eq!(split.carbs_pct, 0.0);
        assert_eq!(split.fat_pct, 0.0);
    }

    #[test]
    fn test_meal_breakdown_buckets_missing_slot() {
        let mut state = TrackerState::new();
        state.add_food(food(1, "Oats", 150.0, 5.0));

        let entries = vec![
            entry(1, 1, Some(MealSlot::Breakfast)),
            entry(1, 1, None),
            entry(1, 2, Some(MealSlot::Breakfast)),
        ];
        let breakdown = build_meal_breakdown(&entries, &state);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].meal_type, "BREAKFAST");
        assert_eq!(breakdown[0].entry_count, 2);
        assert_eq!(breakdown[1].meal_type, "OTHER");
        assert_eq!(breakdown[1].entry_count, 1);
    }

    #[test]
    fn test_top_foods_ranked_by_count_with_stable_ties() {
        let mut state = TrackerState::new();
        state.add_food(food(1, "Oats", 150.0, 5.0));
        state.add_food(food(2, "Rice", 900.0, 8.0));
        state.add_food(food(3, "Egg", 70.0, 6.0));

        // Oats logged twice; Rice and Egg tie at one each, Rice logged first.
        let entries = vec![
            entry(2, 1, None),
            entry(1, 1, None),
            entry(3, 2, None),
            entry(1, 2, None),
        ];
        let top = build_top_foods(&entries, &state);

        assert_eq!(top[0].name, "Oats");
        assert_eq!(top[0].entry_count, 2);
        // Tie broken by first-logged order, not calories.
        assert_eq!(top[1].name, "Rice");
        assert_eq!(top[2].name, "Egg");
    }

    #[test]
    fn test_top_foods_limited_to_ten() {
        let mut state = TrackerState::new();
        let mut entries = Vec::new();
        for id in 1..=12 {
            state.add_food(food(id, &format!("Food {}", id), 100.0, 1.0));
            entries.push(entry(id, 1, None));
        }
        assert_eq!(build_top_foods(&entries, &state).len(), 10);
    }

    #[test]
    fn test_radar_caps_at_150() {
        let mut state = TrackerState::new();
        state.add_food(food(1, "Protein Shake", 100.0, 500.0));

        let entries = vec![entry(1, 7, None)];
        let radar = build_radar(&entries, &state, 1);

        let protein = radar.iter().find(|p| p.nutrient == "Protein").unwrap();
        // 500 / 50 * 100 = 1000%, capped for display.
        assert_eq!(protein.percentage, 150.0);
    }

    #[test]
    fn test_radar_averages_over_requested_days() {
        let mut state = TrackerState::new();
        state.add_food(food(1, "Protein Bar", 100.0, 50.0));

        // One entry, 7-day window: 50 g / 7 days / 50 g RDA.
        let entries = vec![entry(1, 7, None)];
        let radar = build_radar(&entries, &state, 7);

        let protein = radar.iter().find(|p| p.nutrient == "Protein").unwrap();
        assert!((protein.percentage - 14.3).abs() < 1e-9);
    }
}
