use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{FoodCategory, FoodItem, FoodNutrientProfile, Nutrient, NutrientAmounts};
use crate::state::TrackerState;

/// Load the full tracker state from a JSON file.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<TrackerState> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the full tracker state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &TrackerState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// One row of a food catalog CSV.
#[derive(Debug, Deserialize)]
struct FoodCsvRow {
    name: String,
    category: String,
    /// Semicolon-separated content tags, e.g. "meat;high-sodium".
    #[serde(default)]
    tags: String,
    serving_size: f64,
    calories: f64,
    protein: f64,
    carbohydrates: f64,
    fat: f64,
    fiber: f64,
    vitamin_a: f64,
    vitamin_c: f64,
    vitamin_d: f64,
    vitamin_e: f64,
    vitamin_k: f64,
    vitamin_b12: f64,
    calcium: f64,
    iron: f64,
    magnesium: f64,
    zinc: f64,
    potassium: f64,
}

impl FoodCsvRow {
    fn amounts(&self) -> NutrientAmounts {
        [
            (Nutrient::Calories, self.calories),
            (Nutrient::Protein, self.protein),
            (Nutrient::Carbohydrates, self.carbohydrates),
            (Nutrient::Fat, self.fat),
            (Nutrient::Fiber, self.fiber),
            (Nutrient::VitaminA, self.vitamin_a),
            (Nutrient::VitaminC, self.vitamin_c),
            (Nutrient::VitaminD, self.vitamin_d),
            (Nutrient::VitaminE, self.vitamin_e),
            (Nutrient::VitaminK, self.vitamin_k),
            (Nutrient::VitaminB12, self.vitamin_b12),
            (Nutrient::Calcium, self.calcium),
            (Nutrient::Iron, self.iron),
            (Nutrient::Magnesium, self.magnesium),
            (Nutrient::Zinc, self.zinc),
            (Nutrient::Potassium, self.potassium),
        ]
        .into_iter()
        .collect()
    }
}

/// Merge a CSV food catalog into the state.
///
/// Matches existing foods by name (case-insensitive, last occurrence wins);
/// matched foods keep their id so logged entries stay attached. Returns the
/// number of rows imported.
pub fn import_foods_csv<P: AsRef<Path>>(path: P, state: &mut TrackerState) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut imported = 0;

    for row in reader.deserialize() {
        let row: FoodCsvRow = row?;

        let id = state
            .foods()
            .find(|f| f.name.eq_ignore_ascii_case(&row.name))
            .map(|f| f.id)
            .unwrap_or_else(|| state.next_food_id());

        let tags = row
            .tags
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        state.add_food(FoodItem {
            id,
            name: row.name.trim().to_string(),
            category: FoodCategory::parse_lenient(&row.category),
            tags,
            profile: FoodNutrientProfile {
                serving_size: row.serving_size,
                amounts: row.amounts(),
            },
        });
        imported += 1;
    }

    Ok(imported)
}
