use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{Result, TrackerError};
use crate::models::{FoodItem, MealSlot};
use crate::state::TrackerState;

/// Minimum fuzzy-match score to suggest a food for a typed name.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Prompt for a food by name with fuzzy matching against the catalog.
///
/// Exact (case-insensitive) matches win immediately; otherwise close matches
/// are offered for confirmation or selection. Returns the chosen food id.
pub fn prompt_food(state: &TrackerState) -> Result<u64> {
    loop {
        let input: String = Input::new()
            .with_prompt("What did you eat?")
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let foods: Vec<&FoodItem> = state.foods().collect();

        // Try exact match first (case-insensitive)
        if let Some(food) = foods
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(input))
        {
            return Ok(food.id);
        }

        // Try fuzzy matching
        let mut candidates: Vec<(&FoodItem, f64)> = foods
            .iter()
            .map(|f| (*f, jaro_winkler(&f.name.to_lowercase(), &input.to_lowercase())))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching food found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let food = candidates[0].0;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", food.name))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(food.id);
            }
            continue;
        }

        // Multiple matches - let user select
        let options: Vec<String> = candidates
            .iter()
            .take(5)
            .map(|(f, _)| f.name.clone())
            .collect();

        let mut selection_options = options.clone();
        selection_options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&selection_options)
            .default(0)
            .interact()?;

        if selection < options.len() {
            return Ok(candidates[selection].0.id);
        }
    }
}

/// Prompt for the portion as a multiple of the reference serving.
pub fn prompt_portion() -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Portion (multiples of one serving)")
        .default("1.0".to_string())
        .interact_text()?;

    let portion: f64 = input
        .parse()
        .map_err(|_| TrackerError::InvalidInput("Invalid number".to_string()))?;

    if portion <= 0.0 {
        return Err(TrackerError::InvalidInput(
            "Portion must be positive".to_string(),
        ));
    }

    Ok(portion)
}

/// Prompt for the meal slot, allowing none.
pub fn prompt_meal_slot() -> Result<Option<MealSlot>> {
    let mut options: Vec<&str> = MealSlot::ALL.iter().map(|s| s.display_name()).collect();
    options.push("(skip)");

    let selection = Select::new()
        .with_prompt("Which meal was this?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(MealSlot::ALL.get(selection).copied())
}

/// Collect everything needed to log one consumption entry.
pub fn collect_log_entry(state: &TrackerState) -> Result<(u64, f64, Option<MealSlot>)> {
    let food_id = prompt_food(state)?;
    let portion = prompt_portion()?;
    let meal_slot = prompt_meal_slot()?;
    Ok((food_id, portion, meal_slot))
}
