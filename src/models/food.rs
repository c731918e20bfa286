use serde::{Deserialize, Serialize};

use crate::models::NutrientAmounts;

/// Broad food grouping, used for catalog browsing and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Grain,
    Protein,
    Dairy,
    Legume,
    NutSeed,
    Beverage,
    Snack,
    Dessert,
    Other,
}

impl FoodCategory {
    /// Parse a category from free text, falling back to `Other` for anything
    /// unrecognized rather than failing.
    pub fn parse_lenient(input: &str) -> FoodCategory {
        match input.trim().to_lowercase().as_str() {
            "fruit" | "fruits" => FoodCategory::Fruit,
            "vegetable" | "vegetables" => FoodCategory::Vegetable,
            "grain" | "grains" => FoodCategory::Grain,
            "protein" | "meat" => FoodCategory::Protein,
            "dairy" => FoodCategory::Dairy,
            "legume" | "legumes" => FoodCategory::Legume,
            "nut_seed" | "nut" | "nuts" | "seed" | "seeds" => FoodCategory::NutSeed,
            "beverage" | "beverages" | "drink" => FoodCategory::Beverage,
            "snack" | "snacks" => FoodCategory::Snack,
            "dessert" | "desserts" => FoodCategory::Dessert,
            _ => FoodCategory::Other,
        }
    }
}

/// Per-serving nutrient amounts for a food.
///
/// Owned by the food record and never mutated by the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrientProfile {
    /// Reference serving size in grams.
    pub serving_size: f64,
    pub amounts: NutrientAmounts,
}

/// A catalog food with its nutrient profile and safety tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u64,
    pub name: String,
    pub category: FoodCategory,
    /// Content tags matched against dietary restrictions (e.g. "meat",
    /// "dairy", "gluten", "nuts").
    #[serde(default)]
    pub tags: Vec<String>,
    pub profile: FoodNutrientProfile,
}

impl FoodItem {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_falls_back_to_other() {
        assert_eq!(FoodCategory::parse_lenient("Fruit"), FoodCategory::Fruit);
        assert_eq!(FoodCategory::parse_lenient("nuts"), FoodCategory::NutSeed);
        assert_eq!(FoodCategory::parse_lenient("???"), FoodCategory::Other);
        assert_eq!(FoodCategory::parse_lenient(""), FoodCategory::Other);
    }
}
