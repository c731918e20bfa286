use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tracked nutrient.
///
/// The declaration order is the canonical order used everywhere: totals,
/// RDA tables, and serialized reports all iterate [`Nutrient::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    Fiber,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    VitaminB12,
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    Potassium,
}

impl Nutrient {
    /// All tracked nutrients in canonical order.
    pub const ALL: [Nutrient; 16] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
        Nutrient::VitaminB12,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Zinc,
        Nutrient::Potassium,
    ];

    /// Macronutrients, in report order.
    pub const MACROS: [Nutrient; 4] = [
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::Fat,
        Nutrient::Fiber,
    ];

    /// Micronutrients, in report order.
    pub const MICROS: [Nutrient; 11] = [
        Nutrient::VitaminA,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
        Nutrient::VitaminB12,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Zinc,
        Nutrient::Potassium,
    ];

    /// Human-readable name as shown in reports and charts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbohydrates => "Carbohydrates",
            Nutrient::Fat => "Fat",
            Nutrient::Fiber => "Fiber",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminE => "Vitamin E",
            Nutrient::VitaminK => "Vitamin K",
            Nutrient::VitaminB12 => "Vitamin B12",
            Nutrient::Calcium => "Calcium",
            Nutrient::Iron => "Iron",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Zinc => "Zinc",
            Nutrient::Potassium => "Potassium",
        }
    }

    /// Measurement unit for this nutrient.
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Carbohydrates | Nutrient::Fat | Nutrient::Fiber => "g",
            Nutrient::VitaminA | Nutrient::VitaminD | Nutrient::VitaminK | Nutrient::VitaminB12 => {
                "mcg"
            }
            Nutrient::VitaminC
            | Nutrient::VitaminE
            | Nutrient::Calcium
            | Nutrient::Iron
            | Nutrient::Magnesium
            | Nutrient::Zinc
            | Nutrient::Potassium => "mg",
        }
    }
}

/// An ordered mapping from nutrient to amount.
///
/// Used for food profiles, window totals, and RDA tables. Absent nutrients
/// read as 0. Iteration and serialization follow the canonical enum order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientAmounts(BTreeMap<Nutrient, f64>);

impl NutrientAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount for a nutrient, 0 when absent.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(&nutrient).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, nutrient: Nutrient, amount: f64) {
        self.0.insert(nutrient, amount);
    }

    /// Add `other * factor` to every tracked nutrient.
    pub fn add_scaled(&mut self, other: &NutrientAmounts, factor: f64) {
        for nutrient in Nutrient::ALL {
            let delta = other.get(nutrient) * factor;
            if delta != 0.0 {
                *self.0.entry(nutrient).or_insert(0.0) += delta;
            }
        }
    }

    /// A copy with every amount multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> NutrientAmounts {
        NutrientAmounts(self.0.iter().map(|(&n, &v)| (n, v * factor)).collect())
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientAmounts {
    fn from_iter<T: IntoIterator<Item = (Nutrient, f64)>>(iter: T) -> Self {
        NutrientAmounts(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_nutrient_reads_zero() {
        let amounts = NutrientAmounts::new();
        assert_eq!(amounts.get(Nutrient::Iron), 0.0);
    }

    #[test]
    fn test_add_scaled() {
        let mut totals = NutrientAmounts::new();
        let mut profile = NutrientAmounts::new();
        profile.set(Nutrient::Calories, 95.0);
        profile.set(Nutrient::VitaminC, 8.4);

        totals.add_scaled(&profile, 2.0);
        assert_eq!(totals.get(Nutrient::Calories), 190.0);
        assert!((totals.get(Nutrient::VitaminC) - 16.8).abs() < 1e-9);
    }

    #[test]
    fn test_canonical_order_is_stable() {
        let mut amounts = NutrientAmounts::new();
        amounts.set(Nutrient::Potassium, 1.0);
        amounts.set(Nutrient::Calories, 1.0);

        let json = serde_json::to_string(&amounts).unwrap();
        let cal = json.find("Calories").unwrap();
        let pot = json.find("Potassium").unwrap();
        assert!(cal < pot);
    }
}
