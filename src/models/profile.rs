use serde::{Deserialize, Serialize};

/// How physically active a user is. Stored for clients; the RDA adjustment
/// itself is driven by BMI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

/// A dietary restriction a user follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    GlutenFree,
    LactoseFree,
    NutAllergy,
    Halal,
    Kosher,
    LowSodium,
    DiabeticFriendly,
}

impl DietaryRestriction {
    /// Food tags this restriction excludes.
    pub fn excluded_tags(&self) -> &'static [&'static str] {
        match self {
            DietaryRestriction::Vegetarian => &["meat", "fish"],
            DietaryRestriction::Vegan => &["meat", "fish", "dairy", "egg"],
            DietaryRestriction::GlutenFree => &["gluten"],
            DietaryRestriction::LactoseFree => &["dairy"],
            DietaryRestriction::NutAllergy => &["nuts"],
            DietaryRestriction::Halal => &["pork", "alcohol"],
            DietaryRestriction::Kosher => &["pork", "shellfish"],
            DietaryRestriction::LowSodium => &["high-sodium"],
            DietaryRestriction::DiabeticFriendly => &["high-sugar"],
        }
    }
}

/// A user's body metrics and dietary constraints.
///
/// Weight and height may be missing; analysis then falls back to the
/// unadjusted base RDA table instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<u32>,
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub restrictions: Vec<DietaryRestriction>,
    /// Free-text allergy strings, matched case-insensitively against food
    /// names (e.g. "peanuts", "shellfish").
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl BodyProfile {
    /// Body Mass Index: weight(kg) / height(m)^2.
    ///
    /// `None` when weight or height is missing or non-positive.
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight_kg.filter(|w| *w > 0.0)?;
        let height_cm = self.height_cm.filter(|h| *h > 0.0)?;
        let height_m = height_cm / 100.0;
        Some(weight / (height_m * height_m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let profile = BodyProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            ..Default::default()
        };
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 22.857).abs() < 0.01);
    }

    #[test]
    fn test_bmi_missing_metrics() {
        let profile = BodyProfile::default();
        assert!(profile.bmi().is_none());

        let zero_height = BodyProfile {
            weight_kg: Some(70.0),
            height_cm: Some(0.0),
            ..Default::default()
        };
        assert!(zero_height.bmi().is_none());
    }
}
