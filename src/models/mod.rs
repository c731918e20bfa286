pub mod entry;
pub mod food;
pub mod nutrient;
pub mod profile;
pub mod report;

pub use entry::{ConsumptionEntry, MealSlot};
pub use food::{FoodCategory, FoodItem, FoodNutrientProfile};
pub use nutrient::{Nutrient, NutrientAmounts};
pub use profile::{ActivityLevel, BodyProfile, DietaryRestriction};
pub use report::{AnalysisReport, NutrientDetail, Priority, Recommendation};
