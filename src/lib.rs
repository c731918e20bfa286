pub mod analysis;
pub mod charts;
pub mod cli;
pub mod error;
pub mod interface;
pub mod intervention;
pub mod models;
pub mod state;

pub use error::{Result, TrackerError};
pub use models::{ConsumptionEntry, FoodItem, Nutrient, NutrientAmounts};
