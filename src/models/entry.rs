use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Which meal of the day an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

/// One logged instance of a user eating a food.
///
/// Immutable once logged. Owned by the user: deleting a user deletes its
/// entries. `portion` is a multiple of the food's reference serving and must
/// be positive (enforced at the logging factory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionEntry {
    pub user_id: u64,
    pub food_id: u64,
    pub portion: f64,
    pub consumed_at: NaiveDateTime,
    pub meal_slot: Option<MealSlot>,
}

impl ConsumptionEntry {
    /// Calendar date the entry was consumed on.
    pub fn consumed_date(&self) -> NaiveDate {
        self.consumed_at.date()
    }
}
