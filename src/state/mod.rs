mod persistence;
mod store;

use chrono::NaiveDateTime;

use crate::models::{BodyProfile, ConsumptionEntry, FoodItem};

pub use persistence::{import_foods_csv, load_state, save_state};
pub use store::{TrackerState, UserRecord};

/// Food lookup and safety filtering, as seen by the analysis engine.
pub trait FoodCatalog {
    fn lookup(&self, food_id: u64) -> Option<&FoodItem>;

    /// Case-insensitive lookup by display name.
    fn find_by_name(&self, name: &str) -> Option<&FoodItem>;

    /// Whether a food is safe for a user given their restrictions and
    /// allergies. Restrictions match the food's content tags; allergies match
    /// the food name as a case-insensitive substring.
    fn is_safe_for(&self, profile: &BodyProfile, food: &FoodItem) -> bool {
        let restricted = profile
            .restrictions
            .iter()
            .any(|r| r.excluded_tags().iter().any(|tag| food.has_tag(tag)));
        if restricted {
            return false;
        }

        let name = food.name.to_lowercase();
        !profile.allergies.iter().any(|allergy| {
            let allergy = allergy.trim().to_lowercase();
            !allergy.is_empty() && name.contains(&allergy)
        })
    }
}

/// Query seam over the consumption log. `start` is inclusive, `end` exclusive;
/// results come back ordered by `consumed_at`.
pub trait ConsumptionLog {
    fn query(&self, user_id: u64, start: NaiveDateTime, end: NaiveDateTime)
        -> Vec<ConsumptionEntry>;
}

/// Body-profile lookup seam.
pub trait UserProfileStore {
    fn body_profile(&self, user_id: u64) -> Option<&BodyProfile>;
}
