use crate::analysis::constants::{REC_HIGH_PCT, REC_MEDIUM_PCT, RECOMMENDATION_FOODS};
use crate::analysis::severity::percentage;
use crate::models::{BodyProfile, NutrientAmounts, Priority, Recommendation};
use crate::state::FoodCatalog;

/// Generate prioritized food recommendations for deficient nutrients.
///
/// Per nutrient with a configured candidate list: below 50% emits HIGH, below
/// 80% emits MEDIUM, otherwise nothing. Candidate foods are filtered through
/// the user's restrictions and allergies; an emptied list still emits the
/// recommendation with its message, it is never suppressed.
pub fn build_recommendations(
    per_day: &NutrientAmounts,
    rda: &NutrientAmounts,
    catalog: &dyn FoodCatalog,
    profile: Option<&BodyProfile>,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for &(nutrient, candidates) in RECOMMENDATION_FOODS {
        let pct = percentage(per_day.get(nutrient), rda.get(nutrient));
        let name = nutrient.display_name();

        let (priority, message) = if pct < REC_HIGH_PCT {
            (
                Priority::High,
                format!(
                    "Your {} intake is very low ({:.0}% of daily goal). \
                     Consider adding more {}-rich foods.",
                    name,
                    pct,
                    name.to_lowercase()
                ),
            )
        } else if pct < REC_MEDIUM_PCT {
            (
                Priority::Medium,
                format!(
                    "Your {} intake is below target ({:.0}%). \
                     Try adding a serving of recommended foods.",
                    name, pct
                ),
            )
        } else {
            continue;
        };

        recommendations.push(Recommendation {
            nutrient: name.to_string(),
            message,
            priority,
            foods: safe_candidates(candidates, catalog, profile),
        });
    }

    recommendations
}

/// Filter candidate food names through the safety predicate.
///
/// Foods absent from the catalog are kept as-is; there is nothing to check
/// them against and dropping them would hide useful suggestions.
fn safe_candidates(
    candidates: &[&str],
    catalog: &dyn FoodCatalog,
    profile: Option<&BodyProfile>,
) -> Vec<String> {
    candidates
        .iter()
        .filter(|name| match (profile, catalog.find_by_name(name)) {
            (Some(profile), Some(food)) => catalog.is_safe_for(profile, food),
            _ => true,
        })
        .map(|name| name.to_string())
        .collect()
}
