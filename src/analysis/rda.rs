use crate::analysis::constants::{
    BASE_RDA, BMI_NORMAL_MAX, BMI_OVERWEIGHT_MAX, BMI_UNDERWEIGHT_MAX, OBESE_ADJUSTMENTS,
    OVERWEIGHT_ADJUSTMENTS, UNDERWEIGHT_ADJUSTMENTS,
};
use crate::models::{BodyProfile, Nutrient, NutrientAmounts};

/// Derive a personalized RDA table from a user's body metrics.
///
/// Starts from the base adult-average table and applies the bracketed BMI
/// multipliers. With no profile, or one missing weight or height, the base
/// table is returned unchanged; this never fails.
pub fn personalized_rda(profile: Option<&BodyProfile>) -> NutrientAmounts {
    let Some(bmi) = profile.and_then(BodyProfile::bmi) else {
        return BASE_RDA.clone();
    };

    let adjustments: &[(Nutrient, f64)] = if bmi < BMI_UNDERWEIGHT_MAX {
        UNDERWEIGHT_ADJUSTMENTS
    } else if bmi < BMI_NORMAL_MAX {
        &[]
    } else if bmi < BMI_OVERWEIGHT_MAX {
        OVERWEIGHT_ADJUSTMENTS
    } else {
        OBESE_ADJUSTMENTS
    };

    let mut rda = BASE_RDA.clone();
    for &(nutrient, factor) in adjustments {
        rda.set(nutrient, rda.get(nutrient) * factor);
    }
    rda
}
