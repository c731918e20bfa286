pub mod aggregate;
pub mod constants;
pub mod rda;
pub mod recommend;
pub mod report;
pub mod severity;

pub use aggregate::{aggregate, NutrientTotals};
pub use constants::*;
pub use rda::personalized_rda;
pub use recommend::build_recommendations;
pub use report::{build_report, AnalysisWindow};
pub use severity::{classify, percentage, Severity};
