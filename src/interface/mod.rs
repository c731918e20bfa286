pub mod prompts;
pub mod render;

pub use prompts::{collect_log_entry, prompt_food, prompt_meal_slot, prompt_portion};
pub use render::{display_interventions, display_report};
