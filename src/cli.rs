use clap::{Parser, Subcommand};

/// DietBalance — a diet tracking CLI that analyzes nutrient intake,
/// escalates persistent deficiencies, and recommends foods.
#[derive(Parser, Debug)]
#[command(name = "diet_balance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the tracker state JSON file.
    #[arg(short, long, default_value = "tracker_state.json")]
    pub file: String,

    /// User to operate on.
    #[arg(short, long, default_value_t = 1)]
    pub user: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactively log a meal.
    Log,

    /// Analyze nutrient intake against personalized daily targets.
    Analyze {
        /// Average over the past 7 days instead of just today.
        #[arg(long)]
        week: bool,

        /// Print the report as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Produce chart data (daily trend, macro split, meal breakdown,
    /// top foods, nutrient radar) as JSON.
    Charts {
        /// Number of days to look back.
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Advance all users' intervention trackers for one calendar date.
    DailyRun {
        /// Date to evaluate (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Merge a food catalog CSV into the state file.
    ImportFoods {
        /// Path to the CSV file.
        path: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Analyze {
            week: false,
            json: false,
        }
    }
}
