use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use diet_balance_rs::cli::{Cli, Command};
use diet_balance_rs::error::{Result, TrackerError};
use diet_balance_rs::interface::{collect_log_entry, display_interventions, display_report};
use diet_balance_rs::intervention::LogDispatcher;
use diet_balance_rs::state::{import_foods_csv, load_state, save_state, TrackerState};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Log => cmd_log(&cli.file, cli.user),
        Command::Analyze { week, json } => cmd_analyze(&cli.file, cli.user, week, json),
        Command::Charts { days } => cmd_charts(&cli.file, cli.user, days),
        Command::DailyRun { date } => cmd_daily_run(&cli.file, date.as_deref()),
        Command::ImportFoods { path } => cmd_import_foods(&cli.file, &path),
    }
}

fn load_or_report(file_path: &str) -> Result<TrackerState> {
    let path = Path::new(file_path);
    if !path.exists() {
        eprintln!("State file not found: {}", file_path);
        eprintln!("Use 'import-foods' to start a new state file with a catalog.");
        return Err(TrackerError::InvalidInput(format!(
            "missing state file: {}",
            file_path
        )));
    }
    load_state(path)
}

/// Interactively log one meal for the user.
fn cmd_log(file_path: &str, user_id: u64) -> Result<()> {
    let mut state = load_or_report(file_path)?;

    if state.food_count() == 0 {
        println!("The food catalog is empty. Import foods first.");
        return Ok(());
    }

    let (food_id, portion, meal_slot) = collect_log_entry(&state)?;
    let now = Local::now().naive_local();
    state.log_entry(user_id, food_id, portion, now, meal_slot)?;
    save_state(file_path, &state)?;

    println!("Entry logged.");
    Ok(())
}

/// Analyze today's intake, or the past week averaged per active day.
fn cmd_analyze(file_path: &str, user_id: u64, week: bool, json: bool) -> Result<()> {
    let state = load_or_report(file_path)?;
    let today = Local::now().date_naive();

    let report = if week {
        state.analyze_week(user_id, today)?
    } else {
        state.analyze_day(user_id, today)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}

/// Print chart data for the requested look-back window.
fn cmd_charts(file_path: &str, user_id: u64, days: u32) -> Result<()> {
    let state = load_or_report(file_path)?;
    let today = Local::now().date_naive();

    let charts = state.chart_data(user_id, today, days)?;
    println!("{}", serde_json::to_string_pretty(&charts)?);
    Ok(())
}

/// Advance intervention trackers for all users for one date.
fn cmd_daily_run(file_path: &str, date: Option<&str>) -> Result<()> {
    let mut state = load_or_report(file_path)?;

    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| TrackerError::InvalidInput(format!("invalid date: {}", raw)))?,
        None => Local::now().date_naive(),
    };
    let now = Local::now().naive_local();

    let mut dispatcher = LogDispatcher;
    let surfaced = state.run_daily_batch(date, now, &mut dispatcher);
    save_state(file_path, &state)?;

    display_interventions(&surfaced);
    Ok(())
}

/// Merge a CSV food catalog into the state file, creating it if needed.
fn cmd_import_foods(file_path: &str, csv_path: &str) -> Result<()> {
    let mut state = if Path::new(file_path).exists() {
        load_state(file_path)?
    } else {
        TrackerState::new()
    };

    let imported = import_foods_csv(csv_path, &mut state)?;
    save_state(file_path, &state)?;

    println!("Imported {} foods ({} total in catalog).", imported, state.food_count());
    Ok(())
}
