use crate::analysis::Severity;
use crate::intervention::InterventionRecord;
use crate::models::{AnalysisReport, NutrientDetail, Priority};

/// Display an analysis report as formatted tables.
pub fn display_report(report: &AnalysisReport) {
    println!();
    println!("=== Nutrition Analysis ===");
    println!();
    println!("Calories (per day): {:.0}", report.total_calories);
    println!("Meals logged: {}", report.meal_count);
    println!("Overall score: {:.0}/100", report.overall_score);

    display_details("Macronutrients", &report.macronutrients);
    display_details("Micronutrients", &report.micronutrients);

    if report.recommendations.is_empty() {
        println!();
        println!("No recommendations - intake looks good.");
        return;
    }

    println!();
    println!("--- Recommendations ---");
    for rec in &report.recommendations {
        let tag = match rec.priority {
            Priority::High => "[HIGH]",
            Priority::Medium => "[MEDIUM]",
        };
        println!();
        println!("{} {}", tag, rec.message);
        if !rec.foods.is_empty() {
            println!("   Try: {}", rec.foods.join(", "));
        }
    }
    println!();
}

fn display_details(title: &str, details: &[NutrientDetail]) {
    if details.is_empty() {
        return;
    }

    println!();
    println!("--- {} ---", title);

    let max_name_len = details.iter().map(|d| d.name.len()).max().unwrap_or(10);

    for detail in details {
        println!(
            "  {:<width$}  {:>8.1} / {:>7.1} {:<4} {:>5.0}%  {}",
            detail.name,
            detail.consumed,
            detail.recommended,
            detail.unit,
            detail.percentage,
            severity_mark(detail.severity),
            width = max_name_len
        );
    }
}

fn severity_mark(severity: Severity) -> &'static str {
    match severity {
        Severity::None => "ok",
        Severity::Mild => "low",
        Severity::Moderate => "LOW",
        Severity::Severe => "VERY LOW",
    }
}

/// Display surfaced intervention records.
pub fn display_interventions(records: &[InterventionRecord]) {
    if records.is_empty() {
        println!("No active interventions.");
        return;
    }

    println!();
    println!("=== Active Interventions ({}) ===", records.len());
    println!();

    for record in records {
        let level = record
            .level()
            .map(|l| format!("{:?}", l).to_uppercase())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  user {} | {:<12} | {} days | {:<8} | {}",
            record.user_id,
            record.nutrient.display_name(),
            record.consecutive_days,
            level,
            record.message()
        );
    }
    println!();
}
