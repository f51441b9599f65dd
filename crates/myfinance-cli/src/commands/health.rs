//! Health score command

use anyhow::Result;
use myfinance_core::currency::format_vnd;
use myfinance_core::health::{
    score, BudgetScore, FinancialSummary, HealthResult, Priority, MAX_SCORE,
};

use super::{print_json, summary_from_args, SEPARATOR};
use crate::cli::SummaryArgs;

pub fn cmd_score(args: &SummaryArgs, json: bool) -> Result<()> {
    let summary = summary_from_args(args);
    let result = score(&summary);

    if json {
        return print_json(&result);
    }

    print_summary(&summary);
    print_health_result(&result);
    Ok(())
}

pub fn print_summary(summary: &FinancialSummary) {
    println!();
    println!("💵 Financial Summary");
    println!("{}", SEPARATOR);
    println!("   Thu nhập:          {:>18}", format_vnd(summary.total_income));
    println!("   Chi tiêu:          {:>18}", format_vnd(summary.total_expense));
    println!("   Tiết kiệm:         {:>18}", format_vnd(summary.net_savings));
    println!("   Tỷ lệ tiết kiệm:   {:>17.1}%", summary.savings_rate);
    if let Some(adherence) = summary.budget.adherence() {
        println!("   Tuân thủ ngân sách: {:>16.1}%", adherence);
    }
}

/// Label and points of the budget component
pub fn budget_component(budget: BudgetScore) -> (&'static str, u32) {
    match budget {
        BudgetScore::Adherence(points) => ("Budget adherence", points),
        BudgetScore::NoBudgetBonus(points) => ("No-budget bonus", points),
    }
}

pub fn print_health_result(result: &HealthResult) {
    let breakdown = &result.breakdown;

    println!();
    println!(
        "{} Financial Health: {}/{} ({})",
        result.rating.icon, result.score, MAX_SCORE, result.rating.level
    );
    println!("   {}", result.rating.description);
    println!("{}", SEPARATOR);
    println!("   {:28} │ {:>6}", "Component", "Points");
    println!("   ─────────────────────────────┼───────");
    println!("   {:28} │ {:>3}/30", "Savings rate", breakdown.savings_rate_score);
    println!("   {:28} │ {:>3}/25", "Expense ratio", breakdown.expense_ratio_score);
    println!("   {:28} │ {:>3}/20", "Net savings", breakdown.net_savings_score);
    let (label, points) = budget_component(breakdown.budget);
    println!("   {:28} │ {:>3}/25", label, points);

    if result.recommendations.is_empty() {
        return;
    }

    println!();
    println!("💡 Recommendations");
    for rec in &result.recommendations {
        let marker = if rec.priority == Priority::Critical { "🚨" } else { "•" };
        println!("   {} [{}] {}", marker, rec.priority, rec.message);
        println!("      → {}", rec.action);
    }
}
