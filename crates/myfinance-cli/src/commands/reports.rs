//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use myfinance_core::currency::format_vnd;
use myfinance_core::import::read_transactions_file;
use myfinance_core::{
    analyze_spending_patterns, category_report, monthly_report, score, yearly_report,
    CategoryReport, HealthResult, MonthlyReport, MonthlyTrend, YearlyReport,
};
use serde::Serialize;

use super::{
    load_inputs, print_category_table, print_health_result, print_json, resolve_year_month,
    SEPARATOR,
};
use crate::cli::{CategoryArgs, InputArgs};

/// JSON shape for `--json` report output
#[derive(Serialize)]
pub struct ReportWithHealth<'a, R: Serialize> {
    pub report: &'a R,
    pub health: &'a HealthResult,
}

pub fn cmd_report_monthly(
    input: &InputArgs,
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
) -> Result<()> {
    let (transactions, budgets) = load_inputs(input)?;
    let (year, month) = resolve_year_month(year, month);

    let report = monthly_report(&transactions, &budgets, year, month)
        .context("Failed to build monthly report")?;
    let health = score(&report.financial_summary());

    if json {
        return print_json(&ReportWithHealth {
            report: &report,
            health: &health,
        });
    }

    print_monthly_report(&report);
    print_health_result(&health);
    Ok(())
}

pub fn cmd_report_yearly(input: &InputArgs, year: Option<i32>, json: bool) -> Result<()> {
    let (transactions, budgets) = load_inputs(input)?;
    let (year, _) = resolve_year_month(year, None);

    let report =
        yearly_report(&transactions, &budgets, year).context("Failed to build yearly report")?;
    let health = score(&report.financial_summary());

    if json {
        return print_json(&ReportWithHealth {
            report: &report,
            health: &health,
        });
    }

    print_yearly_report(&report);
    print_health_result(&health);
    Ok(())
}

pub fn cmd_report_category(input: &InputArgs, range: &CategoryArgs, json: bool) -> Result<()> {
    let (transactions, budgets) = load_inputs(input)?;

    let report = category_report(
        &transactions,
        &budgets,
        range.category_id,
        range.from,
        range.to,
    )
    .context("Failed to build category report")?;

    if json {
        return print_json(&report);
    }

    print_category_report(&report);
    Ok(())
}

pub fn cmd_patterns(transactions_path: &Path, json: bool) -> Result<()> {
    let transactions = read_transactions_file(transactions_path).with_context(|| {
        format!(
            "Failed to read transactions from {}",
            transactions_path.display()
        )
    })?;
    let patterns = analyze_spending_patterns(&transactions);

    if json {
        return print_json(&patterns);
    }

    println!();
    println!("📅 Spending by Day of Week");
    println!("{}", SEPARATOR);

    let Some(patterns) = patterns else {
        println!("   No expenses found.");
        return Ok(());
    };

    println!("   {:10} │ {:>5} │ {:>18}", "Ngày", "Số GD", "Tổng chi");
    println!("   ───────────┼───────┼───────────────────");
    for day in &patterns.by_day_of_week {
        println!(
            "   {:10} │ {:>5} │ {:>18}",
            day.day,
            day.count,
            format_vnd(day.total)
        );
    }

    if let Some(peak) = &patterns.peak_spending_day {
        println!();
        println!(
            "   Peak: {} ({})",
            peak,
            format_vnd(patterns.peak_spending_amount)
        );
    }
    Ok(())
}

fn print_change(label: &str, current: f64, previous: f64, change: f64) {
    println!(
        "   {:12} {:>18}   (trước: {}, {:+.2}%)",
        label,
        format_vnd(current),
        format_vnd(previous),
        change
    );
}

pub fn print_monthly_report(report: &MonthlyReport) {
    println!();
    println!("📊 Báo cáo {}/{}", report.month_name, report.year);
    println!("{}", SEPARATOR);
    print_change(
        "Thu nhập:",
        report.total_income,
        report.previous_month_income,
        report.income_change_percent,
    );
    print_change(
        "Chi tiêu:",
        report.total_expense,
        report.previous_month_expense,
        report.expense_change_percent,
    );
    println!("   {:12} {:>18}", "Tiết kiệm:", format_vnd(report.net_savings));
    println!("   {:12} {:>17.2}%", "Tỷ lệ:", report.savings_rate);
    println!(
        "   {} giao dịch, trung bình {}",
        report.total_transactions,
        format_vnd(report.average_transaction)
    );

    print_category_table("Chi tiêu theo danh mục", &report.expense_by_category);
    print_budget_status(report);
    print_category_table("Thu nhập theo danh mục", &report.income_by_category);
}

fn print_budget_status(report: &MonthlyReport) {
    let budgeted: Vec<_> = report
        .expense_by_category
        .iter()
        .filter(|c| c.has_budget())
        .collect();
    if budgeted.is_empty() {
        return;
    }

    println!();
    println!("   Ngân sách");
    for category in budgeted {
        let icon = if category.within_budget() { "✅" } else { "⚠️ " };
        println!(
            "   {} {:24} {:>7.1}% của {}",
            icon,
            super::truncate(&category.category_name, 24),
            category.budget_usage_percent.unwrap_or_default(),
            format_vnd(category.budget_amount.unwrap_or_default())
        );
    }
}

fn trend_label(trend: &Option<MonthlyTrend>) -> String {
    match trend {
        Some(t) => format!("{} ({})", t.month_name, format_vnd(t.savings)),
        None => "-".to_string(),
    }
}

pub fn print_yearly_report(report: &YearlyReport) {
    println!();
    println!("📈 Báo cáo năm {}", report.year);
    println!("{}", SEPARATOR);
    print_change(
        "Thu nhập:",
        report.total_income,
        report.previous_year_income,
        report.income_change_percent,
    );
    print_change(
        "Chi tiêu:",
        report.total_expense,
        report.previous_year_expense,
        report.expense_change_percent,
    );
    println!("   {:12} {:>18}", "Tiết kiệm:", format_vnd(report.net_savings));
    println!("   {:12} {:>17.2}%", "Tỷ lệ:", report.savings_rate);

    println!();
    println!(
        "   {:9} │ {:>16} │ {:>16} │ {:>16} │ {:>7}",
        "Tháng", "Thu nhập", "Chi tiêu", "Tiết kiệm", "%"
    );
    println!("   ──────────┼──────────────────┼──────────────────┼──────────────────┼────────");
    for trend in &report.monthly_trends {
        println!(
            "   {:9} │ {:>16} │ {:>16} │ {:>16} │ {:>6.1}%",
            trend.month_name,
            format_vnd(trend.income),
            format_vnd(trend.expense),
            format_vnd(trend.savings),
            trend.savings_rate
        );
    }

    println!();
    println!("   Tiết kiệm tốt nhất: {}", trend_label(&report.best_savings_month));
    println!("   Tiết kiệm kém nhất: {}", trend_label(&report.worst_savings_month));

    print_category_table("Chi tiêu theo danh mục", &report.top_expense_categories);
}

pub fn print_category_report(report: &CategoryReport) {
    println!();
    println!(
        "📂 {} ({})",
        report.category_name,
        report.category_type.label()
    );
    println!(
        "   {} → {}",
        report.start_date.format("%d/%m/%Y"),
        report.end_date.format("%d/%m/%Y")
    );
    println!("{}", SEPARATOR);
    println!("   {:14} {:>18}", "Tổng:", format_vnd(report.total_amount));
    println!(
        "   {} giao dịch, trung bình {}",
        report.transaction_count,
        format_vnd(report.average_transaction)
    );
    println!(
        "   Nhỏ nhất {}, lớn nhất {}",
        format_vnd(report.min_transaction),
        format_vnd(report.max_transaction)
    );

    if let (Some(budgeted), Some(variance), Some(rate)) = (
        report.budgeted_amount,
        report.budget_variance,
        report.budget_adherence_rate,
    ) {
        println!(
            "   Ngân sách {} (chênh lệch {}, tuân thủ {:.1}%)",
            format_vnd(budgeted),
            format_vnd(variance),
            rate
        );
    }

    println!();
    println!("   {:9} │ {:>5} │ {:>18}", "Kỳ", "Số GD", "Số tiền");
    println!("   ──────────┼───────┼───────────────────");
    for period in &report.period_summaries {
        println!(
            "   {:9} │ {:>5} │ {:>18}",
            period.period_label,
            period.transaction_count,
            format_vnd(period.amount)
        );
    }
}
