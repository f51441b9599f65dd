//! Shared utilities for commands
//!
//! This module contains:
//! - `load_inputs` - Read transaction and budget CSVs
//! - `resolve_year_month` - Default the report period to the current month
//! - `summary_from_args` - Build a `FinancialSummary` from CLI figures
//! - `print_json` / `write_output` - Output helpers

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use myfinance_core::import::{read_budgets_file, read_transactions_file};
use myfinance_core::{Budget, CategorySummary, FinancialSummary, Transaction};
use serde::Serialize;
use tracing::info;

use crate::cli::{InputArgs, SummaryArgs};

pub const SEPARATOR: &str =
    "   ─────────────────────────────────────────────────────────────";

/// Read the transactions CSV and, when given, the budgets CSV
pub fn load_inputs(input: &InputArgs) -> Result<(Vec<Transaction>, Vec<Budget>)> {
    let transactions = read_transactions_file(&input.transactions).with_context(|| {
        format!(
            "Failed to read transactions from {}",
            input.transactions.display()
        )
    })?;

    let budgets = match &input.budgets {
        Some(path) => read_budgets_file(path)
            .with_context(|| format!("Failed to read budgets from {}", path.display()))?,
        None => Vec::new(),
    };

    info!(
        transactions = transactions.len(),
        budgets = budgets.len(),
        "Loaded inputs"
    );
    Ok((transactions, budgets))
}

/// Fill in a missing year or month from today's date
pub fn resolve_year_month(year: Option<i32>, month: Option<u32>) -> (i32, u32) {
    let today = Utc::now().date_naive();
    (
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
    )
}

pub fn summary_from_args(args: &SummaryArgs) -> FinancialSummary {
    let mut summary = FinancialSummary::from_totals(args.income, args.expense);
    if let Some(adherence) = args.budget_adherence {
        summary = summary.with_budget_adherence(adherence);
    }
    if let Some(rate) = args.savings_rate {
        summary = summary.with_savings_rate(rate);
    }
    summary
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn write_output(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let content = content.as_ref();
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Wrote export");
    Ok(())
}

/// Shorten to `max` characters, ending in "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub fn print_category_table(title: &str, categories: &[CategorySummary]) {
    println!();
    println!("   {}", title);
    if categories.is_empty() {
        println!("   (none)");
        return;
    }

    println!(
        "   {:24} │ {:>16} │ {:>6} │ {:>8}",
        "Danh mục", "Số tiền", "Số GD", "%"
    );
    println!("   ─────────────────────────┼──────────────────┼────────┼─────────");
    for category in categories {
        println!(
            "   {:24} │ {:>16} │ {:>6} │ {:>7.1}%",
            truncate(&category.category_name, 24),
            myfinance_core::currency::format_vnd(category.amount),
            category.transaction_count,
            category.percentage
        );
    }
}
