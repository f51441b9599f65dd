//! Monthly, yearly and per-category report aggregation
//!
//! Reports are computed in memory from a user's transactions and budgets.
//! Percentages are rounded to two decimals in `f64`. The backend rounds the
//! underlying ratio half-up in decimal arithmetic, so a value sitting exactly
//! on a rounding boundary may differ from it in the last place.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::health::{BudgetInfo, FinancialSummary};
use crate::models::*;

/// Number of categories kept in the "top" lists
pub const TOP_CATEGORIES: usize = 5;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// Vietnamese month name: 3 -> "Tháng 3"
pub fn month_name(month: u32) -> String {
    format!("Tháng {}", month)
}

/// Reject months outside 1-12 and years outside 2000-2100
pub fn validate_period(year: i32, month: Option<u32>) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::InvalidData(format!(
            "Year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    if let Some(month) = month {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to 2 decimals
fn percent_of(part: f64, whole: f64) -> f64 {
    round2(part / whole * 100.0)
}

/// Sum of amounts of one transaction type
pub fn calculate_total(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == kind)
        .map(|t| t.amount)
        .sum()
}

/// Savings as a percentage of income; 0 when there is no income
pub fn savings_rate(income: f64, savings: f64) -> f64 {
    if income == 0.0 {
        return 0.0;
    }
    percent_of(savings, income)
}

/// Period-over-period change in percent
///
/// With no previous value the change is 0 when the current value is also 0,
/// otherwise 100.
pub fn change_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    percent_of(current - previous, previous)
}

/// Per-category totals for one transaction type, largest first
///
/// `budgets` should already be narrowed to the period being compared; the
/// first active budget found for a category is used.
pub fn category_summaries(
    transactions: &[Transaction],
    kind: TransactionType,
    total: f64,
    budgets: &[&Budget],
) -> Vec<CategorySummary> {
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: HashMap<i64, (&Category, f64, i64)> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.transaction_type == kind) {
        let entry = grouped.entry(tx.category.id).or_insert_with(|| {
            order.push(tx.category.id);
            (&tx.category, 0.0, 0)
        });
        entry.1 += tx.amount;
        entry.2 += 1;
    }

    let mut summaries: Vec<CategorySummary> = order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .map(|(category, amount, count)| {
            let percentage = if total == 0.0 {
                0.0
            } else {
                percent_of(amount, total)
            };

            let budget_amount = budgets
                .iter()
                .find(|b| b.is_active && b.category.id == category.id)
                .map(|b| b.budget_amount);

            let (budget_difference, budget_usage_percent) = match budget_amount {
                Some(budget) if budget > 0.0 => {
                    (Some(amount - budget), Some(percent_of(amount, budget)))
                }
                _ => (None, None),
            };

            CategorySummary {
                category_id: category.id,
                category_name: category.name.clone(),
                category_color: category.color.clone(),
                category_icon: category.icon.clone(),
                amount,
                transaction_count: count,
                percentage,
                budget_amount,
                budget_difference,
                budget_usage_percent,
            }
        })
        .collect();

    // Stable: ties keep first-seen order
    summaries.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    summaries
}

/// Percentage of budgeted categories that stayed within budget
///
/// Returns `None` when no category has a positive budget.
pub fn budget_adherence(expense_by_category: &[CategorySummary]) -> Option<f64> {
    let budgeted: Vec<_> = expense_by_category
        .iter()
        .filter(|c| c.has_budget())
        .collect();
    if budgeted.is_empty() {
        return None;
    }
    let within = budgeted.iter().filter(|c| c.within_budget()).count();
    Some(within as f64 / budgeted.len() as f64 * 100.0)
}

fn in_month(tx: &Transaction, year: i32, month: u32) -> bool {
    tx.transaction_date.year() == year && tx.transaction_date.month() == month
}

fn in_year(tx: &Transaction, year: i32) -> bool {
    tx.transaction_date.year() == year
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn budgets_for(budgets: &[Budget], year: i32, month: u32) -> Vec<&Budget> {
    budgets.iter().filter(|b| b.applies_to(year, month)).collect()
}

fn largest(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == kind)
        .map(|t| t.amount)
        .fold(None, |max: Option<f64>, a| Some(max.map_or(a, |m| m.max(a))))
        .unwrap_or(0.0)
}

fn top(summaries: &[CategorySummary]) -> Vec<CategorySummary> {
    summaries.iter().take(TOP_CATEGORIES).cloned().collect()
}

/// Build the report for one calendar month
pub fn monthly_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    year: i32,
    month: u32,
) -> Result<MonthlyReport> {
    validate_period(year, Some(month))?;

    let current: Vec<Transaction> = transactions
        .iter()
        .filter(|t| in_month(t, year, month))
        .cloned()
        .collect();
    let (prev_year, prev_month) = previous_month(year, month);
    let previous: Vec<Transaction> = transactions
        .iter()
        .filter(|t| in_month(t, prev_year, prev_month))
        .cloned()
        .collect();

    let total_income = calculate_total(&current, TransactionType::Income);
    let total_expense = calculate_total(&current, TransactionType::Expense);
    let net_savings = total_income - total_expense;

    let previous_month_income = calculate_total(&previous, TransactionType::Income);
    let previous_month_expense = calculate_total(&previous, TransactionType::Expense);

    let period_budgets = budgets_for(budgets, year, month);
    let income_by_category = category_summaries(
        &current,
        TransactionType::Income,
        total_income,
        &period_budgets,
    );
    let expense_by_category = category_summaries(
        &current,
        TransactionType::Expense,
        total_expense,
        &period_budgets,
    );

    let total_transactions = current.len() as i64;
    let average_transaction = if current.is_empty() {
        0.0
    } else {
        round2(current.iter().map(|t| t.amount).sum::<f64>() / current.len() as f64)
    };

    debug!(
        year,
        month,
        transactions = total_transactions,
        total_income,
        total_expense,
        "Built monthly report"
    );

    Ok(MonthlyReport {
        year,
        month,
        month_name: month_name(month),
        total_income,
        total_expense,
        net_savings,
        savings_rate: savings_rate(total_income, net_savings),
        previous_month_income,
        previous_month_expense,
        income_change_percent: change_percent(total_income, previous_month_income),
        expense_change_percent: change_percent(total_expense, previous_month_expense),
        top_expense_categories: top(&expense_by_category),
        top_income_categories: top(&income_by_category),
        income_by_category,
        expense_by_category,
        total_transactions,
        average_transaction,
        largest_expense: largest(&current, TransactionType::Expense),
        largest_income: largest(&current, TransactionType::Income),
    })
}

/// Build the report for one calendar year
///
/// Category budgets are compared against December's budgets.
pub fn yearly_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    year: i32,
) -> Result<YearlyReport> {
    validate_period(year, None)?;

    let current: Vec<Transaction> = transactions
        .iter()
        .filter(|t| in_year(t, year))
        .cloned()
        .collect();
    let previous: Vec<Transaction> = transactions
        .iter()
        .filter(|t| in_year(t, year - 1))
        .cloned()
        .collect();

    let total_income = calculate_total(&current, TransactionType::Income);
    let total_expense = calculate_total(&current, TransactionType::Expense);
    let net_savings = total_income - total_expense;
    let previous_year_income = calculate_total(&previous, TransactionType::Income);
    let previous_year_expense = calculate_total(&previous, TransactionType::Expense);

    let monthly_trends: Vec<MonthlyTrend> = (1..=12)
        .map(|month| {
            let in_period: Vec<Transaction> = current
                .iter()
                .filter(|t| t.transaction_date.month() == month)
                .cloned()
                .collect();
            let income = calculate_total(&in_period, TransactionType::Income);
            let expense = calculate_total(&in_period, TransactionType::Expense);
            let savings = income - expense;
            MonthlyTrend {
                month,
                month_name: month_name(month),
                income,
                expense,
                savings,
                savings_rate: savings_rate(income, savings),
            }
        })
        .collect();

    // Strict comparisons: the earliest month wins ties
    let pick = |better: fn(&MonthlyTrend, &MonthlyTrend) -> bool| {
        monthly_trends
            .iter()
            .fold(None, |best: Option<&MonthlyTrend>, trend| match best {
                Some(b) if !better(trend, b) => Some(b),
                _ => Some(trend),
            })
            .cloned()
    };
    let best_savings_month = pick(|a, b| a.savings > b.savings);
    let worst_savings_month = pick(|a, b| a.savings < b.savings);
    let highest_income_month = pick(|a, b| a.income > b.income);
    let highest_expense_month = pick(|a, b| a.expense > b.expense);

    let december_budgets = budgets_for(budgets, year, 12);
    let yearly_income_by_category = category_summaries(
        &current,
        TransactionType::Income,
        total_income,
        &december_budgets,
    );
    let yearly_expense_by_category = category_summaries(
        &current,
        TransactionType::Expense,
        total_expense,
        &december_budgets,
    );

    debug!(
        year,
        transactions = current.len(),
        total_income,
        total_expense,
        "Built yearly report"
    );

    Ok(YearlyReport {
        year,
        total_income,
        total_expense,
        net_savings,
        savings_rate: savings_rate(total_income, net_savings),
        previous_year_income,
        previous_year_expense,
        income_change_percent: change_percent(total_income, previous_year_income),
        expense_change_percent: change_percent(total_expense, previous_year_expense),
        monthly_trends,
        best_savings_month,
        worst_savings_month,
        highest_income_month,
        highest_expense_month,
        top_expense_categories: top(&yearly_expense_by_category),
        top_income_categories: top(&yearly_income_by_category),
        yearly_income_by_category,
        yearly_expense_by_category,
        total_transactions: current.len() as i64,
        average_monthly_income: round2(total_income / 12.0),
        average_monthly_expense: round2(total_expense / 12.0),
    })
}

/// Calendar months overlapping `start..=end`
///
/// The first period starts on the first of `start`'s month; the last one is
/// cut off at `end`.
fn month_periods(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut periods = Vec::new();
    let mut current = start.with_day(1).unwrap_or(start);
    while current <= end {
        let Some(next) = current.checked_add_months(Months::new(1)) else {
            break;
        };
        let last = next.pred_opt().unwrap_or(next).min(end);
        periods.push((current, last));
        current = next;
    }
    periods
}

/// Activity of one category between `start` and `end`, both inclusive
///
/// The category is looked up in the transactions first, then in the budgets.
/// Its type comes from its transactions; a category that only has budgets is
/// an expense category. Budget figures are `None` unless some month in range
/// has a positive budget for the category.
pub fn category_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    category_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<CategoryReport> {
    if end < start {
        return Err(Error::InvalidData(
            "Ngày kết thúc phải sau ngày bắt đầu".to_string(),
        ));
    }
    validate_period(start.year(), None)?;
    validate_period(end.year(), None)?;

    let own: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.category.id == category_id)
        .collect();
    let own_budgets: Vec<&Budget> = budgets
        .iter()
        .filter(|b| b.is_active && b.category.id == category_id)
        .collect();

    let category = own
        .first()
        .map(|t| &t.category)
        .or_else(|| own_budgets.first().map(|b| &b.category))
        .ok_or_else(|| {
            Error::InvalidData(format!("Không tìm thấy danh mục {}", category_id))
        })?;
    let category_type = own
        .first()
        .map_or(TransactionType::Expense, |t| t.transaction_type);

    let in_range: Vec<&Transaction> = own
        .iter()
        .copied()
        .filter(|t| (start..=end).contains(&t.transaction_date))
        .collect();

    let total_amount: f64 = in_range.iter().map(|t| t.amount).sum();
    let average_transaction = if in_range.is_empty() {
        0.0
    } else {
        round2(total_amount / in_range.len() as f64)
    };
    let amounts = || in_range.iter().map(|t| t.amount);

    let period_summaries: Vec<PeriodSummary> = month_periods(start, end)
        .into_iter()
        .map(|(period_start, period_end)| {
            let (amount, transaction_count) = in_range
                .iter()
                .filter(|t| (period_start..=period_end).contains(&t.transaction_date))
                .fold((0.0, 0), |(sum, n), t| (sum + t.amount, n + 1));
            PeriodSummary {
                period_label: format!("{}-{:02}", period_start.year(), period_start.month()),
                period_start,
                period_end,
                amount,
                transaction_count,
            }
        })
        .collect();

    // (spent, budget) for every month in range with a positive budget
    let budgeted_months: Vec<(f64, f64)> = period_summaries
        .iter()
        .filter_map(|p| {
            own_budgets
                .iter()
                .find(|b| b.applies_to(p.period_start.year(), p.period_start.month()))
                .map(|b| (p.amount, b.budget_amount))
        })
        .filter(|(_, budget)| *budget > 0.0)
        .collect();

    let (budgeted_amount, budget_variance, budget_adherence_rate) = if budgeted_months.is_empty()
    {
        (None, None, None)
    } else {
        let budgeted: f64 = budgeted_months.iter().map(|(_, b)| b).sum();
        let within = budgeted_months
            .iter()
            .filter(|(spent, budget)| spent <= budget)
            .count();
        (
            Some(budgeted),
            Some(total_amount - budgeted),
            Some(percent_of(within as f64, budgeted_months.len() as f64)),
        )
    };

    debug!(
        category_id,
        %start,
        %end,
        transactions = in_range.len(),
        total_amount,
        "Built category report"
    );

    Ok(CategoryReport {
        category_id,
        category_name: category.name.clone(),
        category_color: category.color.clone(),
        category_icon: category.icon.clone(),
        category_type,
        start_date: start,
        end_date: end,
        total_amount,
        transaction_count: in_range.len() as i64,
        average_transaction,
        min_transaction: amounts().reduce(f64::min).unwrap_or(0.0),
        max_transaction: amounts().reduce(f64::max).unwrap_or(0.0),
        period_summaries,
        budgeted_amount,
        budget_variance,
        budget_adherence_rate,
    })
}

impl MonthlyReport {
    /// Scorer input for this month, with adherence taken from the expense breakdown
    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary {
            total_income: self.total_income,
            total_expense: self.total_expense,
            net_savings: self.net_savings,
            savings_rate: self.savings_rate,
            budget: budget_adherence(&self.expense_by_category).into(),
        }
    }
}

impl YearlyReport {
    /// Scorer input for the whole year; yearly reports carry no adherence
    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary {
            total_income: self.total_income,
            total_expense: self.total_expense,
            net_savings: self.net_savings,
            savings_rate: self.savings_rate,
            budget: BudgetInfo::Untracked,
        }
    }
}
