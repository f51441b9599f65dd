//! Domain models for MyFinance
//!
//! These types mirror the wire format of the MyFinance backend (camelCase JSON),
//! so the same structs are used for backend responses, CSV imports and the
//! local API server.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or draws from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Vietnamese display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Thu nhập",
            Self::Expense => "Chi tiêu",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "thu" | "thu nhập" => Ok(Self::Income),
            "expense" | "chi" | "chi tiêu" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            icon: None,
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Always positive; direction comes from `transaction_type`
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
    pub transaction_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        category: Category,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            amount,
            transaction_type,
            category,
            transaction_date,
            description: None,
        }
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub category: Category,
    pub budget_amount: f64,
    pub budget_year: i32,
    pub budget_month: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Budget {
    pub fn new(category: Category, budget_amount: f64, year: i32, month: u32) -> Self {
        Self {
            id: None,
            category,
            budget_amount,
            budget_year: year,
            budget_month: month,
            is_active: true,
        }
    }

    /// Whether this budget applies to the given period
    pub fn applies_to(&self, year: i32, month: u32) -> bool {
        self.is_active && self.budget_year == year && self.budget_month == month
    }
}

// ========== Report Models ==========

/// Per-category totals within a report, with optional budget comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    pub amount: f64,
    pub transaction_count: i64,
    /// Share of the report total, in percent
    pub percentage: f64,
    #[serde(default)]
    pub budget_amount: Option<f64>,
    /// amount - budget
    #[serde(default)]
    pub budget_difference: Option<f64>,
    /// amount / budget * 100
    #[serde(default)]
    pub budget_usage_percent: Option<f64>,
}

impl CategorySummary {
    pub fn has_budget(&self) -> bool {
        self.budget_amount.is_some_and(|b| b > 0.0)
    }

    pub fn within_budget(&self) -> bool {
        self.budget_usage_percent.is_some_and(|p| p <= 100.0)
    }
}

/// Monthly financial summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,

    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
    /// Percentage
    pub savings_rate: f64,

    pub previous_month_income: f64,
    pub previous_month_expense: f64,
    pub income_change_percent: f64,
    pub expense_change_percent: f64,

    #[serde(default)]
    pub income_by_category: Vec<CategorySummary>,
    #[serde(default)]
    pub expense_by_category: Vec<CategorySummary>,
    #[serde(default)]
    pub top_expense_categories: Vec<CategorySummary>,
    #[serde(default)]
    pub top_income_categories: Vec<CategorySummary>,

    pub total_transactions: i64,
    pub average_transaction: f64,
    pub largest_expense: f64,
    pub largest_income: f64,
}

/// One month inside a yearly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: u32,
    pub month_name: String,
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
    pub savings_rate: f64,
}

/// Yearly financial overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    pub year: i32,

    pub total_income: f64,
    pub total_expense: f64,
    pub net_savings: f64,
    pub savings_rate: f64,

    pub previous_year_income: f64,
    pub previous_year_expense: f64,
    pub income_change_percent: f64,
    pub expense_change_percent: f64,

    #[serde(default)]
    pub monthly_trends: Vec<MonthlyTrend>,
    #[serde(default)]
    pub best_savings_month: Option<MonthlyTrend>,
    #[serde(default)]
    pub worst_savings_month: Option<MonthlyTrend>,
    #[serde(default)]
    pub highest_income_month: Option<MonthlyTrend>,
    #[serde(default)]
    pub highest_expense_month: Option<MonthlyTrend>,

    #[serde(default)]
    pub yearly_income_by_category: Vec<CategorySummary>,
    #[serde(default)]
    pub yearly_expense_by_category: Vec<CategorySummary>,
    #[serde(default)]
    pub top_expense_categories: Vec<CategorySummary>,
    #[serde(default)]
    pub top_income_categories: Vec<CategorySummary>,

    pub total_transactions: i64,
    pub average_monthly_income: f64,
    pub average_monthly_expense: f64,
}

/// One calendar month inside a category report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// `YYYY-MM`
    pub period_label: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub amount: f64,
    pub transaction_count: i64,
}

/// Activity of a single category over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    pub category_type: TransactionType,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub total_amount: f64,
    pub transaction_count: i64,
    pub average_transaction: f64,
    pub min_transaction: f64,
    pub max_transaction: f64,

    #[serde(default)]
    pub period_summaries: Vec<PeriodSummary>,

    /// Sum of the category's budgets for the months in range
    #[serde(default)]
    pub budgeted_amount: Option<f64>,
    /// total - budgeted
    #[serde(default)]
    pub budget_variance: Option<f64>,
    /// Percentage of budgeted months that stayed within budget
    #[serde(default)]
    pub budget_adherence_rate: Option<f64>,
}

/// Spending aggregated for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySpending {
    pub day: String,
    pub count: i64,
    pub total: f64,
}

/// Spending grouped by day of week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPatterns {
    pub by_day_of_week: Vec<DaySpending>,
    pub peak_spending_day: Option<String>,
    pub peak_spending_amount: f64,
}
