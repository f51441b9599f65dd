//! Report handlers
//!
//! Reports are computed from the transactions and budgets in the request
//! body. Monthly and yearly reports come back together with the health
//! score of the period.

use axum::Json;
use chrono::NaiveDate;
use myfinance_core::{
    analyze_spending_patterns, category_report, monthly_report, score, yearly_report, Budget,
    CategoryReport, HealthResult, MonthlyReport, SpendingPatterns, Transaction, YearlyReport,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppError;

/// Body for monthly and yearly report requests
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    pub year: i32,
    /// Required for monthly reports, ignored for yearly
    pub month: Option<u32>,
}

/// Body for category report requests
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReportRequest {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    pub category_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsRequest {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse<R> {
    pub report: R,
    pub health: HealthResult,
}

/// Build the monthly report described by a request
pub(crate) fn build_monthly(request: &ReportRequest) -> Result<MonthlyReport, AppError> {
    let month = request
        .month
        .ok_or_else(|| AppError::bad_request("month is required"))?;
    Ok(monthly_report(
        &request.transactions,
        &request.budgets,
        request.year,
        month,
    )?)
}

pub(crate) fn build_yearly(request: &ReportRequest) -> Result<YearlyReport, AppError> {
    Ok(yearly_report(
        &request.transactions,
        &request.budgets,
        request.year,
    )?)
}

pub(crate) fn build_category(request: &CategoryReportRequest) -> Result<CategoryReport, AppError> {
    Ok(category_report(
        &request.transactions,
        &request.budgets,
        request.category_id,
        request.start_date,
        request.end_date,
    )?)
}

/// POST /api/reports/monthly - Monthly report with health score
pub async fn create_monthly_report(
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<MonthlyReport>>, AppError> {
    let report = build_monthly(&request)?;
    let health = score(&report.financial_summary());

    info!(
        year = report.year,
        month = report.month,
        transactions = request.transactions.len(),
        score = health.score,
        "Monthly report"
    );

    Ok(Json(ReportResponse { report, health }))
}

/// POST /api/reports/yearly - Yearly report with health score
pub async fn create_yearly_report(
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse<YearlyReport>>, AppError> {
    let report = build_yearly(&request)?;
    let health = score(&report.financial_summary());

    info!(
        year = report.year,
        transactions = request.transactions.len(),
        score = health.score,
        "Yearly report"
    );

    Ok(Json(ReportResponse { report, health }))
}

/// POST /api/reports/category - One category over a date range
pub async fn create_category_report(
    Json(request): Json<CategoryReportRequest>,
) -> Result<Json<CategoryReport>, AppError> {
    let report = build_category(&request)?;

    info!(
        category_id = report.category_id,
        start = %report.start_date,
        end = %report.end_date,
        transactions = report.transaction_count,
        "Category report"
    );

    Ok(Json(report))
}

/// POST /api/reports/patterns - Spending by day of week (null without expenses)
pub async fn create_spending_patterns(
    Json(request): Json<TransactionsRequest>,
) -> Json<Option<SpendingPatterns>> {
    Json(analyze_spending_patterns(&request.transactions))
}
