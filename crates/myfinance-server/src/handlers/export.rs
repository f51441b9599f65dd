//! Export handlers
//!
//! Reports download as CSV, or as PDF on the `.pdf` routes.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use myfinance_core::export::{
    category_file_name, category_report_csv, health_result_csv, monthly_file_name,
    monthly_report_csv, transactions_csv, yearly_file_name, yearly_report_csv, HEALTH_FILE_NAME,
    TRANSACTIONS_FILE_NAME,
};
use myfinance_core::pdf::{
    category_report_pdf, monthly_report_pdf, pdf_file_name, yearly_report_pdf,
};
use myfinance_core::{score, FinancialSummary};
use tracing::info;

use super::reports::{
    build_category, build_monthly, build_yearly, CategoryReportRequest, ReportRequest,
    TransactionsRequest,
};
use crate::AppError;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const PDF_CONTENT_TYPE: &str = "application/pdf";

fn attachment(
    file_name: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(body.into())
        .map_err(|e| AppError::internal(&e.to_string()))
}

fn csv_attachment(file_name: &str, csv: String) -> Result<Response, AppError> {
    attachment(file_name, CSV_CONTENT_TYPE, csv)
}

fn pdf_attachment(csv_name: &str, pdf: Vec<u8>) -> Result<Response, AppError> {
    attachment(&pdf_file_name(csv_name), PDF_CONTENT_TYPE, pdf)
}

/// POST /api/export/monthly - Monthly report as CSV
pub async fn export_monthly(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    let report = build_monthly(&request)?;
    info!(year = report.year, month = report.month, "Exported monthly report");
    csv_attachment(
        &monthly_file_name(report.year, report.month),
        monthly_report_csv(&report),
    )
}

/// POST /api/export/monthly.pdf - Monthly report as PDF
pub async fn export_monthly_pdf(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    let report = build_monthly(&request)?;
    let pdf = monthly_report_pdf(&report)?;
    info!(year = report.year, month = report.month, bytes = pdf.len(), "Exported monthly PDF");
    pdf_attachment(&monthly_file_name(report.year, report.month), pdf)
}

/// POST /api/export/yearly - Yearly report as CSV
pub async fn export_yearly(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    let report = build_yearly(&request)?;
    info!(year = report.year, "Exported yearly report");
    csv_attachment(&yearly_file_name(report.year), yearly_report_csv(&report))
}

/// POST /api/export/yearly.pdf - Yearly report as PDF
pub async fn export_yearly_pdf(Json(request): Json<ReportRequest>) -> Result<Response, AppError> {
    let report = build_yearly(&request)?;
    let pdf = yearly_report_pdf(&report)?;
    info!(year = report.year, bytes = pdf.len(), "Exported yearly PDF");
    pdf_attachment(&yearly_file_name(report.year), pdf)
}

/// POST /api/export/category - Category report as CSV
pub async fn export_category(
    Json(request): Json<CategoryReportRequest>,
) -> Result<Response, AppError> {
    let report = build_category(&request)?;
    info!(category_id = report.category_id, "Exported category report");
    csv_attachment(
        &category_file_name(&report.category_name),
        category_report_csv(&report),
    )
}

/// POST /api/export/category.pdf - Category report as PDF
pub async fn export_category_pdf(
    Json(request): Json<CategoryReportRequest>,
) -> Result<Response, AppError> {
    let report = build_category(&request)?;
    let pdf = category_report_pdf(&report)?;
    info!(category_id = report.category_id, bytes = pdf.len(), "Exported category PDF");
    pdf_attachment(&category_file_name(&report.category_name), pdf)
}

/// POST /api/export/health - Health score as CSV
pub async fn export_health(Json(summary): Json<FinancialSummary>) -> Result<Response, AppError> {
    let result = score(&summary);
    csv_attachment(HEALTH_FILE_NAME, health_result_csv(&result))
}

/// POST /api/export/transactions - Transactions as CSV
pub async fn export_transactions(
    Json(request): Json<TransactionsRequest>,
) -> Result<Response, AppError> {
    let csv = transactions_csv(&request.transactions)?;
    info!(
        "Exported {} transactions to CSV",
        request.transactions.len()
    );
    csv_attachment(TRANSACTIONS_FILE_NAME, csv)
}
