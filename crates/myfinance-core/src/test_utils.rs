//! Test utilities for myfinance-core
//!
//! Provides sample data and a mock MyFinance backend that speaks the same
//! `{success, message, data}` envelope as the real service.

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::api::{ApiResponse, LoginRequest, LoginResponse};
use crate::models::{
    Budget, Category, CategoryReport, MonthlyReport, Transaction, TransactionType, YearlyReport,
};
use crate::reports::{category_report, monthly_report, yearly_report};

/// Token issued by the mock backend's login endpoint
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// Password the mock backend accepts
pub const MOCK_PASSWORD: &str = "secret";

/// March 2024: 10M salary, 6M of expenses across two categories
pub fn sample_transactions() -> Vec<Transaction> {
    let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    vec![
        Transaction::new(
            TransactionType::Income,
            10_000_000.0,
            Category::new(1, "Lương"),
            d(1),
        ),
        Transaction::new(
            TransactionType::Expense,
            6_000_000.0,
            Category::new(2, "Nhà ở"),
            d(4),
        ),
    ]
}

/// Housing budget for March 2024
pub fn sample_budgets() -> Vec<Budget> {
    vec![Budget::new(Category::new(2, "Nhà ở"), 7_000_000.0, 2024, 3)]
}

pub fn sample_monthly_report() -> MonthlyReport {
    monthly_report(&sample_transactions(), &sample_budgets(), 2024, 3).unwrap()
}

pub fn sample_yearly_report(year: i32) -> YearlyReport {
    yearly_report(&sample_transactions(), &sample_budgets(), year).unwrap()
}

pub fn sample_category_report(
    category_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> CategoryReport {
    category_report(
        &sample_transactions(),
        &sample_budgets(),
        category_id,
        start,
        end,
    )
    .unwrap()
}

/// Mock MyFinance backend for testing
pub struct MockBackendServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackendServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/auth/login", post(handle_login))
            .route("/api/reports/monthly", get(handle_monthly))
            .route("/api/reports/yearly", get(handle_yearly))
            .route("/api/reports/category/:id", get(handle_category))
            .route("/api/transactions", get(handle_transactions))
            .route("/api/budgets/period/:year/:month", get(handle_budgets));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockBackendServer {
    fn drop(&mut self) {
        self.stop();
    }
}

type MockResult<T> = Result<Json<ApiResponse<T>>, StatusCode>;

fn require_token(headers: &HeaderMap) -> Result<(), StatusCode> {
    let expected = format!("Bearer {}", MOCK_TOKEN);
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn handle_login(Json(request): Json<LoginRequest>) -> Json<ApiResponse<LoginResponse>> {
    if request.password != MOCK_PASSWORD {
        return Json(ApiResponse::error("Email hoặc mật khẩu không đúng"));
    }
    Json(ApiResponse::ok(LoginResponse {
        token: MOCK_TOKEN.to_string(),
        token_type: "Bearer".to_string(),
        id: 1,
        email: request.email,
        full_name: Some("Nguyễn Văn An".to_string()),
        expires_in: Some(86_400_000),
    }))
}

#[derive(Deserialize)]
struct PeriodQuery {
    year: i32,
    month: Option<u32>,
}

async fn handle_monthly(
    headers: HeaderMap,
    Query(query): Query<PeriodQuery>,
) -> MockResult<MonthlyReport> {
    require_token(&headers)?;
    match query.month {
        Some(month) if (1..=12).contains(&month) => {
            let report = monthly_report(&sample_transactions(), &sample_budgets(), query.year, month)
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            Ok(Json(ApiResponse::ok(report)))
        }
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn handle_yearly(
    headers: HeaderMap,
    Query(query): Query<PeriodQuery>,
) -> MockResult<YearlyReport> {
    require_token(&headers)?;
    Ok(Json(ApiResponse::ok(sample_yearly_report(query.year))))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

/// Validation errors answer 400 with an error envelope, like the backend
async fn handle_category(
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<RangeQuery>,
) -> Response {
    if let Err(status) = require_token(&headers) {
        return status.into_response();
    }
    match category_report(
        &sample_transactions(),
        &sample_budgets(),
        id,
        query.start_date,
        query.end_date,
    ) {
        Ok(report) => Json(ApiResponse::ok(report)).into_response(),
        Err(crate::Error::InvalidData(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CategoryReport>::error(message)),
        )
            .into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn handle_transactions(headers: HeaderMap) -> MockResult<Vec<Transaction>> {
    require_token(&headers)?;
    Ok(Json(ApiResponse::ok(sample_transactions())))
}

async fn handle_budgets(
    headers: HeaderMap,
    Path((year, month)): Path<(i32, u32)>,
) -> MockResult<Vec<Budget>> {
    require_token(&headers)?;
    let budgets = sample_budgets()
        .into_iter()
        .filter(|b| b.applies_to(year, month))
        .collect();
    Ok(Json(ApiResponse::ok(budgets)))
}
