//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const TEST_API_KEY: &str = "test-api-key";

fn setup_test_app() -> Router {
    create_router(ServerConfig::default())
}

fn setup_auth_app() -> Router {
    create_router(ServerConfig {
        api_keys: vec![TEST_API_KEY.to_string()],
        ..Default::default()
    })
}

async fn get_body_json(response: axum::response::Response) -> Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_bytes(response: axum::response::Response) -> Vec<u8> {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    bytes.to_vec()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// March 2024: 10M salary, 6M rent on Monday the 4th
fn sample_transactions() -> Value {
    json!([
        {
            "id": 1,
            "amount": 10000000,
            "type": "INCOME",
            "category": {"id": 1, "name": "Lương"},
            "transactionDate": "2024-03-01"
        },
        {
            "id": 2,
            "amount": 6000000,
            "type": "EXPENSE",
            "category": {"id": 2, "name": "Nhà ở"},
            "transactionDate": "2024-03-04",
            "description": "Tiền nhà"
        }
    ])
}

fn sample_budgets() -> Value {
    json!([
        {
            "category": {"id": 2, "name": "Nhà ở"},
            "budgetAmount": 7000000,
            "budgetYear": 2024,
            "budgetMonth": 3
        }
    ])
}

fn monthly_body(month: u32) -> Value {
    json!({
        "transactions": sample_transactions(),
        "budgets": sample_budgets(),
        "year": 2024,
        "month": month
    })
}

fn category_body(category_id: i64, start: &str, end: &str) -> Value {
    json!({
        "transactions": sample_transactions(),
        "budgets": sample_budgets(),
        "categoryId": category_id,
        "startDate": start,
        "endDate": end
    })
}

// ========== Status / Health API Tests ==========

#[tokio::test]
async fn test_status() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_score_health() {
    let app = setup_test_app();
    let body = json!({
        "totalIncome": 10000000,
        "totalExpense": 6000000,
        "netSavings": 4000000,
        "savingsRate": 40
    });

    let response = app
        .oneshot(post_json("/api/health/score", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["score"], 90);
    assert_eq!(json["rating"]["tier"], "excellent");
    assert_eq!(json["rating"]["level"], "Xuất sắc");
    assert_eq!(json["breakdown"]["noBudgetBonus"], 20);
    assert!(json["breakdown"].get("budgetAdherenceScore").is_none());
}

#[tokio::test]
async fn test_score_health_overspending_is_critical() {
    let app = setup_test_app();
    let body = json!({
        "totalIncome": 5000000,
        "totalExpense": 6000000,
        "netSavings": -1000000,
        "savingsRate": -20,
        "budgetAdherence": 40
    });

    let response = app
        .oneshot(post_json("/api/health/score", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["breakdown"]["budgetAdherenceScore"], 10);
    let recommendations = json["recommendations"].as_array().unwrap();
    assert!(recommendations.iter().any(|r| r["priority"] == "critical"));
}

#[tokio::test]
async fn test_score_health_rejects_malformed_body() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/health/score", &json!({"totalIncome": "lots"})))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_monthly_report() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/reports/monthly", &monthly_body(3)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;

    let report = &json["report"];
    assert_eq!(report["monthName"], "Tháng 3");
    assert_eq!(report["totalIncome"], 10_000_000.0);
    assert_eq!(report["totalExpense"], 6_000_000.0);
    assert_eq!(report["savingsRate"], 40.0);
    assert_eq!(report["expenseByCategory"][0]["budgetAmount"], 7_000_000.0);

    // 30 + 20 + 20 + 25 (rent within budget)
    assert_eq!(json["health"]["score"], 95);
    assert_eq!(json["health"]["breakdown"]["budgetAdherenceScore"], 25);
}

#[tokio::test]
async fn test_monthly_report_requires_month() {
    let app = setup_test_app();
    let body = json!({"transactions": sample_transactions(), "year": 2024});

    let response = app
        .oneshot(post_json("/api/reports/monthly", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "month is required");
}

#[tokio::test]
async fn test_monthly_report_invalid_month() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/reports/monthly", &monthly_body(13)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_monthly_report_empty_period() {
    let app = setup_test_app();
    let body = json!({"year": 2023, "month": 1});

    let response = app
        .oneshot(post_json("/api/reports/monthly", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["report"]["totalTransactions"], 0);
    assert_eq!(json["health"]["rating"]["tier"], "needs_improvement");
}

#[tokio::test]
async fn test_yearly_report() {
    let app = setup_test_app();
    let body = json!({
        "transactions": sample_transactions(),
        "budgets": sample_budgets(),
        "year": 2024
    });

    let response = app
        .oneshot(post_json("/api/reports/yearly", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["report"]["year"], 2024);
    assert_eq!(json["report"]["monthlyTrends"].as_array().unwrap().len(), 12);
    assert_eq!(json["report"]["bestSavingsMonth"]["month"], 3);
    // Yearly summaries carry no budget adherence
    assert_eq!(json["health"]["breakdown"]["noBudgetBonus"], 20);
    assert_eq!(json["health"]["score"], 90);
}

#[tokio::test]
async fn test_spending_patterns() {
    let app = setup_test_app();
    let body = json!({"transactions": sample_transactions()});

    let response = app
        .oneshot(post_json("/api/reports/patterns", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["peakSpendingDay"], "Thứ hai");
    assert_eq!(json["peakSpendingAmount"], 6_000_000.0);
    assert_eq!(json["byDayOfWeek"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_spending_patterns_without_expenses() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/reports/patterns", &json!({"transactions": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(get_body_json(response).await.is_null());
}

#[tokio::test]
async fn test_category_report() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/reports/category",
            &category_body(2, "2024-02-01", "2024-03-31"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["categoryName"], "Nhà ở");
    assert_eq!(json["categoryType"], "EXPENSE");
    assert_eq!(json["totalAmount"], 6_000_000.0);
    assert_eq!(json["transactionCount"], 1);
    assert_eq!(json["averageTransaction"], 6_000_000.0);
    assert_eq!(json["budgetedAmount"], 7_000_000.0);
    assert_eq!(json["budgetVariance"], -1_000_000.0);
    assert_eq!(json["budgetAdherenceRate"], 100.0);

    let periods = json["periodSummaries"].as_array().unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[0]["periodLabel"], "2024-02");
    assert_eq!(periods[0]["transactionCount"], 0);
    assert_eq!(periods[1]["periodStart"], "2024-03-01");
    assert_eq!(periods[1]["amount"], 6_000_000.0);
}

#[tokio::test]
async fn test_category_report_end_before_start() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/reports/category",
            &category_body(2, "2024-03-31", "2024-03-01"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Ngày kết thúc phải sau ngày bắt đầu");
}

#[tokio::test]
async fn test_category_report_unknown_category() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/reports/category",
            &category_body(42, "2024-03-01", "2024-03-31"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_report_requires_dates() {
    let app = setup_test_app();
    let body = json!({"transactions": sample_transactions(), "categoryId": 2});

    let response = app
        .oneshot(post_json("/api/reports/category", &body))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// ========== Export API Tests ==========

#[tokio::test]
async fn test_export_monthly_csv() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/export/monthly", &monthly_body(3)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bao-cao-thang-3-2024.csv\""
    );

    let csv = get_body_text(response).await;
    assert!(csv.starts_with(myfinance_core::export::UTF8_BOM));
    assert!(csv.contains("CHI TIẾT THEO DANH MỤC"));
    assert!(csv.contains("Nhà ở"));
}

#[tokio::test]
async fn test_export_yearly_csv() {
    let app = setup_test_app();
    let body = json!({"transactions": sample_transactions(), "year": 2024});

    let response = app
        .oneshot(post_json("/api/export/yearly", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bao-cao-nam-2024.csv\""
    );
    assert!(get_body_text(response).await.contains("XU HƯỚNG THEO THÁNG"));
}

#[tokio::test]
async fn test_export_category_csv() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/export/category",
            &category_body(2, "2024-03-01", "2024-03-31"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bao-cao-danh-muc-Nhà-ở.csv\""
    );
    let csv = get_body_text(response).await;
    assert!(csv.contains("XU HƯỚNG THEO THỜI GIAN"));
    assert!(csv.contains("2024-03,2024-03-01,2024-03-31,6000000,1"));
}

#[tokio::test]
async fn test_export_monthly_pdf() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/export/monthly.pdf", &monthly_body(3)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bao-cao-thang-3-2024.pdf\""
    );
    assert!(get_body_bytes(response).await.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_yearly_and_category_pdf() {
    let app = setup_test_app();
    let yearly = json!({"transactions": sample_transactions(), "year": 2024});

    let response = app
        .clone()
        .oneshot(post_json("/api/export/yearly.pdf", &yearly))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bao-cao-nam-2024.pdf\""
    );
    assert!(get_body_bytes(response).await.starts_with(b"%PDF-"));

    let response = app
        .oneshot(post_json(
            "/api/export/category.pdf",
            &category_body(1, "2024-01-01", "2024-12-31"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(get_body_bytes(response).await.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_export_pdf_rejects_invalid_month() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/export/monthly.pdf", &monthly_body(13)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_health_csv() {
    let app = setup_test_app();
    let body = json!({"totalIncome": 10000000, "totalExpense": 6000000, "netSavings": 4000000, "savingsRate": 40});

    let response = app
        .oneshot(post_json("/api/export/health", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let csv = get_body_text(response).await;
    assert!(csv.contains("KHUYẾN NGHỊ"));
    assert!(csv.contains("Xuất sắc"));
}

#[tokio::test]
async fn test_export_transactions_csv() {
    let app = setup_test_app();
    let body = json!({"transactions": sample_transactions()});

    let response = app
        .oneshot(post_json("/api/export/transactions", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let csv = get_body_text(response).await;
    assert!(csv.contains("Tiền nhà"));
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_export_transactions_empty_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/export/transactions", &json!({"transactions": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Không có dữ liệu để xuất");
}

// ========== Auth / Middleware Tests ==========

#[tokio::test]
async fn test_auth_required() {
    let app = setup_auth_app();

    let response = app
        .oneshot(post_json("/api/reports/patterns", &json!({"transactions": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_auth_with_api_key() {
    let app = setup_auth_app();
    let mut request = post_json("/api/reports/patterns", &json!({"transactions": []}));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", TEST_API_KEY)).unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_with_wrong_api_key() {
    let app = setup_auth_app();
    let mut request = post_json("/api/reports/patterns", &json!({"transactions": []}));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer test-api-kez"),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_is_public() {
    let app = setup_auth_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["alpha".to_string(), "beta-key".to_string()];
    assert!(validate_api_key("alpha", &keys));
    assert!(validate_api_key("beta-key", &keys));
    assert!(!validate_api_key("alph", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("alpha", &[]));
}

#[test]
fn test_server_config_from_settings() {
    let settings = ServerSettings {
        api_keys: vec!["k".to_string()],
        allowed_origins: vec!["http://localhost:5173".to_string()],
        ..Default::default()
    };
    let config = ServerConfig::from_settings(&settings);
    assert!(config.require_auth());
    assert_eq!(config.allowed_origins, settings.allowed_origins);

    assert!(!ServerConfig::default().require_auth());
}

#[test]
fn test_core_errors_map_to_status() {
    let bad: AppError = myfinance_core::Error::InvalidData("nope".into()).into();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let internal: AppError = myfinance_core::Error::Unauthorized.into();
    assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
