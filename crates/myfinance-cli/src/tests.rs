//! CLI command tests
//!
//! Commands read and write real files in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use myfinance_core::export::UTF8_BOM;
use myfinance_core::test_utils::{MockBackendServer, MOCK_PASSWORD, MOCK_TOKEN};
use myfinance_core::Config;
use tempfile::TempDir;

use chrono::NaiveDate;

use crate::cli::{CategoryArgs, FetchType, InputArgs, SummaryArgs};
use crate::commands::{self, truncate};

const TRANSACTIONS: &str = "date,type,category_id,category,amount,note
2024-03-01,INCOME,1,Lương,10000000,
2024-03-04,EXPENSE,2,Nhà ở,4000000,Tiền nhà
2024-03-09,EXPENSE,3,\"Ăn uống, cà phê\",2000000,";

const BUDGETS: &str = "year,month,category_id,category,amount,active
2024,3,2,Nhà ở,5000000,true";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn inputs(dir: &TempDir) -> InputArgs {
    InputArgs {
        transactions: write_file(dir, "transactions.csv", TRANSACTIONS),
        budgets: Some(write_file(dir, "budgets.csv", BUDGETS)),
    }
}

fn summary_args(income: f64, expense: f64) -> SummaryArgs {
    SummaryArgs {
        income,
        expense,
        budget_adherence: None,
        savings_rate: None,
    }
}

fn march(category_id: i64) -> CategoryArgs {
    CategoryArgs {
        category_id,
        from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        to: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Ăn uống ngoài hàng", 10), "Ăn uống...");
}

#[test]
fn test_resolve_year_month_keeps_explicit_values() {
    assert_eq!(commands::resolve_year_month(Some(2024), Some(3)), (2024, 3));

    let (year, month) = commands::resolve_year_month(None, None);
    assert!(year >= 2024);
    assert!((1..=12).contains(&month));
}

#[test]
fn test_summary_from_args() {
    let summary = commands::summary_from_args(&SummaryArgs {
        budget_adherence: Some(80.0),
        ..summary_args(10_000_000.0, 6_000_000.0)
    });
    assert_eq!(summary.net_savings, 4_000_000.0);
    assert_eq!(summary.savings_rate, 40.0);
    assert_eq!(summary.budget.adherence(), Some(80.0));

    let overridden = commands::summary_from_args(&SummaryArgs {
        savings_rate: Some(-5.0),
        ..summary_args(10_000_000.0, 6_000_000.0)
    });
    assert_eq!(overridden.savings_rate, -5.0);
    assert!(!overridden.budget.is_tracked());
}

#[test]
fn test_load_inputs_without_budgets() {
    let dir = TempDir::new().unwrap();
    let input = InputArgs {
        transactions: write_file(&dir, "tx.csv", TRANSACTIONS),
        budgets: None,
    };

    let (transactions, budgets) = commands::load_inputs(&input).unwrap();
    assert_eq!(transactions.len(), 3);
    assert!(budgets.is_empty());
}

#[test]
fn test_load_inputs_missing_file() {
    let dir = TempDir::new().unwrap();
    let input = InputArgs {
        transactions: dir.path().join("missing.csv"),
        budgets: None,
    };

    let err = commands::load_inputs(&input).unwrap_err();
    assert!(err.to_string().contains("Failed to read transactions"));
}

// ========== Score / Report Command Tests ==========

#[test]
fn test_budget_component_follows_breakdown() {
    use myfinance_core::{score, BudgetScore};

    assert_eq!(
        commands::budget_component(BudgetScore::Adherence(20)),
        ("Budget adherence", 20)
    );

    let untracked = score(&commands::summary_from_args(&summary_args(
        10_000_000.0,
        6_000_000.0,
    )));
    assert_eq!(
        commands::budget_component(untracked.breakdown.budget),
        ("No-budget bonus", 20)
    );

    let tracked = score(&commands::summary_from_args(&SummaryArgs {
        budget_adherence: Some(80.0),
        ..summary_args(10_000_000.0, 6_000_000.0)
    }));
    assert_eq!(
        commands::budget_component(tracked.breakdown.budget),
        ("Budget adherence", 20)
    );
}

#[test]
fn test_cmd_score() {
    assert!(commands::cmd_score(&summary_args(10_000_000.0, 6_000_000.0), false).is_ok());
    assert!(commands::cmd_score(&summary_args(0.0, 500_000.0), true).is_ok());
}

#[test]
fn test_cmd_report_monthly() {
    let dir = TempDir::new().unwrap();
    let input = inputs(&dir);

    assert!(commands::cmd_report_monthly(&input, Some(2024), Some(3), false).is_ok());
    assert!(commands::cmd_report_monthly(&input, Some(2024), Some(3), true).is_ok());
}

#[test]
fn test_cmd_report_monthly_invalid_month() {
    let dir = TempDir::new().unwrap();
    let result = commands::cmd_report_monthly(&inputs(&dir), Some(2024), Some(13), false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_report_yearly() {
    let dir = TempDir::new().unwrap();
    assert!(commands::cmd_report_yearly(&inputs(&dir), Some(2024), false).is_ok());
}

#[test]
fn test_cmd_report_category() {
    let dir = TempDir::new().unwrap();
    let input = inputs(&dir);

    assert!(commands::cmd_report_category(&input, &march(3), false).is_ok());
    assert!(commands::cmd_report_category(&input, &march(2), true).is_ok());

    let backwards = CategoryArgs {
        from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        ..march(2)
    };
    assert!(commands::cmd_report_category(&input, &backwards, false).is_err());
}

#[test]
fn test_cmd_patterns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tx.csv", TRANSACTIONS);
    assert!(commands::cmd_patterns(&path, false).is_ok());

    let income_only = write_file(
        &dir,
        "income.csv",
        "date,type,category_id,category,amount,note\n2024-03-01,INCOME,1,Lương,100,",
    );
    assert!(commands::cmd_patterns(&income_only, true).is_ok());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_monthly() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("march.csv");

    let path =
        commands::cmd_export_monthly(&inputs(&dir), Some(2024), Some(3), Some(&output), false)
            .unwrap();
    assert_eq!(path, output);

    let csv = read(&path);
    assert!(csv.starts_with(UTF8_BOM));
    assert!(csv.contains("Nhà ở"));
    // Category names with commas are quoted
    assert!(csv.contains("\"Ăn uống, cà phê\""));
}

#[test]
fn test_cmd_export_yearly() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("2024.csv");

    let path =
        commands::cmd_export_yearly(&inputs(&dir), Some(2024), Some(&output), false).unwrap();
    assert!(read(&path).contains("Tháng 3"));
}

#[test]
fn test_cmd_export_monthly_pdf() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("march.pdf");

    let path =
        commands::cmd_export_monthly(&inputs(&dir), Some(2024), Some(3), Some(&output), true)
            .unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_cmd_export_category() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("housing.csv");

    let path =
        commands::cmd_export_category(&inputs(&dir), &march(2), Some(&output), false).unwrap();
    let csv = read(&path);
    assert!(csv.starts_with(UTF8_BOM));
    assert!(csv.contains("Danh mục,Nhà ở"));
    assert!(csv.contains("Ngân sách,5000000"));
    assert!(csv.contains("2024-03,2024-03-01,2024-03-31,4000000,1"));

    let pdf_output = dir.path().join("housing.pdf");
    let path =
        commands::cmd_export_category(&inputs(&dir), &march(2), Some(&pdf_output), true).unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn test_cmd_export_category_unknown_category() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("none.csv");

    let err =
        commands::cmd_export_category(&inputs(&dir), &march(99), Some(&output), false).unwrap_err();
    assert!(err.to_string().contains("Failed to build category report"));
    assert!(!output.exists());
}

#[test]
fn test_cmd_export_health() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("health.csv");

    let path =
        commands::cmd_export_health(&summary_args(10_000_000.0, 6_000_000.0), Some(&output))
            .unwrap();
    let csv = read(&path);
    assert!(csv.contains("90"));
    assert!(csv.contains("Xuất sắc"));
}

#[test]
fn test_cmd_export_transactions() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "tx.csv", TRANSACTIONS);
    let output = dir.path().join("out.csv");

    let path = commands::cmd_export_transactions(&source, Some(&output)).unwrap();
    let csv = read(&path);
    assert!(csv.starts_with(UTF8_BOM));
    assert!(csv.contains("Tiền nhà"));
}

#[test]
fn test_cmd_export_transactions_empty_fails() {
    let dir = TempDir::new().unwrap();
    let source = write_file(&dir, "empty.csv", "date,type,category_id,category,amount,note\n");
    let output = dir.path().join("out.csv");

    let err = commands::cmd_export_transactions(&source, Some(&output)).unwrap_err();
    assert!(err.to_string().contains("Không có dữ liệu để xuất"));
    assert!(!output.exists());
}

// ========== Fetch Command Tests ==========

fn backend_config(url: &str, token: Option<&str>) -> Config {
    let mut config = Config::default();
    config.backend.base_url = url.to_string();
    config.backend.token = token.map(str::to_string);
    config
}

#[tokio::test]
async fn test_connect_requires_token_or_email() {
    let server = MockBackendServer::start().await;
    let config = backend_config(&server.url(), None);

    let err = commands::connect(&config, None).await.unwrap_err();
    assert!(err.to_string().contains("No backend token"));
}

#[tokio::test]
async fn test_cmd_fetch_with_configured_token() {
    let server = MockBackendServer::start().await;
    let config = backend_config(&server.url(), Some(MOCK_TOKEN));

    let monthly = FetchType::Monthly {
        year: Some(2024),
        month: Some(3),
        json: false,
    };
    assert!(commands::cmd_fetch(&config, None, &monthly).await.is_ok());

    let yearly = FetchType::Yearly {
        year: Some(2024),
        json: true,
    };
    assert!(commands::cmd_fetch(&config, None, &yearly).await.is_ok());
}

#[tokio::test]
async fn test_cmd_fetch_category() {
    let server = MockBackendServer::start().await;
    let config = backend_config(&server.url(), Some(MOCK_TOKEN));

    let category = FetchType::Category {
        range: march(2),
        json: false,
    };
    assert!(commands::cmd_fetch(&config, None, &category).await.is_ok());

    let unknown = FetchType::Category {
        range: march(99),
        json: true,
    };
    assert!(commands::cmd_fetch(&config, None, &unknown).await.is_err());
}

#[tokio::test]
async fn test_cmd_fetch_bad_token() {
    let server = MockBackendServer::start().await;
    let config = backend_config(&server.url(), Some("stale"));

    let monthly = FetchType::Monthly {
        year: Some(2024),
        month: Some(3),
        json: false,
    };
    assert!(commands::cmd_fetch(&config, None, &monthly).await.is_err());
}

#[tokio::test]
async fn test_connect_with_login() {
    let server = MockBackendServer::start().await;
    let config = backend_config(&server.url(), None);

    std::env::set_var(commands::PASSWORD_ENV, MOCK_PASSWORD);
    let client = commands::connect(&config, Some("an@example.com"))
        .await
        .unwrap();
    assert_eq!(client.token(), Some(MOCK_TOKEN));
}
