//! MyFinance Core Library
//!
//! Shared functionality for the MyFinance personal finance tool:
//! - Financial health scoring (score, rating, recommendations)
//! - Monthly, yearly and per-category report aggregation
//! - Day-of-week spending patterns
//! - CSV import of transactions and budgets, CSV and PDF export of reports
//! - Vietnamese Dong formatting
//! - Layered TOML configuration
//! - Async client for the MyFinance backend REST API

pub mod api;
pub mod config;
pub mod currency;
pub mod error;
pub mod export;
pub mod health;
pub mod import;
pub mod models;
pub mod patterns;
pub mod pdf;
pub mod reports;

/// Test utilities including a mock backend server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::{ApiResponse, BackendClient, LoginResponse};
pub use config::{BackendConfig, Config, ServerSettings};
pub use error::{Error, Result};
pub use health::{
    score, BudgetInfo, BudgetScore, FinancialSummary, HealthRating, HealthResult, Priority,
    Rating, Recommendation, ScoreBreakdown,
};
pub use models::*;
pub use patterns::analyze_spending_patterns;
pub use reports::{category_report, monthly_report, yearly_report};
