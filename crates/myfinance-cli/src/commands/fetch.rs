//! Remote backend commands
//!
//! Reports are computed by the backend; the health score is computed
//! locally from the fetched totals.

use anyhow::{bail, Context, Result};
use myfinance_core::{score, BackendClient, Config};
use tracing::info;

use super::{print_health_result, print_json, resolve_year_month};
use super::{print_category_report, print_monthly_report, print_yearly_report, ReportWithHealth};
use crate::cli::FetchType;

pub const PASSWORD_ENV: &str = "MYFINANCE_PASSWORD";

/// Build a client from config, logging in when an email is given
pub async fn connect(config: &Config, email: Option<&str>) -> Result<BackendClient> {
    let mut client =
        BackendClient::from_config(&config.backend).context("Failed to create backend client")?;

    if let Some(email) = email {
        let password = std::env::var(PASSWORD_ENV)
            .with_context(|| format!("{} must be set to log in", PASSWORD_ENV))?;
        client
            .login(email, &password)
            .await
            .context("Backend login failed")?;
    } else if client.token().is_none() {
        bail!(
            "No backend token: pass --email or set MYFINANCE_API_TOKEN ({})",
            client.base_url()
        );
    }

    Ok(client)
}

pub async fn cmd_fetch(config: &Config, email: Option<&str>, fetch_type: &FetchType) -> Result<()> {
    let client = connect(config, email).await?;
    info!(url = %client.base_url(), "Fetching from backend");

    match fetch_type {
        FetchType::Monthly { year, month, json } => {
            let (year, month) = resolve_year_month(*year, *month);
            let report = client
                .monthly_report(year, month)
                .await
                .context("Failed to fetch monthly report")?;
            let health = score(&report.financial_summary());

            if *json {
                return print_json(&ReportWithHealth {
                    report: &report,
                    health: &health,
                });
            }
            print_monthly_report(&report);
            print_health_result(&health);
        }
        FetchType::Yearly { year, json } => {
            let (year, _) = resolve_year_month(*year, None);
            let report = client
                .yearly_report(year)
                .await
                .context("Failed to fetch yearly report")?;
            let health = score(&report.financial_summary());

            if *json {
                return print_json(&ReportWithHealth {
                    report: &report,
                    health: &health,
                });
            }
            print_yearly_report(&report);
            print_health_result(&health);
        }
        FetchType::Category { range, json } => {
            let report = client
                .category_report(range.category_id, range.from, range.to)
                .await
                .context("Failed to fetch category report")?;

            if *json {
                return print_json(&report);
            }
            print_category_report(&report);
        }
    }

    Ok(())
}
