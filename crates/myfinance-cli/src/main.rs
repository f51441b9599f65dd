//! MyFinance CLI - Personal finance reports and health scoring
//!
//! Usage:
//!   myfinance score --income 10000000 --expense 6000000    Score financial health
//!   myfinance report monthly -t tx.csv -y 2024 -m 3         Monthly report
//!   myfinance report category -t tx.csv -c 2 --from 2024-01-01 --to 2024-06-30
//!                                                            One category over time
//!   myfinance export yearly -t tx.csv -y 2024 --pdf          Yearly report as PDF
//!   myfinance fetch monthly --email me@example.com           Report from the backend
//!   myfinance serve --port 3000                              Start the API server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use myfinance_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Score { summary, json } => commands::cmd_score(&summary, json),
        Commands::Report { report_type } => match report_type {
            ReportType::Monthly {
                input,
                year,
                month,
                json,
            } => commands::cmd_report_monthly(&input, year, month, json),
            ReportType::Yearly { input, year, json } => {
                commands::cmd_report_yearly(&input, year, json)
            }
            ReportType::Category { input, range, json } => {
                commands::cmd_report_category(&input, &range, json)
            }
        },
        Commands::Patterns { transactions, json } => commands::cmd_patterns(&transactions, json),
        Commands::Export { export_type } => {
            let path = match export_type {
                ExportType::Monthly {
                    input,
                    year,
                    month,
                    output,
                    pdf,
                } => commands::cmd_export_monthly(&input, year, month, output.as_deref(), pdf)?,
                ExportType::Yearly {
                    input,
                    year,
                    output,
                    pdf,
                } => commands::cmd_export_yearly(&input, year, output.as_deref(), pdf)?,
                ExportType::Category {
                    input,
                    range,
                    output,
                    pdf,
                } => commands::cmd_export_category(&input, &range, output.as_deref(), pdf)?,
                ExportType::Health { summary, output } => {
                    commands::cmd_export_health(&summary, output.as_deref())?
                }
                ExportType::Transactions {
                    transactions,
                    output,
                } => commands::cmd_export_transactions(&transactions, output.as_deref())?,
            };
            println!("✅ Exported to {}", path.display());
            Ok(())
        }
        Commands::Fetch { email, fetch_type } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::cmd_fetch(&config, email.as_deref(), &fetch_type).await
        }
        Commands::Serve { host, port } => {
            let config = Config::load(cli.config.as_deref())?;
            commands::cmd_serve(&config, host.as_deref(), port).await
        }
    }
}
