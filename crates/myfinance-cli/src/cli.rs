//! CLI argument definitions using clap

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "myfinance")]
#[command(about = "Personal finance reports and financial health scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/myfinance/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Transaction and budget CSV inputs
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Transactions CSV (date,type,category_id,category,amount,note)
    #[arg(short, long)]
    pub transactions: PathBuf,

    /// Budgets CSV (year,month,category_id,category,amount,active)
    #[arg(short, long)]
    pub budgets: Option<PathBuf>,
}

/// Category and date range for a category report
#[derive(Args, Debug, Clone)]
pub struct CategoryArgs {
    /// Category id
    #[arg(short, long)]
    pub category_id: i64,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

/// Figures for a one-off health score
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Total income for the period
    #[arg(long)]
    pub income: f64,

    /// Total expense for the period
    #[arg(long)]
    pub expense: f64,

    /// Budget adherence percentage (omit when no budgets are tracked)
    #[arg(long)]
    pub budget_adherence: Option<f64>,

    /// Override the savings rate derived from income and expense
    #[arg(long, allow_hyphen_values = true)]
    pub savings_rate: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score financial health from income and expense totals
    Score {
        #[command(flatten)]
        summary: SummaryArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build monthly, yearly or category reports from CSV files
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Show spending by day of week
    Patterns {
        /// Transactions CSV
        #[arg(short, long)]
        transactions: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export reports (CSV or PDF), health results or transactions
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },

    /// Fetch reports from the MyFinance backend
    Fetch {
        /// Log in with this email (password from MYFINANCE_PASSWORD)
        #[arg(long)]
        email: Option<String>,

        #[command(subcommand)]
        fetch_type: FetchType,
    },

    /// Start the REST API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and category breakdown for one month
    Monthly {
        #[command(flatten)]
        input: InputArgs,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly trends and category totals for one year
    Yearly {
        #[command(flatten)]
        input: InputArgs,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Totals, month-by-month activity and budget comparison for one category
    Category {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        range: CategoryArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export a monthly report
    Monthly {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<u32>,

        /// Output file (defaults to bao-cao-thang-{month}-{year}.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a PDF instead of CSV
        #[arg(long)]
        pdf: bool,
    },

    /// Export a yearly report
    Yearly {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long)]
        year: Option<i32>,

        /// Output file (defaults to bao-cao-nam-{year}.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a PDF instead of CSV
        #[arg(long)]
        pdf: bool,
    },

    /// Export a category report
    Category {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        range: CategoryArgs,

        /// Output file (defaults to bao-cao-danh-muc-{name}.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a PDF instead of CSV
        #[arg(long)]
        pdf: bool,
    },

    /// Export a health score with its recommendations
    Health {
        #[command(flatten)]
        summary: SummaryArgs,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-export transactions in a spreadsheet-friendly layout
    Transactions {
        /// Transactions CSV
        #[arg(short, long)]
        transactions: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FetchType {
    /// Fetch the backend's monthly report and score it
    Monthly {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the backend's yearly report and score it
    Yearly {
        #[arg(short, long)]
        year: Option<i32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the backend's report for one category
    Category {
        #[command(flatten)]
        range: CategoryArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
