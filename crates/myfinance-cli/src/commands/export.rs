//! Export commands
//!
//! Each command writes to `--output` or to the default file name in the
//! current directory, and returns the path written. Reports are CSV unless
//! `--pdf` is given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use myfinance_core::export::{
    category_file_name, category_report_csv, health_result_csv, monthly_file_name,
    monthly_report_csv, transactions_csv, yearly_file_name, yearly_report_csv, HEALTH_FILE_NAME,
    TRANSACTIONS_FILE_NAME,
};
use myfinance_core::import::read_transactions_file;
use myfinance_core::pdf::{
    category_report_pdf, monthly_report_pdf, pdf_file_name, yearly_report_pdf,
};
use myfinance_core::{category_report, monthly_report, score, yearly_report};

use super::{load_inputs, resolve_year_month, summary_from_args, write_output};
use crate::cli::{CategoryArgs, InputArgs, SummaryArgs};

fn output_path(output: Option<&Path>, default_name: String) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_name))
}

/// Default file name for a report, switched to `.pdf` when needed
fn report_file_name(csv_name: String, pdf: bool) -> String {
    if pdf {
        pdf_file_name(&csv_name)
    } else {
        csv_name
    }
}

pub fn cmd_export_monthly(
    input: &InputArgs,
    year: Option<i32>,
    month: Option<u32>,
    output: Option<&Path>,
    pdf: bool,
) -> Result<PathBuf> {
    let (transactions, budgets) = load_inputs(input)?;
    let (year, month) = resolve_year_month(year, month);

    let report = monthly_report(&transactions, &budgets, year, month)
        .context("Failed to build monthly report")?;

    let path = output_path(output, report_file_name(monthly_file_name(year, month), pdf));
    if pdf {
        write_output(&path, monthly_report_pdf(&report)?)?;
    } else {
        write_output(&path, monthly_report_csv(&report))?;
    }
    Ok(path)
}

pub fn cmd_export_yearly(
    input: &InputArgs,
    year: Option<i32>,
    output: Option<&Path>,
    pdf: bool,
) -> Result<PathBuf> {
    let (transactions, budgets) = load_inputs(input)?;
    let (year, _) = resolve_year_month(year, None);

    let report =
        yearly_report(&transactions, &budgets, year).context("Failed to build yearly report")?;

    let path = output_path(output, report_file_name(yearly_file_name(year), pdf));
    if pdf {
        write_output(&path, yearly_report_pdf(&report)?)?;
    } else {
        write_output(&path, yearly_report_csv(&report))?;
    }
    Ok(path)
}

pub fn cmd_export_category(
    input: &InputArgs,
    range: &CategoryArgs,
    output: Option<&Path>,
    pdf: bool,
) -> Result<PathBuf> {
    let (transactions, budgets) = load_inputs(input)?;

    let report = category_report(
        &transactions,
        &budgets,
        range.category_id,
        range.from,
        range.to,
    )
    .context("Failed to build category report")?;

    let path = output_path(
        output,
        report_file_name(category_file_name(&report.category_name), pdf),
    );
    if pdf {
        write_output(&path, category_report_pdf(&report)?)?;
    } else {
        write_output(&path, category_report_csv(&report))?;
    }
    Ok(path)
}

pub fn cmd_export_health(args: &SummaryArgs, output: Option<&Path>) -> Result<PathBuf> {
    let result = score(&summary_from_args(args));

    let path = output_path(output, HEALTH_FILE_NAME.to_string());
    write_output(&path, health_result_csv(&result))?;
    Ok(path)
}

pub fn cmd_export_transactions(transactions_path: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let transactions = read_transactions_file(transactions_path).with_context(|| {
        format!(
            "Failed to read transactions from {}",
            transactions_path.display()
        )
    })?;
    let csv = transactions_csv(&transactions)?;

    let path = output_path(output, TRANSACTIONS_FILE_NAME.to_string());
    write_output(&path, csv)?;
    Ok(path)
}
