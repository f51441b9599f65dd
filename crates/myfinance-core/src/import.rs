//! CSV import for transactions and budgets
//!
//! Transactions: `date,type,category_id,category,amount,note`
//! Budgets:      `year,month,category_id,category,amount[,active]`
//!
//! Columns are read by position; the header row is skipped. Dates may be
//! `YYYY-MM-DD` or `DD/MM/YYYY`, amounts may use VND formatting
//! (`1.500.000 ₫`).

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use tracing::debug;

use crate::currency::{self, VND_SYMBOL};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, Transaction, TransactionType};
use crate::reports::validate_period;

/// `1.500.000` or `1,500,000`: thousands grouping without decimals
fn grouped_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d{1,3}([.,]\d{3})+$").expect("valid regex"))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn field<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Import(format!("line {}: missing {}", line_of(record), name)))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%d/%m/%Y", // 15/01/2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse a non-negative amount, accepting plain numbers and VND formatting
fn parse_amount(s: &str) -> Result<f64> {
    let s = s.trim();
    let has_digit = s.chars().any(|c| c.is_ascii_digit());

    let amount = if has_digit && (s.contains(VND_SYMBOL) || grouped_integer().is_match(s)) {
        Some(currency::parse_vnd(s))
    } else {
        s.replace(' ', "").parse::<f64>().ok()
    };

    match amount {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(a),
        Some(_) => Err(Error::Import(format!("Amount must be non-negative: {}", s))),
        None => Err(Error::Import(format!("Unable to parse amount: {}", s))),
    }
}

fn parse_active(s: Option<&str>) -> Result<bool> {
    match s.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") => Ok(true),
        Some("true" | "1" | "yes" | "y") => Ok(true),
        Some("false" | "0" | "no" | "n") => Ok(false),
        Some(other) => Err(Error::Import(format!("Invalid active flag: {}", other))),
    }
}

/// Prefix a row-level error with the line it came from
fn at_line(record: &StringRecord, err: Error) -> Error {
    match err {
        Error::Import(msg) if !msg.starts_with("line ") => {
            Error::Import(format!("line {}: {}", line_of(record), msg))
        }
        Error::InvalidData(msg) => Error::Import(format!("line {}: {}", line_of(record), msg)),
        other => other,
    }
}

fn parse_transaction_record(record: &StringRecord) -> Result<Transaction> {
    let date = parse_date(field(record, 0, "date")?)?;
    let transaction_type: TransactionType = field(record, 1, "type")?
        .parse()
        .map_err(Error::Import)?;
    let category_id: i64 = field(record, 2, "category_id")?
        .parse()
        .map_err(|_| Error::Import("category_id must be an integer".into()))?;
    let category_name = field(record, 3, "category")?;
    let amount = parse_amount(field(record, 4, "amount")?)?;
    let note = record
        .get(5)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut tx = Transaction::new(
        transaction_type,
        amount,
        Category::new(category_id, category_name),
        date,
    );
    tx.description = note;
    Ok(tx)
}

fn parse_budget_record(record: &StringRecord) -> Result<Budget> {
    let year: i32 = field(record, 0, "year")?
        .parse()
        .map_err(|_| Error::Import("year must be an integer".into()))?;
    let month: u32 = field(record, 1, "month")?
        .parse()
        .map_err(|_| Error::Import("month must be an integer".into()))?;
    validate_period(year, Some(month))?;

    let category_id: i64 = field(record, 2, "category_id")?
        .parse()
        .map_err(|_| Error::Import("category_id must be an integer".into()))?;
    let category_name = field(record, 3, "category")?;
    let amount = parse_amount(field(record, 4, "amount")?)?;

    let mut budget = Budget::new(Category::new(category_id, category_name), amount, year, month);
    budget.is_active = parse_active(record.get(5))?;
    Ok(budget)
}

/// Parse a transactions CSV
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let tx = parse_transaction_record(&record).map_err(|e| at_line(&record, e))?;
        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Parsed transactions CSV");
    Ok(transactions)
}

/// Parse a budgets CSV
pub fn parse_budgets<R: Read>(reader: R) -> Result<Vec<Budget>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut budgets = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let budget = parse_budget_record(&record).map_err(|e| at_line(&record, e))?;
        budgets.push(budget);
    }

    debug!(count = budgets.len(), "Parsed budgets CSV");
    Ok(budgets)
}

pub fn read_transactions_file(path: &Path) -> Result<Vec<Transaction>> {
    parse_transactions(File::open(path)?)
}

pub fn read_budgets_file(path: &Path) -> Result<Vec<Budget>> {
    parse_budgets(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("15/01/2024").unwrap(), expected);
        assert!(parse_date("Jan 15").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500000").unwrap(), 1_500_000.0);
        assert_eq!(parse_amount("1.500.000 ₫").unwrap(), 1_500_000.0);
        assert_eq!(parse_amount("1.500.000").unwrap(), 1_500_000.0);
        assert_eq!(parse_amount("2,000").unwrap(), 2_000.0);
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert!(parse_amount("-100").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("₫").is_err());
    }

    #[test]
    fn test_parse_transactions() {
        let csv = "date,type,category_id,category,amount,note
2024-03-01,INCOME,1,Lương,10000000,Lương tháng 3
02/03/2024,expense,3,Nhà ở,\"4.000.000 ₫\",
2024-03-10,Chi tiêu,2,Ăn uống,1500000";

        let txs = parse_transactions(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 3);
        assert!(txs[0].is_income());
        assert_eq!(txs[0].description.as_deref(), Some("Lương tháng 3"));
        assert_eq!(txs[1].amount, 4_000_000.0);
        assert_eq!(
            txs[1].transaction_date,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
        assert_eq!(txs[1].description, None);
        assert!(txs[2].is_expense());
        assert_eq!(txs[2].category.name, "Ăn uống");
    }

    #[test]
    fn test_parse_transactions_reports_line() {
        let csv = "date,type,category_id,category,amount,note
2024-03-01,INCOME,1,Lương,100,
2024-03-02,TRANSFER,1,Lương,100,";

        let err = parse_transactions(csv.as_bytes()).unwrap_err();
        match err {
            Error::Import(msg) => {
                assert!(msg.starts_with("line 3:"), "got {}", msg);
                assert!(msg.contains("TRANSFER"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_field() {
        let csv = "date,type,category_id,category,amount\n2024-03-01,INCOME,1,,100";
        let err = parse_transactions(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2: missing category"));
    }

    #[test]
    fn test_parse_budgets() {
        let csv = "year,month,category_id,category,amount,active
2024,3,2,Ăn uống,2000000
2024,3,3,Nhà ở,\"5.000.000 ₫\",false";

        let budgets = parse_budgets(csv.as_bytes()).unwrap();
        assert_eq!(budgets.len(), 2);
        assert!(budgets[0].is_active);
        assert!(budgets[0].applies_to(2024, 3));
        assert_eq!(budgets[1].budget_amount, 5_000_000.0);
        assert!(!budgets[1].is_active);
    }

    #[test]
    fn test_budget_bad_month() {
        let csv = "year,month,category_id,category,amount\n2024,13,2,Ăn uống,100";
        let err = parse_budgets(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Import(ref m) if m.starts_with("line 2:")));
    }

    #[test]
    fn test_read_transactions_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.csv");
        std::fs::write(
            &path,
            "date,type,category_id,category,amount,note\n2024-01-05,EXPENSE,2,Ăn uống,50000,\n",
        )
        .unwrap();

        let txs = read_transactions_file(&path).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, 50_000.0);
    }
}
