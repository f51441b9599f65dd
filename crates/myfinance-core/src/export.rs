//! CSV export for reports, health results and transactions
//!
//! Output starts with a UTF-8 BOM so spreadsheet apps pick up the
//! Vietnamese labels correctly.

use crate::error::{Error, Result};
use crate::health::{BudgetScore, HealthResult};
use crate::models::{CategoryReport, CategorySummary, MonthlyReport, Transaction, YearlyReport};

pub const UTF8_BOM: &str = "\u{FEFF}";

pub const EMPTY_EXPORT: &str = "Không có dữ liệu để xuất";

const SUMMARY_HEADER: [&str; 2] = ["Mục", "Giá trị"];
const CATEGORY_HEADER: [&str; 5] = ["Loại", "Danh mục", "Số tiền", "Số giao dịch", "Phần trăm (%)"];
const TREND_HEADER: [&str; 5] = ["Tháng", "Thu nhập", "Chi tiêu", "Tiết kiệm", "Tỷ lệ tiết kiệm (%)"];
const PERIOD_HEADER: [&str; 5] = ["Khoảng thời gian", "Từ ngày", "Đến ngày", "Số tiền", "Số giao dịch"];
const TRANSACTION_HEADER: [&str; 6] = ["Ngày", "Loại", "Mã danh mục", "Danh mục", "Số tiền", "Ghi chú"];

/// `bao-cao-thang-{month}-{year}.csv`
pub fn monthly_file_name(year: i32, month: u32) -> String {
    format!("bao-cao-thang-{}-{}.csv", month, year)
}

/// `bao-cao-nam-{year}.csv`
pub fn yearly_file_name(year: i32) -> String {
    format!("bao-cao-nam-{}.csv", year)
}

/// `bao-cao-danh-muc-{name}.csv`, whitespace runs in the name become `-`
pub fn category_file_name(category_name: &str) -> String {
    let slug: Vec<&str> = category_name.split_whitespace().collect();
    format!("bao-cao-danh-muc-{}.csv", slug.join("-"))
}

pub const HEALTH_FILE_NAME: &str = "suc-khoe-tai-chinh.csv";

pub const TRANSACTIONS_FILE_NAME: &str = "giao-dich.csv";

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Whole amounts print without decimals
fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn pct(value: f64) -> String {
    format!("{:.2}", value)
}

/// Line-oriented CSV document
struct Sheet {
    out: String,
}

impl Sheet {
    fn new() -> Self {
        Self {
            out: String::from(UTF8_BOM),
        }
    }

    fn row<S: AsRef<str>>(&mut self, fields: &[S]) -> &mut Self {
        let line: Vec<String> = fields
            .iter()
            .map(|f| escape_csv_field(f.as_ref()))
            .collect();
        self.out.push_str(&line.join(","));
        self.out.push('\n');
        self
    }

    fn pair(&mut self, label: &str, value: impl ToString) -> &mut Self {
        self.row(&[label.to_string(), value.to_string()])
    }

    fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    fn categories(&mut self, label: &str, summaries: &[CategorySummary]) -> &mut Self {
        for cat in summaries {
            self.row(&[
                label.to_string(),
                cat.category_name.clone(),
                amount(cat.amount),
                cat.transaction_count.to_string(),
                pct(cat.percentage),
            ]);
        }
        self
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Monthly report: summary rows, then per-category detail
pub fn monthly_report_csv(report: &MonthlyReport) -> String {
    let mut sheet = Sheet::new();
    sheet
        .row(&SUMMARY_HEADER)
        .pair("Tháng/Năm", format!("{}/{}", report.month, report.year))
        .pair("Tổng thu nhập", amount(report.total_income))
        .pair("Tổng chi tiêu", amount(report.total_expense))
        .pair("Tiết kiệm ròng", amount(report.net_savings))
        .pair("Tỷ lệ tiết kiệm (%)", pct(report.savings_rate))
        .pair("Tổng giao dịch", report.total_transactions)
        .pair("Trung bình/giao dịch", amount(report.average_transaction))
        .pair("Chi tiêu lớn nhất", amount(report.largest_expense))
        .pair("Thu nhập lớn nhất", amount(report.largest_income))
        .blank()
        .row(&["CHI TIẾT THEO DANH MỤC"])
        .row(&CATEGORY_HEADER)
        .categories("Chi tiêu", &report.expense_by_category)
        .categories("Thu nhập", &report.income_by_category);
    sheet.finish()
}

/// Yearly report: summary, monthly trend table, per-category detail
pub fn yearly_report_csv(report: &YearlyReport) -> String {
    let mut sheet = Sheet::new();
    sheet
        .row(&SUMMARY_HEADER)
        .pair("Năm", report.year)
        .pair("Tổng thu nhập", amount(report.total_income))
        .pair("Tổng chi tiêu", amount(report.total_expense))
        .pair("Tiết kiệm ròng", amount(report.net_savings))
        .pair("Tỷ lệ tiết kiệm (%)", pct(report.savings_rate))
        .pair("Tổng giao dịch", report.total_transactions)
        .pair("TB thu nhập/tháng", amount(report.average_monthly_income))
        .pair("TB chi tiêu/tháng", amount(report.average_monthly_expense))
        .blank()
        .row(&["XU HƯỚNG THEO THÁNG"])
        .row(&TREND_HEADER);

    for trend in &report.monthly_trends {
        sheet.row(&[
            trend.month_name.clone(),
            amount(trend.income),
            amount(trend.expense),
            amount(trend.savings),
            pct(trend.savings_rate),
        ]);
    }

    sheet
        .blank()
        .row(&["CHI TIẾT THEO DANH MỤC"])
        .row(&CATEGORY_HEADER)
        .categories("Chi tiêu", &report.yearly_expense_by_category)
        .categories("Thu nhập", &report.yearly_income_by_category);
    sheet.finish()
}

/// Category report: summary rows, budget comparison, then one row per month
pub fn category_report_csv(report: &CategoryReport) -> String {
    let mut sheet = Sheet::new();
    sheet
        .row(&SUMMARY_HEADER)
        .pair("Danh mục", &report.category_name)
        .pair("Loại", report.category_type.label())
        .pair("Từ ngày", report.start_date)
        .pair("Đến ngày", report.end_date)
        .pair("Tổng số tiền", amount(report.total_amount))
        .pair("Số giao dịch", report.transaction_count)
        .pair("Trung bình/giao dịch", amount(report.average_transaction))
        .pair("Giá trị nhỏ nhất", amount(report.min_transaction))
        .pair("Giá trị lớn nhất", amount(report.max_transaction));

    if let (Some(budgeted), Some(variance), Some(rate)) = (
        report.budgeted_amount,
        report.budget_variance,
        report.budget_adherence_rate,
    ) {
        sheet
            .pair("Ngân sách", amount(budgeted))
            .pair("Chênh lệch ngân sách", amount(variance))
            .pair("Tỷ lệ tuân thủ ngân sách (%)", pct(rate));
    }

    sheet
        .blank()
        .row(&["XU HƯỚNG THEO THỜI GIAN"])
        .row(&PERIOD_HEADER);
    for period in &report.period_summaries {
        sheet.row(&[
            period.period_label.clone(),
            period.period_start.to_string(),
            period.period_end.to_string(),
            amount(period.amount),
            period.transaction_count.to_string(),
        ]);
    }
    sheet.finish()
}

/// Health score, breakdown and recommendations
pub fn health_result_csv(result: &HealthResult) -> String {
    let b = &result.breakdown;
    let mut sheet = Sheet::new();
    sheet
        .row(&SUMMARY_HEADER)
        .pair("Điểm sức khỏe tài chính", result.score)
        .pair("Xếp hạng", &result.rating.level)
        .pair("Điểm tỷ lệ tiết kiệm", b.savings_rate_score)
        .pair("Điểm tỷ lệ chi tiêu", b.expense_ratio_score)
        .pair("Điểm tiết kiệm ròng", b.net_savings_score);

    match b.budget {
        BudgetScore::Adherence(p) => sheet.pair("Điểm tuân thủ ngân sách", p),
        BudgetScore::NoBudgetBonus(p) => sheet.pair("Điểm thưởng (không có ngân sách)", p),
    };

    sheet
        .blank()
        .row(&["KHUYẾN NGHỊ"])
        .row(&["Mức độ", "Danh mục", "Nội dung", "Hành động"]);
    for rec in &result.recommendations {
        sheet.row(&[
            rec.priority.as_str(),
            rec.category.as_str(),
            rec.message.as_str(),
            rec.action.as_str(),
        ]);
    }
    sheet.finish()
}

/// Flat transaction list; an empty list has nothing to export
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String> {
    if transactions.is_empty() {
        return Err(Error::InvalidData(EMPTY_EXPORT.into()));
    }

    let mut sheet = Sheet::new();
    sheet.row(&TRANSACTION_HEADER);
    for tx in transactions {
        sheet.row(&[
            tx.transaction_date.to_string(),
            tx.transaction_type.label().to_string(),
            tx.category.id.to_string(),
            tx.category.name.clone(),
            amount(tx.amount),
            tx.description.clone().unwrap_or_default(),
        ]);
    }
    Ok(sheet.finish())
}
