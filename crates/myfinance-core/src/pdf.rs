//! PDF rendering for monthly, yearly and category reports
//!
//! Documents use the standard Helvetica fonts, which only cover WinAnsi, so
//! Vietnamese text is romanized before it is drawn. Layout is a single
//! column of text lines and fixed-offset table rows on A4 pages.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::currency::format_number;
use crate::error::{Error, Result};
use crate::models::{CategoryReport, CategorySummary, MonthlyReport, YearlyReport};
use crate::reports::TOP_CATEGORIES;

/// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

const TABLE_FONT_SIZE: f32 = 9.0;
const NAME_WIDTH: usize = 30;

const FOOTER: &str = "--- Báo cáo được tạo tự động bởi MyFinance ---";

const DIACRITICS: [(&str, char); 14] = [
    ("áàảãạăắằẳẵặâấầẩẫậ", 'a'),
    ("ÁÀẢÃẠĂẮẰẲẴẶÂẤẦẨẪẬ", 'A'),
    ("éèẻẽẹêếềểễệ", 'e'),
    ("ÉÈẺẼẸÊẾỀỂỄỆ", 'E'),
    ("íìỉĩị", 'i'),
    ("ÍÌỈĨỊ", 'I'),
    ("óòỏõọôốồổỗộơớờởỡợ", 'o'),
    ("ÓÒỎÕỌÔỐỒỔỖỘƠỚỜỞỠỢ", 'O'),
    ("úùủũụưứừửữự", 'u'),
    ("ÚÙỦŨỤƯỨỪỬỮỰ", 'U'),
    ("ýỳỷỹỵ", 'y'),
    ("ÝỲỶỸỴ", 'Y'),
    ("đ", 'd'),
    ("Đ", 'D'),
];

/// Strip Vietnamese diacritics; any other non-ASCII character is dropped
pub fn romanize(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_ascii() {
                return Some(c);
            }
            DIACRITICS
                .iter()
                .find(|(group, _)| group.contains(c))
                .map(|(_, base)| *base)
        })
        .collect()
}

/// `bao-cao-thang-3-2024.csv` -> `bao-cao-thang-3-2024.pdf`
pub fn pdf_file_name(csv_name: &str) -> String {
    format!("{}.pdf", csv_name.strip_suffix(".csv").unwrap_or(csv_name))
}

fn money(amount: f64) -> String {
    format!("{} VND", format_number(amount))
}

fn pdf_error(err: impl std::fmt::Display) -> Error {
    Error::Pdf(err.to_string())
}

fn short_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

/// Accumulates content operations page by page, top to bottom
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Move down by `height`, breaking to a new page when it would not fit
    fn advance(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.y -= height;
    }

    fn text_at(&mut self, font: &str, size: f32, x: f32, text: &str) {
        let operations = [
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), self.y.into()]),
            Operation::new("Tj", vec![Object::string_literal(romanize(text))]),
            Operation::new("ET", vec![]),
        ];
        if let Some(page) = self.pages.last_mut() {
            page.extend(operations);
        }
    }

    fn line(&mut self, font: &str, size: f32, text: &str) -> &mut Self {
        self.advance(size * 1.5);
        self.text_at(font, size, MARGIN, text);
        self
    }

    fn gap(&mut self) -> &mut Self {
        self.advance(8.0);
        self
    }

    /// Brand line, report title and generation date
    fn header(&mut self, title: &str, subtitle: Option<&str>) -> &mut Self {
        self.line(BOLD, 20.0, "MyFinance").line(BOLD, 16.0, title);
        if let Some(subtitle) = subtitle {
            self.line(REGULAR, 10.0, subtitle);
        }
        let generated = format!("Ngày tạo: {}", Utc::now().format("%d/%m/%Y"));
        self.line(REGULAR, 10.0, &generated)
    }

    fn heading(&mut self, text: &str) -> &mut Self {
        self.gap().line(BOLD, 13.0, text)
    }

    /// Table row; each cell starts at its column offset from the margin
    fn row(&mut self, columns: &[f32], cells: &[String], bold: bool) -> &mut Self {
        self.advance(TABLE_FONT_SIZE * 1.6);
        let font = if bold { BOLD } else { REGULAR };
        for (x, cell) in columns.iter().zip(cells) {
            self.text_at(font, TABLE_FONT_SIZE, MARGIN + x, cell);
        }
        self
    }

    fn header_row(&mut self, columns: &[f32], labels: &[&str]) -> &mut Self {
        let cells: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        self.row(columns, &cells, true)
    }

    fn pair(&mut self, label: &str, value: String) -> &mut Self {
        self.row(&[0.0, 200.0], &[label.to_string(), value], false)
    }

    fn top_categories(&mut self, categories: &[CategorySummary]) -> &mut Self {
        if categories.is_empty() {
            return self;
        }
        let columns = [0.0, 30.0, 260.0];
        self.heading(&format!("TOP {} DANH MỤC CHI NHIỀU NHẤT", TOP_CATEGORIES))
            .header_row(&columns, &["#", "Danh mục", "Số tiền"]);
        for (rank, category) in categories.iter().take(TOP_CATEGORIES).enumerate() {
            self.row(
                &columns,
                &[
                    (rank + 1).to_string(),
                    short_name(&category.category_name),
                    money(category.amount),
                ],
                false,
            );
        }
        self
    }

    /// Lay the pages out as a PDF document
    fn finish(mut self) -> Result<Vec<u8>> {
        self.gap().line(REGULAR, 8.0, FOOTER);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR => regular_id,
                BOLD => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().map_err(pdf_error)?,
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> =
            vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).map_err(pdf_error)?;
        Ok(out)
    }
}

/// Monthly report: overview, income and expense tables, top categories
pub fn monthly_report_pdf(report: &MonthlyReport) -> Result<Vec<u8>> {
    let mut pdf = PageWriter::new();
    pdf.header(
        &format!("BÁO CÁO TÀI CHÍNH THÁNG {}/{}", report.month, report.year),
        None,
    )
    .heading("TỔNG QUAN")
    .pair("Tổng thu nhập:", money(report.total_income))
    .pair("Tổng chi tiêu:", money(report.total_expense))
    .pair("Tiết kiệm:", money(report.net_savings))
    .pair("Tỷ lệ tiết kiệm:", format!("{:.2}%", report.savings_rate))
    .pair("Số giao dịch:", report.total_transactions.to_string())
    .pair("Trung bình/giao dịch:", money(report.average_transaction));

    if !report.income_by_category.is_empty() {
        let columns = [0.0, 180.0, 300.0, 360.0];
        pdf.heading("CHI TIẾT THU NHẬP")
            .header_row(&columns, &["Danh mục", "Số tiền", "Phần trăm", "Số GD"]);
        for category in &report.income_by_category {
            pdf.row(
                &columns,
                &[
                    short_name(&category.category_name),
                    money(category.amount),
                    format!("{:.1}%", category.percentage),
                    category.transaction_count.to_string(),
                ],
                false,
            );
        }
    }

    if !report.expense_by_category.is_empty() {
        let columns = [0.0, 150.0, 260.0, 305.0, 340.0, 450.0];
        pdf.heading("CHI TIẾT CHI TIÊU").header_row(
            &columns,
            &["Danh mục", "Số tiền", "%", "GD", "Ngân sách", "Dùng %"],
        );
        for category in &report.expense_by_category {
            let (budget, usage) = if category.has_budget() {
                (
                    money(category.budget_amount.unwrap_or_default()),
                    format!("{:.1}%", category.budget_usage_percent.unwrap_or_default()),
                )
            } else {
                ("-".to_string(), "-".to_string())
            };
            pdf.row(
                &columns,
                &[
                    short_name(&category.category_name),
                    money(category.amount),
                    format!("{:.1}", category.percentage),
                    category.transaction_count.to_string(),
                    budget,
                    usage,
                ],
                false,
            );
        }
    }

    pdf.top_categories(&report.top_expense_categories);
    pdf.finish()
}

/// Yearly report: overview, one row per month, top categories
pub fn yearly_report_pdf(report: &YearlyReport) -> Result<Vec<u8>> {
    let mut pdf = PageWriter::new();
    pdf.header(&format!("BÁO CÁO TÀI CHÍNH NĂM {}", report.year), None)
        .heading("TỔNG QUAN")
        .pair("Tổng thu nhập:", money(report.total_income))
        .pair("Tổng chi tiêu:", money(report.total_expense))
        .pair("Tiết kiệm:", money(report.net_savings))
        .pair("Tỷ lệ tiết kiệm:", format!("{:.2}%", report.savings_rate))
        .pair("TB thu nhập/tháng:", money(report.average_monthly_income))
        .pair("TB chi tiêu/tháng:", money(report.average_monthly_expense));

    let columns = [0.0, 80.0, 200.0, 320.0, 440.0];
    pdf.heading("CHI TIẾT THEO THÁNG").header_row(
        &columns,
        &["Tháng", "Thu nhập", "Chi tiêu", "Tiết kiệm", "Tỷ lệ"],
    );
    for trend in &report.monthly_trends {
        pdf.row(
            &columns,
            &[
                trend.month_name.clone(),
                money(trend.income),
                money(trend.expense),
                money(trend.savings),
                format!("{:.1}%", trend.savings_rate),
            ],
            false,
        );
    }

    pdf.top_categories(&report.top_expense_categories);
    pdf.finish()
}

/// Category report: overview, budget comparison, one row per month
pub fn category_report_pdf(report: &CategoryReport) -> Result<Vec<u8>> {
    let mut pdf = PageWriter::new();
    pdf.header(
        &format!("BÁO CÁO DANH MỤC: {}", report.category_name),
        Some(&format!(
            "Từ {} đến {}",
            report.start_date.format("%d/%m/%Y"),
            report.end_date.format("%d/%m/%Y")
        )),
    )
    .heading("TỔNG QUAN")
    .pair("Loại:", report.category_type.label().to_string())
    .pair("Tổng số tiền:", money(report.total_amount))
    .pair("Số giao dịch:", report.transaction_count.to_string())
    .pair("Trung bình/giao dịch:", money(report.average_transaction))
    .pair("Nhỏ nhất:", money(report.min_transaction))
    .pair("Lớn nhất:", money(report.max_transaction));

    if let (Some(budgeted), Some(variance), Some(rate)) = (
        report.budgeted_amount,
        report.budget_variance,
        report.budget_adherence_rate,
    ) {
        pdf.pair("Ngân sách:", money(budgeted))
            .pair("Chênh lệch:", money(variance))
            .pair("Tuân thủ ngân sách:", format!("{:.1}%", rate));
    }

    let columns = [0.0, 80.0, 170.0, 260.0, 400.0];
    pdf.heading("XU HƯỚNG THEO THỜI GIAN").header_row(
        &columns,
        &["Kỳ", "Từ ngày", "Đến ngày", "Số tiền", "Số GD"],
    );
    for period in &report.period_summaries {
        pdf.row(
            &columns,
            &[
                period.period_label.clone(),
                period.period_start.format("%d/%m/%Y").to_string(),
                period.period_end.format("%d/%m/%Y").to_string(),
                money(period.amount),
                period.transaction_count.to_string(),
            ],
            false,
        );
    }

    pdf.finish()
}
