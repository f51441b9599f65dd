//! Day-of-week spending patterns

use chrono::{Datelike, Weekday};

use crate::models::{DaySpending, SpendingPatterns, Transaction};

/// Vietnamese weekday labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Chủ nhật",
    "Thứ hai",
    "Thứ ba",
    "Thứ tư",
    "Thứ năm",
    "Thứ sáu",
    "Thứ bảy",
];

pub fn weekday_label(day: Weekday) -> &'static str {
    WEEKDAY_LABELS[day.num_days_from_sunday() as usize]
}

/// Group expenses by weekday and find the day with the most spending
///
/// Returns `None` when there are no expenses. Only weekdays that have at
/// least one expense are listed. The peak is the strictly largest total;
/// when no total is above zero there is no peak.
pub fn analyze_spending_patterns(transactions: &[Transaction]) -> Option<SpendingPatterns> {
    let mut buckets: [(i64, f64); 7] = [(0, 0.0); 7];
    let mut any = false;

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let idx = tx.transaction_date.weekday().num_days_from_sunday() as usize;
        buckets[idx].0 += 1;
        buckets[idx].1 += tx.amount;
        any = true;
    }

    if !any {
        return None;
    }

    let by_day_of_week: Vec<DaySpending> = buckets
        .iter()
        .zip(WEEKDAY_LABELS)
        .filter(|((count, _), _)| *count > 0)
        .map(|(&(count, total), day)| DaySpending {
            day: day.to_string(),
            count,
            total,
        })
        .collect();

    let mut peak_spending_day = None;
    let mut peak_spending_amount = 0.0;
    for day in &by_day_of_week {
        if day.total > peak_spending_amount {
            peak_spending_amount = day.total;
            peak_spending_day = Some(day.day.clone());
        }
    }

    Some(SpendingPatterns {
        by_day_of_week,
        peak_spending_day,
        peak_spending_amount,
    })
}
