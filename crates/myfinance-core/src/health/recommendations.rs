//! Recommendation rules
//!
//! Rules are evaluated in declaration order and every matching rule emits
//! one recommendation, so output order is stable.

use super::types::{FinancialSummary, Priority, Recommendation, ScoreBreakdown};

/// A predicate over the scored period and the advice it produces
pub struct RecommendationRule {
    pub name: &'static str,
    pub applies: fn(&ScoreBreakdown, &FinancialSummary) -> bool,
    pub category: &'static str,
    pub priority: Priority,
    pub message: &'static str,
    pub action: &'static str,
}

impl RecommendationRule {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            category: self.category.to_string(),
            priority: self.priority,
            message: self.message.to_string(),
            action: self.action.to_string(),
        }
    }
}

pub static RULES: [RecommendationRule; 5] = [
    RecommendationRule {
        name: "low_savings",
        applies: |b, _| b.savings_rate_score < 15,
        category: "Tiết kiệm",
        priority: Priority::High,
        message: "Tỷ lệ tiết kiệm của bạn thấp. Hãy cố gắng tiết kiệm ít nhất 10-20% thu nhập mỗi tháng.",
        action: "Xem lại các khoản chi tiêu không cần thiết và cắt giảm",
    },
    RecommendationRule {
        name: "high_expense",
        applies: |b, _| b.expense_ratio_score < 15,
        category: "Chi tiêu",
        priority: Priority::High,
        message: "Chi tiêu của bạn quá cao so với thu nhập. Cần kiểm soát ngay.",
        action: "Lập kế hoạch ngân sách chi tiết và tuân thủ nghiêm túc",
    },
    RecommendationRule {
        name: "overspending",
        applies: |_, s| s.net_savings <= 0.0,
        category: "Cân đối thu chi",
        priority: Priority::Critical,
        message: "Bạn đang chi tiêu nhiều hơn thu nhập. Đây là tín hiệu nguy hiểm!",
        action: "Cắt giảm chi tiêu không thiết yếu ngay lập tức",
    },
    RecommendationRule {
        name: "budget_drift",
        // Only when budgets are tracked and the score is non-zero
        applies: |b, _| b.budget_adherence_score().is_some_and(|p| p > 0 && p < 15),
        category: "Ngân sách",
        priority: Priority::Medium,
        message: "Bạn chưa tuân thủ tốt ngân sách đã đặt ra.",
        action: "Theo dõi chi tiêu hàng ngày và điều chỉnh ngân sách phù hợp",
    },
    RecommendationRule {
        name: "praise",
        applies: |b, _| b.savings_rate_score >= 25,
        category: "Khen ngợi",
        priority: Priority::Low,
        message: "Tuyệt vời! Tỷ lệ tiết kiệm của bạn rất tốt.",
        action: "Tiếp tục duy trì và xem xét đầu tư để tăng thu nhập thụ động",
    },
];

/// All recommendations that apply, in rule order
pub fn evaluate(breakdown: &ScoreBreakdown, summary: &FinancialSummary) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(breakdown, summary))
        .map(RecommendationRule::to_recommendation)
        .collect()
}
