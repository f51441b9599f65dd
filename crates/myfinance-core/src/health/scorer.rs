//! Financial health scoring

use tracing::debug;

use super::recommendations;
use super::tiers::{self, BUDGET_ADHERENCE, EXPENSE_RATIO, NET_SAVINGS_RATIO, SAVINGS_RATE};
use super::types::{
    BudgetInfo, BudgetScore, FinancialSummary, HealthRating, HealthResult, ScoreBreakdown,
};

/// Maximum health score
pub const MAX_SCORE: u32 = 100;

impl ScoreBreakdown {
    /// Score each component of a period summary
    pub fn compute(summary: &FinancialSummary) -> Self {
        let savings_rate_score = SAVINGS_RATE.evaluate(summary.savings_rate);
        let expense_ratio_score = EXPENSE_RATIO.evaluate(summary.expense_ratio());

        let net_savings_score = if summary.net_savings > 0.0 {
            NET_SAVINGS_RATIO.evaluate(summary.net_savings / summary.total_income * 100.0)
        } else {
            0
        };

        let budget = match summary.budget {
            BudgetInfo::Tracked { adherence } => {
                BudgetScore::Adherence(BUDGET_ADHERENCE.evaluate(adherence))
            }
            BudgetInfo::Untracked => {
                BudgetScore::NoBudgetBonus(tiers::no_budget_bonus(summary.savings_rate))
            }
        };

        Self {
            savings_rate_score,
            expense_ratio_score,
            net_savings_score,
            budget,
        }
    }
}

/// Compute the health score, rating and recommendations for a period
pub fn score(summary: &FinancialSummary) -> HealthResult {
    let breakdown = ScoreBreakdown::compute(summary);
    let raw = breakdown.total();
    let score = raw.min(MAX_SCORE);
    let rating = HealthRating::from_score(score);
    let recommendations = recommendations::evaluate(&breakdown, summary);

    debug!(
        score,
        raw,
        rating = rating.as_str(),
        recommendations = recommendations.len(),
        "Scored financial summary"
    );

    HealthResult {
        score,
        rating: rating.to_rating(),
        breakdown,
        recommendations,
    }
}
