//! Types used by the financial health scorer

use serde::{Deserialize, Serialize};

/// Budget tracking state for a period
///
/// Wire form is a nullable number: `null` (or a missing field) means no
/// budgets are configured, a number is the adherence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum BudgetInfo {
    /// Percentage of budgeted categories that stayed within budget (0..=100)
    Tracked { adherence: f64 },
    #[default]
    Untracked,
}

impl BudgetInfo {
    pub fn adherence(&self) -> Option<f64> {
        match self {
            Self::Tracked { adherence } => Some(*adherence),
            Self::Untracked => None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, Self::Tracked { .. })
    }
}

impl From<Option<f64>> for BudgetInfo {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(adherence) => Self::Tracked { adherence },
            None => Self::Untracked,
        }
    }
}

impl From<BudgetInfo> for Option<f64> {
    fn from(value: BudgetInfo) -> Self {
        value.adherence()
    }
}

/// Period totals fed into the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expense: f64,
    /// income - expense; may be negative
    pub net_savings: f64,
    /// Percentage; may be negative
    #[serde(default)]
    pub savings_rate: f64,
    #[serde(rename = "budgetAdherence", default)]
    pub budget: BudgetInfo,
}

impl FinancialSummary {
    /// Build a summary from raw totals, deriving net savings and savings rate
    pub fn from_totals(total_income: f64, total_expense: f64) -> Self {
        let net_savings = total_income - total_expense;
        let savings_rate = if total_income > 0.0 {
            net_savings / total_income * 100.0
        } else {
            0.0
        };
        Self {
            total_income,
            total_expense,
            net_savings,
            savings_rate,
            budget: BudgetInfo::Untracked,
        }
    }

    pub fn with_budget_adherence(mut self, adherence: f64) -> Self {
        self.budget = BudgetInfo::Tracked { adherence };
        self
    }

    pub fn with_savings_rate(mut self, savings_rate: f64) -> Self {
        self.savings_rate = savings_rate;
        self
    }

    /// Expense as a percentage of income; 100 when there is no income
    pub fn expense_ratio(&self) -> f64 {
        if self.total_income > 0.0 {
            self.total_expense / self.total_income * 100.0
        } else {
            100.0
        }
    }
}

/// Points awarded by the budget component
///
/// Exactly one of the two wire fields is present on a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetScore {
    #[serde(rename = "budgetAdherenceScore")]
    Adherence(u32),
    #[serde(rename = "noBudgetBonus")]
    NoBudgetBonus(u32),
}

impl BudgetScore {
    pub fn points(&self) -> u32 {
        match *self {
            Self::Adherence(p) | Self::NoBudgetBonus(p) => p,
        }
    }
}

/// Points per scoring component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub savings_rate_score: u32,
    pub expense_ratio_score: u32,
    pub net_savings_score: u32,
    #[serde(flatten)]
    pub budget: BudgetScore,
}

impl ScoreBreakdown {
    pub fn budget_adherence_score(&self) -> Option<u32> {
        match self.budget {
            BudgetScore::Adherence(p) => Some(p),
            BudgetScore::NoBudgetBonus(_) => None,
        }
    }

    pub fn no_budget_bonus(&self) -> Option<u32> {
        match self.budget {
            BudgetScore::NoBudgetBonus(p) => Some(p),
            BudgetScore::Adherence(_) => None,
        }
    }

    /// Sum of all components, before the 100 cap
    pub fn total(&self) -> u32 {
        self.savings_rate_score
            + self.expense_ratio_score
            + self.net_savings_score
            + self.budget.points()
    }
}

/// Qualitative tier for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

/// Rating with its display attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub tier: HealthRating,
    pub level: String,
    pub color: String,
    pub icon: String,
    pub description: String,
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actionable advice produced by the scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub message: String,
    pub action: String,
}

/// Full scorer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResult {
    /// 0..=100
    pub score: u32,
    pub rating: Rating,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<Recommendation>,
}

impl HealthResult {
    pub fn has_critical(&self) -> bool {
        self.recommendations
            .iter()
            .any(|r| r.priority == Priority::Critical)
    }
}
