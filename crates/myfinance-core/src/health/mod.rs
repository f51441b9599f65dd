//! Financial health scoring
//!
//! Turns a period's totals into a 0-100 score built from four components:
//!
//! - **Savings rate** (0-30): share of income kept
//! - **Expense ratio** (0-25): expense relative to income
//! - **Net savings** (0-20): positive surplus relative to income
//! - **Budget** (0-25): adherence score when budgets exist, otherwise a
//!   bonus derived from the savings rate
//!
//! The score maps to a rating tier and a list of recommendations.
//!
//! ```
//! use myfinance_core::health::{score, FinancialSummary, HealthRating};
//!
//! let summary = FinancialSummary::from_totals(10_000_000.0, 6_000_000.0);
//! let result = score(&summary);
//! assert_eq!(result.score, 90);
//! assert_eq!(result.rating.tier, HealthRating::Excellent);
//! ```

mod rating;
pub mod recommendations;
mod scorer;
pub mod tiers;
mod types;

pub use recommendations::RecommendationRule;
pub use scorer::{score, MAX_SCORE};
pub use types::*;
