//! Threshold tables used by the health scorer
//!
//! Every scoring component is a `TierTable`: an ordered list of
//! `(bound, score)` pairs evaluated top-down, with a fallback score when no
//! bound matches.

/// Comparison applied to the input value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value >= threshold
    AtLeast(f64),
    /// value <= threshold
    AtMost(f64),
    /// value < threshold
    Below(f64),
}

impl Bound {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Bound::AtLeast(t) => value >= t,
            Bound::AtMost(t) => value <= t,
            Bound::Below(t) => value < t,
        }
    }

    pub fn threshold(&self) -> f64 {
        match *self {
            Bound::AtLeast(t) | Bound::AtMost(t) | Bound::Below(t) => t,
        }
    }
}

/// One row of a tier table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub bound: Bound,
    pub score: u32,
}

impl Tier {
    pub const fn at_least(threshold: f64, score: u32) -> Self {
        Self {
            bound: Bound::AtLeast(threshold),
            score,
        }
    }

    pub const fn at_most(threshold: f64, score: u32) -> Self {
        Self {
            bound: Bound::AtMost(threshold),
            score,
        }
    }

    pub const fn below(threshold: f64, score: u32) -> Self {
        Self {
            bound: Bound::Below(threshold),
            score,
        }
    }
}

/// Ordered tier rules plus the score used when none match
#[derive(Debug, Clone, Copy)]
pub struct TierTable {
    pub name: &'static str,
    pub tiers: &'static [Tier],
    pub fallback: u32,
}

impl TierTable {
    /// Score for `value`: the first matching tier wins
    pub fn evaluate(&self, value: f64) -> u32 {
        self.tiers
            .iter()
            .find(|tier| tier.bound.matches(value))
            .map(|tier| tier.score)
            .unwrap_or(self.fallback)
    }

    /// Highest score this table can produce
    pub fn max_score(&self) -> u32 {
        self.tiers
            .iter()
            .map(|tier| tier.score)
            .chain(std::iter::once(self.fallback))
            .max()
            .unwrap_or(0)
    }
}

/// Savings rate (%) -> 0..=30
pub const SAVINGS_RATE: TierTable = TierTable {
    name: "savings_rate",
    tiers: &[
        Tier::at_least(30.0, 30),
        Tier::at_least(20.0, 25),
        Tier::at_least(10.0, 15),
        Tier::at_least(0.0, 5),
    ],
    fallback: 0,
};

/// Expense-to-income ratio (%) -> 0..=25
pub const EXPENSE_RATIO: TierTable = TierTable {
    name: "expense_ratio",
    tiers: &[
        Tier::at_most(50.0, 25),
        Tier::at_most(70.0, 20),
        Tier::at_most(90.0, 15),
        Tier::below(100.0, 10),
    ],
    fallback: 0,
};

/// Net savings as % of income -> 5..=20 (only evaluated when net savings > 0)
pub const NET_SAVINGS_RATIO: TierTable = TierTable {
    name: "net_savings_ratio",
    tiers: &[
        Tier::at_least(30.0, 20),
        Tier::at_least(20.0, 15),
        Tier::at_least(10.0, 10),
    ],
    fallback: 5,
};

/// Budget adherence (%) -> 5..=25
pub const BUDGET_ADHERENCE: TierTable = TierTable {
    name: "budget_adherence",
    tiers: &[
        Tier::at_least(90.0, 25),
        Tier::at_least(75.0, 20),
        Tier::at_least(50.0, 15),
        Tier::at_least(25.0, 10),
    ],
    fallback: 5,
};

/// Cap for the bonus awarded when no budgets are configured
pub const NO_BUDGET_BONUS_CAP: u32 = 25;

/// `max(0, min(25, floor(savings_rate / 2)))`
pub fn no_budget_bonus(savings_rate: f64) -> u32 {
    // NaN survives clamp and casts to 0
    (savings_rate / 2.0)
        .floor()
        .clamp(0.0, NO_BUDGET_BONUS_CAP as f64) as u32
}
