//! Score to rating mapping

use super::types::{HealthRating, Rating};

/// Minimum score per tier, highest first
const RATING_THRESHOLDS: [(u32, HealthRating); 3] = [
    (80, HealthRating::Excellent),
    (60, HealthRating::Good),
    (40, HealthRating::Fair),
];

impl HealthRating {
    pub fn from_score(score: u32) -> Self {
        RATING_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, rating)| *rating)
            .unwrap_or(HealthRating::NeedsImprovement)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        }
    }

    /// Vietnamese label shown to users
    pub fn level(&self) -> &'static str {
        match self {
            Self::Excellent => "Xuất sắc",
            Self::Good => "Tốt",
            Self::Fair => "Trung bình",
            Self::NeedsImprovement => "Cần cải thiện",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "blue",
            Self::Fair => "yellow",
            Self::NeedsImprovement => "red",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Excellent => "🌟",
            Self::Good => "👍",
            Self::Fair => "⚠️",
            Self::NeedsImprovement => "❗",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Tình hình tài chính rất tốt! Hãy duy trì thói quen này.",
            Self::Good => "Tài chính ổn định. Còn một số điểm cần cải thiện.",
            Self::Fair => "Cần chú ý quản lý tài chính tốt hơn.",
            Self::NeedsImprovement => "Tình hình tài chính cần được cải thiện gấp.",
        }
    }

    pub fn to_rating(self) -> Rating {
        Rating {
            tier: self,
            level: self.level().to_string(),
            color: self.color().to_string(),
            icon: self.icon().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl std::fmt::Display for HealthRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_boundaries() {
        assert_eq!(HealthRating::from_score(100), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(80), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(79), HealthRating::Good);
        assert_eq!(HealthRating::from_score(60), HealthRating::Good);
        assert_eq!(HealthRating::from_score(59), HealthRating::Fair);
        assert_eq!(HealthRating::from_score(40), HealthRating::Fair);
        assert_eq!(HealthRating::from_score(39), HealthRating::NeedsImprovement);
        assert_eq!(HealthRating::from_score(0), HealthRating::NeedsImprovement);
    }

    #[test]
    fn test_rating_attributes() {
        let rating = HealthRating::Excellent.to_rating();
        assert_eq!(rating.level, "Xuất sắc");
        assert_eq!(rating.color, "green");
        assert_eq!(rating.icon, "🌟");

        let rating = HealthRating::NeedsImprovement.to_rating();
        assert_eq!(rating.level, "Cần cải thiện");
        assert_eq!(rating.color, "red");
        assert_eq!(
            rating.description,
            "Tình hình tài chính cần được cải thiện gấp."
        );
    }
}
