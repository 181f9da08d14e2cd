// Tier classification: two separate threshold maps.
//
// `ScoreTier` buckets the 0-100 engagement score. `RateTier` buckets an
// engagement-rate percentage and is what the card generators badge with.
// They take different inputs and have different labels; never mix them.
//
// Styling (colors, gradients) is the renderer's job and lives elsewhere.

use serde::{Deserialize, Serialize};

/// Multiplier the activity card applies to the engagement rate.
pub const CARD_SCALE: f64 = 5.0;

/// Multiplier the share card applies to the engagement rate.
pub const SHARE_SCALE: f64 = 10.0;

/// Tier for the 0-100 engagement score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Starter,
    Active,
    Rising,
    Pro,
    Elite,
    Legendary,
}

impl ScoreTier {
    /// Lower bounds are inclusive, checked highest first.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => ScoreTier::Legendary,
            s if s >= 70.0 => ScoreTier::Elite,
            s if s >= 55.0 => ScoreTier::Pro,
            s if s >= 40.0 => ScoreTier::Rising,
            s if s >= 25.0 => ScoreTier::Active,
            _ => ScoreTier::Starter,
        }
    }

    /// Inclusive lower bound of this tier.
    pub fn min_score(&self) -> u32 {
        match self {
            ScoreTier::Legendary => 85,
            ScoreTier::Elite => 70,
            ScoreTier::Pro => 55,
            ScoreTier::Rising => 40,
            ScoreTier::Active => 25,
            ScoreTier::Starter => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Legendary => "Legendary",
            ScoreTier::Elite => "Elite",
            ScoreTier::Pro => "Pro",
            ScoreTier::Rising => "Rising",
            ScoreTier::Active => "Active",
            ScoreTier::Starter => "Starter",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreTier::Legendary => "Top of the feed. Your casts set the conversation.",
            ScoreTier::Elite => "Consistently strong engagement across your casts.",
            ScoreTier::Pro => "A reliable voice with an engaged audience.",
            ScoreTier::Rising => "Momentum is building. Keep the streak going.",
            ScoreTier::Active => "Showing up regularly. Replies will move you up.",
            ScoreTier::Starter => "Just getting started. Cast more to build a score.",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tier for an engagement-rate percentage (see [`engagement_percent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl RateTier {
    pub fn from_percent(percent: f64) -> Self {
        match percent {
            p if p >= 60.0 => RateTier::Diamond,
            p if p >= 30.0 => RateTier::Platinum,
            p if p >= 10.0 => RateTier::Gold,
            p if p >= 5.0 => RateTier::Silver,
            _ => RateTier::Bronze,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RateTier::Diamond => "Diamond",
            RateTier::Platinum => "Platinum",
            RateTier::Gold => "Gold",
            RateTier::Silver => "Silver",
            RateTier::Bronze => "Bronze",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RateTier::Diamond => "Exceptional engagement on every cast",
            RateTier::Platinum => "Well above average engagement",
            RateTier::Gold => "Solid, steady engagement",
            RateTier::Silver => "Engagement is picking up",
            RateTier::Bronze => "Room to grow",
        }
    }
}

impl std::fmt::Display for RateTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scale an engagement rate onto 0-100 for rate tiering.
pub fn engagement_percent(engagement_rate: f64, scale: f64) -> f64 {
    (engagement_rate * scale).min(100.0)
}

/// The rounded 0-100 figure shown on share cards.
pub fn card_score(engagement_rate: f64) -> u32 {
    engagement_percent(engagement_rate, SHARE_SCALE)
        .round()
        .max(0.0) as u32
}
