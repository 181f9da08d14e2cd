// Engagement report: every derived metric for one account in one value.
//
// Built once per request from already-fetched data and handed to whichever
// surface renders it (terminal, JSON API, share card).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Post, Profile};
use crate::scoring::engagement::{score_breakdown, ScoreBreakdown, ScoreWeights};
use crate::scoring::growth::{follower_percentile, growth_tips, GrowthTip};
use crate::scoring::ratio::{classify_follow_ratio, FollowRatio};
use crate::scoring::stats::{compute_engagement_stats, EngagementStats};
use crate::scoring::supporters::{top_supporters, Supporter, TOP_SUPPORTER_COUNT};
use crate::scoring::tier::{
    card_score, engagement_percent, RateTier, ScoreTier, CARD_SCALE, SHARE_SCALE,
};

#[derive(Debug, Clone, Serialize)]
pub struct EngagementReport {
    pub profile: Profile,
    pub posts_analyzed: usize,
    pub stats: EngagementStats,
    pub score: u32,
    pub score_tier: ScoreTier,
    pub score_tier_description: &'static str,
    pub breakdown: ScoreBreakdown,
    pub rate_tier: RateTier,
    /// Rate-derived figure shown on share cards.
    pub card_score: u32,
    /// Tier printed next to `card_score`; same scale as the score.
    pub share_tier: RateTier,
    pub follow_ratio: FollowRatio,
    pub follower_percentile: u32,
    pub growth_tips: Vec<GrowthTip>,
    pub top_supporters: Vec<Supporter>,
    pub generated_at: DateTime<Utc>,
}

impl EngagementReport {
    pub fn build(profile: Profile, posts: &[Post], now: DateTime<Utc>) -> Self {
        let stats = compute_engagement_stats(posts, now);
        let breakdown = score_breakdown(posts, Some(&profile), now, &ScoreWeights::default());
        let score = breakdown.total();
        let score_tier = ScoreTier::from_score(score as f64);
        let rate_tier =
            RateTier::from_percent(engagement_percent(stats.engagement_rate, CARD_SCALE));

        Self {
            posts_analyzed: posts.len(),
            score,
            score_tier,
            score_tier_description: score_tier.description(),
            breakdown,
            rate_tier,
            card_score: card_score(stats.engagement_rate),
            share_tier: RateTier::from_percent(engagement_percent(
                stats.engagement_rate,
                SHARE_SCALE,
            )),
            follow_ratio: classify_follow_ratio(profile.follower_count, profile.following_count),
            follower_percentile: follower_percentile(profile.follower_count),
            growth_tips: growth_tips(Some(&profile), &stats),
            top_supporters: top_supporters(posts, TOP_SUPPORTER_COUNT),
            stats,
            profile,
            generated_at: now,
        }
    }
}
