// Engagement score: a 0-100 heuristic over the last 30 days of casts.
//
// Five independently capped factors are summed:
//   reply frequency (20) + average engagement (25) + posting consistency (20)
//   + like-to-engagement ratio (15) + topic relevance (20)
// The caps add up to 100, so the sum never needs renormalizing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Post, Profile};
use crate::scoring::stats::within_window;

/// Trailing window (in days) the score is computed over.
pub const SCORE_WINDOW_DAYS: i64 = 30;

/// Terms that mark a cast as on-topic for the Farcaster / Base community.
/// Matched as substrings of the lowercased cast text.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "farcaster",
    "warpcast",
    "base",
    "onchain",
    "ethereum",
    "crypto",
    "web3",
    "nft",
    "defi",
    "degen",
    "frames",
    "build",
];

/// Caps and multipliers for each score factor.
///
/// `factor = min(raw * multiplier, cap)`, with `raw` defined per factor in
/// [`score_breakdown`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub reply_multiplier: f64,
    pub reply_cap: f64,
    pub engagement_multiplier: f64,
    pub engagement_cap: f64,
    pub consistency_multiplier: f64,
    pub consistency_cap: f64,
    pub like_ratio_multiplier: f64,
    pub like_ratio_cap: f64,
    pub topic_multiplier: f64,
    pub topic_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            reply_multiplier: 10.0,
            reply_cap: 20.0,
            engagement_multiplier: 2.5,
            engagement_cap: 25.0,
            consistency_multiplier: 10.0,
            consistency_cap: 20.0,
            like_ratio_multiplier: 15.0,
            like_ratio_cap: 15.0,
            topic_multiplier: 100.0,
            topic_cap: 20.0,
        }
    }
}

/// Per-factor contributions to the engagement score (each already capped).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub reply_frequency: f64,
    pub average_engagement: f64,
    pub posting_consistency: f64,
    pub like_ratio: f64,
    pub topic_relevance: f64,
    /// Number of casts inside the 30-day window.
    pub recent_posts: usize,
}

impl ScoreBreakdown {
    /// Sum of the factors, rounded and clamped to 0-100.
    pub fn total(&self) -> u32 {
        let sum = self.reply_frequency
            + self.average_engagement
            + self.posting_consistency
            + self.like_ratio
            + self.topic_relevance;
        sum.round().clamp(0.0, 100.0) as u32
    }
}

/// Compute the 0-100 engagement score with the default weights.
///
/// Returns 0 when there are no posts, no profile, or no posts in the
/// last 30 days of `now`.
pub fn compute_engagement_score(
    posts: &[Post],
    profile: Option<&Profile>,
    now: DateTime<Utc>,
) -> u32 {
    score_breakdown(posts, profile, now, &ScoreWeights::default()).total()
}

/// Compute each score factor separately.
pub fn score_breakdown(
    posts: &[Post],
    profile: Option<&Profile>,
    now: DateTime<Utc>,
    weights: &ScoreWeights,
) -> ScoreBreakdown {
    if posts.is_empty() || profile.is_none() {
        return ScoreBreakdown::default();
    }

    let recent: Vec<&Post> = posts
        .iter()
        .filter(|p| within_window(p, now, SCORE_WINDOW_DAYS))
        .collect();
    if recent.is_empty() {
        return ScoreBreakdown::default();
    }

    let count = recent.len() as f64;
    let total_likes: u64 = recent.iter().map(|p| p.like_count).sum();
    let total_replies: u64 = recent.iter().map(|p| p.reply_count).sum();
    let likes_and_recasts: u64 = recent.iter().map(|p| p.like_count + p.recast_count).sum();
    let total_engagement: u64 = recent.iter().map(|p| p.engagement()).sum();

    let reply_frequency =
        (total_replies as f64 / count * weights.reply_multiplier).min(weights.reply_cap);

    let average_engagement = (likes_and_recasts as f64 / count * weights.engagement_multiplier)
        .min(weights.engagement_cap);

    let days_active = days_active(&recent, now);
    let posting_consistency = (count / days_active as f64 * weights.consistency_multiplier)
        .min(weights.consistency_cap);

    let like_ratio = if total_likes > 0 {
        (total_engagement as f64 / total_likes as f64 * weights.like_ratio_multiplier)
            .min(weights.like_ratio_cap)
    } else {
        0.0
    };

    let on_topic = recent.iter().filter(|p| is_on_topic(&p.text)).count();
    let topic_relevance =
        (on_topic as f64 / count * weights.topic_multiplier).min(weights.topic_cap);

    ScoreBreakdown {
        reply_frequency,
        average_engagement,
        posting_consistency,
        like_ratio,
        topic_relevance,
        recent_posts: recent.len(),
    }
}

/// Whole days between the oldest recent post and `now`, rounded up, at least 1.
fn days_active(recent: &[&Post], now: DateTime<Utc>) -> i64 {
    let Some(oldest) = recent.iter().map(|p| p.timestamp).min() else {
        return 1;
    };
    let elapsed = now - oldest;
    let day = Duration::days(1).num_milliseconds();
    let ms = elapsed.num_milliseconds();
    let days = ms / day + i64::from(ms % day > 0);
    days.max(1)
}

/// True when the text contains at least one topic keyword.
pub fn is_on_topic(text: &str) -> bool {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            id: 3,
            handle: "dwr".to_string(),
            display_name: "Dan".to_string(),
            avatar_url: String::new(),
            bio: String::new(),
            follower_count: 1000,
            following_count: 100,
            has_notability_badge: true,
        }
    }

    fn post_at(now: DateTime<Utc>, hours_ago: i64, text: &str, l: u64, r: u64, c: u64) -> Post {
        Post {
            id: format!("0x{hours_ago}"),
            author_id: 3,
            author_handle: "dwr".to_string(),
            author_avatar_url: String::new(),
            text: text.to_string(),
            timestamp: now - Duration::hours(hours_ago),
            like_count: l,
            recast_count: r,
            reply_count: c,
        }
    }

    #[test]
    fn days_active_rounds_up_partial_days() {
        let now = Utc::now();
        let posts = [post_at(now, 25, "", 0, 0, 0)];
        let refs: Vec<&Post> = posts.iter().collect();
        assert_eq!(days_active(&refs, now), 2);
    }

    #[test]
    fn days_active_floors_at_one() {
        let now = Utc::now();
        let posts = [post_at(now, 0, "", 0, 0, 0)];
        let refs: Vec<&Post> = posts.iter().collect();
        assert_eq!(days_active(&refs, now), 1);
    }

    #[test]
    fn hand_computed_breakdown() {
        let now = Utc::now();
        // Oldest post 48h ago -> 2 active days.
        let posts = vec![
            post_at(now, 48, "shipping a new frame on Base", 4, 0, 1),
            post_at(now, 2, "coffee", 2, 2, 1),
        ];
        let b = score_breakdown(&posts, Some(&profile()), now, &ScoreWeights::default());

        // replies 2/2*10 = 10
        assert!((b.reply_frequency - 10.0).abs() < 1e-9);
        // (4+4)/2*2.5 = 10
        assert!((b.average_engagement - 10.0).abs() < 1e-9);
        // 2/2*10 = 10
        assert!((b.posting_consistency - 10.0).abs() < 1e-9);
        // 10/6*15 = 25 -> capped 15
        assert!((b.like_ratio - 15.0).abs() < 1e-9);
        // 1/2*100 = 50 -> capped 20
        assert!((b.topic_relevance - 20.0).abs() < 1e-9);
        assert_eq!(b.total(), 65);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(is_on_topic("Building on FARCASTER"));
        assert!(!is_on_topic("good morning"));
    }
}
