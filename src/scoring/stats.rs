// Aggregate engagement statistics over a window of casts.
//
// Everything here is a pure function of the posts and an explicit `now`.
// An empty window is a normal input and yields all-zero stats.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Length of the trailing window used for `weekly_posts`.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Derived engagement metrics for a set of posts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementStats {
    pub total_likes: u64,
    pub total_recasts: u64,
    pub total_replies: u64,
    /// Always `total_likes + total_recasts + total_replies`.
    pub total_engagement: u64,
    pub avg_likes: u64,
    pub avg_recasts: u64,
    pub avg_replies: u64,
    /// Mean engagement per post, rounded to one decimal.
    pub engagement_rate: f64,
    /// Posts published within the last 7 days of `now` (inclusive).
    pub weekly_posts: u64,
    pub best_cast: Option<Post>,
    pub worst_cast: Option<Post>,
}

/// Compute aggregate stats for `posts` as of `now`.
pub fn compute_engagement_stats(posts: &[Post], now: DateTime<Utc>) -> EngagementStats {
    if posts.is_empty() {
        return EngagementStats::default();
    }

    let n = posts.len() as f64;
    let total_likes: u64 = posts.iter().map(|p| p.like_count).sum();
    let total_recasts: u64 = posts.iter().map(|p| p.recast_count).sum();
    let total_replies: u64 = posts.iter().map(|p| p.reply_count).sum();
    let total_engagement = total_likes + total_recasts + total_replies;

    let weekly_posts = posts
        .iter()
        .filter(|p| within_window(p, now, WEEKLY_WINDOW_DAYS))
        .count() as u64;

    let (best_cast, worst_cast) = extremes(posts);

    EngagementStats {
        total_likes,
        total_recasts,
        total_replies,
        total_engagement,
        avg_likes: round_mean(total_likes, n),
        avg_recasts: round_mean(total_recasts, n),
        avg_replies: round_mean(total_replies, n),
        engagement_rate: round1(total_engagement as f64 / n),
        weekly_posts,
        best_cast: best_cast.cloned(),
        worst_cast: worst_cast.cloned(),
    }
}

/// True when `now - post.timestamp <= days`. Posts dated after `now` count.
pub fn within_window(post: &Post, now: DateTime<Utc>, days: i64) -> bool {
    now - post.timestamp <= Duration::days(days)
}

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_mean(total: u64, n: f64) -> u64 {
    (total as f64 / n).round() as u64
}

/// Single scan for the highest- and lowest-engagement posts.
/// Strict comparisons keep the first occurrence on ties.
fn extremes(posts: &[Post]) -> (Option<&Post>, Option<&Post>) {
    let mut best: Option<&Post> = None;
    let mut worst: Option<&Post> = None;

    for post in posts {
        let engagement = post.engagement();
        if best.map_or(true, |b| engagement > b.engagement()) {
            best = Some(post);
        }
        if worst.map_or(true, |w| engagement < w.engagement()) {
            worst = Some(post);
        }
    }

    (best, worst)
}
