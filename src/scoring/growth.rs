// Growth goals: progress toward the dashboard's suggested targets.
//
// Targets:
// - post 3x daily (21 casts per week)
// - reach the next follower milestone (next thousand, plus one thousand)
// - hold a 5+ engagement rate
// - collect 500 more likes than the current window total

use serde::{Deserialize, Serialize};

use crate::models::Profile;
use crate::output::format::format_number;
use crate::scoring::stats::EngagementStats;

/// Casts per week for the "post 3x daily" goal.
pub const WEEKLY_POST_TARGET: u64 = 21;

/// Engagement rate for the "maintain 5%+ engagement" goal.
pub const ENGAGEMENT_RATE_TARGET: f64 = 5.0;

/// Extra likes the likes goal asks for.
pub const LIKES_STRETCH: u64 = 500;

/// One suggested task and how far along it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthTip {
    pub task: String,
    /// Percent complete, 0-100.
    pub progress: u32,
    pub done: bool,
}

/// Next follower target: round up to the next thousand, then add a thousand.
pub fn next_follower_milestone(followers: u64) -> u64 {
    followers.div_ceil(1000) * 1000 + 1000
}

/// "Top N%" estimate shown in the guide, clamped to 1-99.
pub fn follower_percentile(followers: u64) -> u32 {
    let raw = (100.0 - followers as f64 / 10_000.0 * 100.0).round();
    raw.clamp(1.0, 99.0) as u32
}

/// Build the four growth tips for a profile and its stats.
pub fn growth_tips(profile: Option<&Profile>, stats: &EngagementStats) -> Vec<GrowthTip> {
    let followers = profile.map_or(0, |p| p.follower_count);
    let milestone = next_follower_milestone(followers);
    let likes_target = stats.total_likes + LIKES_STRETCH;

    vec![
        GrowthTip {
            task: "Post 3x daily".to_string(),
            progress: percent(stats.weekly_posts as f64, WEEKLY_POST_TARGET as f64, 100),
            done: stats.weekly_posts >= WEEKLY_POST_TARGET,
        },
        GrowthTip {
            task: format!("Reach {} followers", format_number(milestone)),
            progress: percent(followers as f64, milestone as f64, 100),
            done: false,
        },
        GrowthTip {
            task: "Maintain 5%+ engagement".to_string(),
            progress: percent(stats.engagement_rate, ENGAGEMENT_RATE_TARGET, 100),
            done: stats.engagement_rate >= ENGAGEMENT_RATE_TARGET,
        },
        GrowthTip {
            task: format!("Get {} total likes", format_number(likes_target)),
            // Never shows complete: the target moves with the total.
            progress: percent(stats.total_likes as f64, likes_target as f64, 99),
            done: false,
        },
    ]
}

/// Progress toward a goal, rounded and capped at `cap`.
pub fn goal_progress(current: f64, target: f64) -> u32 {
    percent(current, target, 100)
}

fn percent(current: f64, target: f64, cap: u32) -> u32 {
    if target <= 0.0 {
        return cap;
    }
    let pct = (current / target * 100.0).round().max(0.0) as u32;
    pct.min(cap)
}
