// Leaderboard pipeline: score several accounts concurrently and rank them.
//
// Each username is resolved and its casts fetched independently, so the
// work fans out with `buffer_unordered`. Accounts that can't be resolved
// are reported back rather than failing the whole run.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::neynar::provider::PostFeedProvider;
use crate::report::EngagementReport;
use crate::scoring::tier::ScoreTier;

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub handle: String,
    pub score: u32,
    pub tier: ScoreTier,
    pub engagement_rate: f64,
    pub posts_analyzed: usize,
}

impl From<&EngagementReport> for LeaderboardEntry {
    fn from(report: &EngagementReport) -> Self {
        Self {
            handle: report.profile.handle.clone(),
            score: report.score,
            tier: report.score_tier,
            engagement_rate: report.stats.engagement_rate,
            posts_analyzed: report.posts_analyzed,
        }
    }
}

#[derive(Debug, Default)]
pub struct Leaderboard {
    /// Highest score first. Ties keep input order.
    pub entries: Vec<LeaderboardEntry>,
    /// Inputs that didn't resolve to an account.
    pub missing: Vec<String>,
}

/// Score every username and rank the results.
///
/// At most `concurrency` accounts are in flight at once. `show_progress`
/// draws an indicatif bar on stderr.
pub async fn run(
    provider: &dyn PostFeedProvider,
    usernames: &[String],
    cast_limit: usize,
    concurrency: usize,
    now: DateTime<Utc>,
    show_progress: bool,
) -> Leaderboard {
    let pb = if show_progress {
        let pb = ProgressBar::new(usernames.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let pb_ref = &pb;
    let mut results: Vec<(usize, Result<LeaderboardEntry, String>)> =
        stream::iter(usernames.iter().enumerate().map(|(idx, username)| async move {
            let outcome = match provider.resolve_user(username).await {
                Some(profile) => {
                    let posts = provider.recent_posts(profile.id, cast_limit).await;
                    let report = EngagementReport::build(profile, &posts, now);
                    Ok(LeaderboardEntry::from(&report))
                }
                None => Err(username.clone()),
            };
            pb_ref.inc(1);
            (idx, outcome)
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;
    pb.finish_and_clear();

    // Completion order is arbitrary; restore input order before ranking.
    results.sort_by_key(|(idx, _)| *idx);

    let mut board = Leaderboard::default();
    for (_, outcome) in results {
        match outcome {
            Ok(entry) => board.entries.push(entry),
            Err(username) => {
                warn!(username = %username, "Could not resolve account, skipping");
                board.missing.push(username);
            }
        }
    }
    board.entries.sort_by(|a, b| b.score.cmp(&a.score));

    info!(
        scored = board.entries.len(),
        missing = board.missing.len(),
        "Leaderboard complete"
    );
    board
}
