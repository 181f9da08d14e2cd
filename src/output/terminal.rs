// Colored terminal output for engagement reports and search results.
//
// main.rs delegates all display here so commands stay short.

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::models::Profile;
use crate::pipeline::leaderboard::LeaderboardEntry;
use crate::report::EngagementReport;
use crate::scoring::tier::{RateTier, ScoreTier};

use super::format::{format_number, format_relative_time};

/// Display the full report for one account.
pub fn display_report(report: &EngagementReport, now: DateTime<Utc>) {
    let p = &report.profile;
    let badge = if p.has_notability_badge { " ⚡" } else { "" };
    println!(
        "\n{}",
        format!("=== @{} ({}){} • FID #{} ===", p.handle, p.display_name, badge, p.id).bold()
    );
    println!(
        "  Followers: {}  Following: {}  ({}, top {}%)",
        format_number(p.follower_count),
        format_number(p.following_count),
        report.follow_ratio.label,
        report.follower_percentile,
    );

    println!(
        "\n  Engagement score: {}/100  {}",
        report.score.to_string().bold(),
        colorize_score_tier(report.score_tier),
    );
    println!("  {}", report.score_tier_description.dimmed());

    let b = &report.breakdown;
    println!(
        "    replies {:.1}/20  engagement {:.1}/25  consistency {:.1}/20  likes {:.1}/15  topics {:.1}/20",
        b.reply_frequency, b.average_engagement, b.posting_consistency, b.like_ratio, b.topic_relevance,
    );

    let s = &report.stats;
    println!(
        "\n  {} casts analyzed, {} this week",
        report.posts_analyzed, s.weekly_posts
    );
    println!(
        "  Likes {} (avg {})  Recasts {} (avg {})  Replies {} (avg {})",
        format_number(s.total_likes),
        s.avg_likes,
        format_number(s.total_recasts),
        s.avg_recasts,
        format_number(s.total_replies),
        s.avg_replies,
    );
    println!(
        "  Engagement rate: {:.1} per cast  Card tier: {}",
        s.engagement_rate,
        colorize_rate_tier(report.rate_tier),
    );

    if let Some(best) = &s.best_cast {
        println!(
            "\n  Best cast  ({} engagement, {}): {}",
            best.engagement(),
            format_relative_time(best.timestamp, now),
            super::truncate_chars(&best.text, 100).dimmed()
        );
    }
    if let Some(worst) = &s.worst_cast {
        println!(
            "  Worst cast ({} engagement, {}): {}",
            worst.engagement(),
            format_relative_time(worst.timestamp, now),
            super::truncate_chars(&worst.text, 100).dimmed()
        );
    }

    println!("\n  Growth goals:");
    for tip in &report.growth_tips {
        let mark = if tip.done { "✓".green() } else { "·".dimmed() };
        println!("    {} {:<28} {:>3}%", mark, tip.task, tip.progress);
    }

    if !report.top_supporters.is_empty() {
        let handles: Vec<String> = report
            .top_supporters
            .iter()
            .map(|s| format!("@{}", s.handle))
            .collect();
        println!("\n  Top supporters: {}", handles.join(" "));
    }
}

/// Display user search results.
pub fn display_profiles(profiles: &[Profile]) {
    if profiles.is_empty() {
        println!("No matching users.");
        return;
    }
    for p in profiles {
        println!(
            "  @{:<24} {:<28} {:>8} followers",
            p.handle,
            super::truncate_chars(&p.display_name, 26),
            format_number(p.follower_count),
        );
    }
}

/// Display ranked leaderboard rows, best first.
pub fn display_leaderboard(rows: &[LeaderboardEntry]) {
    if rows.is_empty() {
        println!("No accounts could be scored.");
        return;
    }

    println!("\n{}", format!("=== Leaderboard ({} accounts) ===", rows.len()).bold());
    println!(
        "  {:>4}  {:<30} {:>5}  {:<10} {:>6}",
        "Rank".dimmed(),
        "Handle".dimmed(),
        "Score".dimmed(),
        "Tier".dimmed(),
        "Rate".dimmed(),
    );
    println!("  {}", "-".repeat(64).dimmed());
    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {:>4}. @{:<28} {:>5}  {:<10} {:>6.1}",
            i + 1,
            row.handle,
            row.score,
            colorize_score_tier(row.tier),
            row.engagement_rate,
        );
    }
}

fn colorize_score_tier(tier: ScoreTier) -> colored::ColoredString {
    let s = tier.as_str();
    match tier {
        ScoreTier::Legendary => s.yellow().bold(),
        ScoreTier::Elite => s.magenta().bold(),
        ScoreTier::Pro => s.cyan(),
        ScoreTier::Rising => s.green(),
        ScoreTier::Active => s.blue(),
        ScoreTier::Starter => s.dimmed(),
    }
}

fn colorize_rate_tier(tier: RateTier) -> colored::ColoredString {
    let s = tier.as_str();
    match tier {
        RateTier::Diamond => s.bright_cyan().bold(),
        RateTier::Platinum => s.bright_white(),
        RateTier::Gold => s.yellow(),
        RateTier::Silver => s.white(),
        RateTier::Bronze => s.red(),
    }
}
