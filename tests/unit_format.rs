// Unit tests for display helpers: number and time formatting, follow-ratio
// labels, growth goals, share intents and truncate_chars UTF-8 safety.

use activity_tracker::models::{Post, Profile};
use activity_tracker::output::format::{format_number, format_relative_time};
use activity_tracker::output::truncate_chars;
use activity_tracker::scoring::growth::{goal_progress, growth_tips, next_follower_milestone};
use activity_tracker::scoring::ratio::classify_follow_ratio;
use activity_tracker::scoring::stats::EngagementStats;
use activity_tracker::scoring::supporters::top_supporters;
use activity_tracker::share::{compose_url, compose_url_with_frame, frame_url, share_text};
use chrono::{Duration, TimeZone, Utc};

// ============================================================
// format_number
// ============================================================

#[test]
fn format_number_plain_below_thousand() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
}

#[test]
fn format_number_thousands() {
    assert_eq!(format_number(1500), "1.5K");
    assert_eq!(format_number(12_340), "12.3K");
}

#[test]
fn format_number_millions() {
    assert_eq!(format_number(2_500_000), "2.5M");
    assert_eq!(format_number(1_000_000), "1.0M");
}

// ============================================================
// format_relative_time
// ============================================================

#[test]
fn relative_time_minutes_hours_days() {
    let now = Utc.with_ymd_and_hms(2024, 11, 2, 8, 30, 0).unwrap();
    assert_eq!(format_relative_time(now, now), "0m ago");
    assert_eq!(format_relative_time(now - Duration::minutes(5), now), "5m ago");
    assert_eq!(format_relative_time(now - Duration::hours(5), now), "5h ago");
    assert_eq!(format_relative_time(now - Duration::days(3), now), "3d ago");
}

#[test]
fn relative_time_week_or_older_shows_date() {
    let now = Utc.with_ymd_and_hms(2024, 11, 2, 8, 30, 0).unwrap();
    assert_eq!(format_relative_time(now - Duration::days(7), now), "Oct 26");
    assert_eq!(
        format_relative_time(Utc.with_ymd_and_hms(2023, 1, 9, 0, 0, 0).unwrap(), now),
        "Jan 9"
    );
}

// ============================================================
// classify_follow_ratio
// ============================================================

#[test]
fn follow_ratio_zero_following() {
    let r = classify_follow_ratio(100, 0);
    assert_eq!(r.ratio, 100.0);
    assert_eq!(r.label, "100 followers");
}

#[test]
fn follow_ratio_labels() {
    assert_eq!(classify_follow_ratio(5000, 10).label, "Influencer");
    assert_eq!(classify_follow_ratio(300, 100).label, "Creator");
    assert_eq!(classify_follow_ratio(150, 100).label, "Balanced");
    assert_eq!(classify_follow_ratio(10, 100).label, "Networker");
    assert_eq!(classify_follow_ratio(0, 5).ratio, 0.0);
}

// ============================================================
// Growth goals
// ============================================================

#[test]
fn growth_tips_track_profile_and_stats() {
    let profile = Profile {
        id: 7,
        handle: "bob".to_string(),
        display_name: "Bob".to_string(),
        avatar_url: String::new(),
        bio: String::new(),
        follower_count: 1500,
        following_count: 200,
        has_notability_badge: false,
    };
    let stats = EngagementStats {
        weekly_posts: 7,
        engagement_rate: 2.5,
        total_likes: 1500,
        ..Default::default()
    };
    let tips = growth_tips(Some(&profile), &stats);

    assert_eq!(next_follower_milestone(1500), 3000);
    assert_eq!(tips[0].progress, 33); // 7 / 21
    assert_eq!(tips[1].task, "Reach 3.0K followers");
    assert_eq!(tips[1].progress, 50);
    assert_eq!(tips[2].progress, 50); // 2.5 / 5
    assert_eq!(tips[3].task, "Get 2.0K total likes");
    assert_eq!(tips[3].progress, 75);
    assert!(tips.iter().all(|t| !t.done));
}

#[test]
fn goal_progress_caps_at_100() {
    assert_eq!(goal_progress(50.0, 100.0), 50);
    assert_eq!(goal_progress(150.0, 100.0), 100);
    assert_eq!(goal_progress(5.0, 0.0), 100);
}

// ============================================================
// Supporters and share text
// ============================================================

fn cast(author_id: u64, handle: &str, likes: u64) -> Post {
    Post {
        id: format!("0x{author_id}{likes}"),
        author_id,
        author_handle: handle.to_string(),
        author_avatar_url: String::new(),
        text: String::new(),
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        like_count: likes,
        recast_count: 0,
        reply_count: 0,
    }
}

#[test]
fn top_supporters_dedupe_by_author() {
    let posts = vec![
        cast(1, "a", 3),
        cast(2, "b", 9),
        cast(1, "a", 50), // later duplicate of author 1 is ignored
        cast(3, "c", 5),
        cast(4, "d", 1),
    ];
    let top = top_supporters(&posts, 3);
    let handles: Vec<&str> = top.iter().map(|s| s.handle.as_str()).collect();
    assert_eq!(handles, vec!["b", "c", "a"]);
    assert_eq!(top[2].engagement, 3);
}

#[test]
fn share_links_embed_encoded_text() {
    let posts = vec![cast(2, "b", 9)];
    let text = share_text(42, &top_supporters(&posts, 3));
    assert!(text.starts_with("My Farcaster average engagement score is 42"));
    assert!(text.contains("@b"));

    let url = compose_url("gm & gn");
    assert_eq!(url, "https://warpcast.com/~/compose?text=gm%20%26%20gn");

    let frame = frame_url("https://example.test", "a b", 7, "Gold");
    assert_eq!(
        frame,
        "https://example.test/api/frame/engagement?username=a%20b&score=7&tier=Gold"
    );
    let with_frame = compose_url_with_frame("hi", &frame);
    assert!(with_frame.starts_with("https://warpcast.com/~/compose?text=hi%0A%0Ahttps%3A%2F%2F"));
}

// ============================================================
// truncate_chars
// ============================================================

#[test]
fn truncate_short_string_unchanged() {
    assert_eq!(truncate_chars("gm", 10), "gm");
}

#[test]
fn truncate_exact_length_unchanged() {
    assert_eq!(truncate_chars("hello", 5), "hello");
}

#[test]
fn truncate_adds_ellipsis() {
    assert_eq!(truncate_chars("hello world", 5), "hello...");
}

#[test]
fn truncate_multibyte_safe() {
    assert_eq!(truncate_chars("🟣🟣🟣🟣", 2), "🟣🟣...");
    assert_eq!(truncate_chars("café au lait", 4), "café...");
}
