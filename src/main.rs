use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::{info, warn};

use activity_tracker::config::Config;
use activity_tracker::models::Post;
use activity_tracker::neynar::client::{NeynarClient, DEFAULT_SEARCH_LIMIT};
use activity_tracker::neynar::provider::{NeynarProvider, PostFeedProvider};
use activity_tracker::output::{format, terminal, truncate_chars};
use activity_tracker::pipeline::leaderboard;
use activity_tracker::prefs::notifications::{
    reminder_due, GoalSnapshot, Goals, Notification, NotificationPermission, Notifier,
    PreferenceKind, UpdateOutcome, WeeklySummary,
};
use activity_tracker::prefs::store::{JsonFileStore, KeyValueStore};
use activity_tracker::report::EngagementReport;
use activity_tracker::share;

/// Activity Tracker: engagement analytics for Farcaster.
///
/// Pulls an account's recent casts and turns them into stats, a 0-100
/// engagement score, growth goals and shareable cards.
#[derive(Parser)]
#[command(name = "activity-tracker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full engagement report for an account
    Stats {
        /// Username, with or without @ and .eth suffix
        username: String,

        /// Number of recent casts to analyze (1-150)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the report as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Print just the engagement score and its breakdown
    Score {
        username: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search Farcaster users by name
    Search {
        query: String,

        /// Max results (1-100)
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Score several accounts and rank them
    Leaderboard {
        /// Usernames to compare
        #[arg(required = true)]
        usernames: Vec<String>,

        /// Number of accounts to score in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Build the share cast and frame links for an account
    Share { username: String },

    /// List the channels an account is active in
    Channels { username: String },

    /// Show network-wide trending casts
    Trending {
        /// Number of casts (1-10)
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show or change notification preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Set engagement goals or check an account against them
    Goals {
        #[command(subcommand)]
        action: GoalsAction,
    },

    /// Emit today's activity reminder (and a weekly summary if a username is given)
    Remind {
        username: Option<String>,

        /// Send even outside the 09:00 reminder hour
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 3000, or $PORT)
        #[arg(long, env = "PORT", default_value = "3000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print current preferences and permission
    Show,

    /// Enable or disable one notification type (reminders, summary, goals)
    Set {
        kind: PreferenceKind,

        /// on or off
        #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Record the notification permission (granted, denied, default)
    Permission { permission: NotificationPermission },
}

#[derive(Subcommand)]
enum GoalsAction {
    /// Show saved goals
    Show,

    /// Save goal targets. Omitted targets are cleared.
    Set {
        #[arg(long)]
        followers: Option<u64>,

        #[arg(long)]
        likes: Option<u64>,

        #[arg(long)]
        posts: Option<u64>,
    },

    /// Compare an account's current numbers against the saved goals
    Check { username: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("activity_tracker=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Stats {
            username,
            limit,
            json,
        } => {
            let provider = build_provider(&config)?;
            let report = fetch_report(&provider, &username, limit.unwrap_or(config.cast_limit))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report, Utc::now());
            }
        }

        Commands::Score { username, limit } => {
            let provider = build_provider(&config)?;
            let report = fetch_report(&provider, &username, limit.unwrap_or(config.cast_limit))
                .await?;
            let b = &report.breakdown;
            println!(
                "@{}: {}/100 ({})",
                report.profile.handle,
                report.score.to_string().bold(),
                report.score_tier
            );
            println!("  {}", report.score_tier_description.dimmed());
            println!(
                "  {} posts in the last 30 days. Reply {:.1}, engagement {:.1}, consistency {:.1}, likes {:.1}, topics {:.1}",
                b.recent_posts,
                b.reply_frequency,
                b.average_engagement,
                b.posting_consistency,
                b.like_ratio,
                b.topic_relevance,
            );
        }

        Commands::Search { query, limit } => {
            let provider = build_provider(&config)?;
            let users = provider.search_users(query.trim(), limit).await;
            terminal::display_profiles(&users);
        }

        Commands::Leaderboard {
            usernames,
            concurrency,
            limit,
        } => {
            let provider = build_provider(&config)?;
            println!(
                "Scoring {} accounts ({} concurrent)...",
                usernames.len(),
                concurrency
            );
            let board = leaderboard::run(
                &provider,
                &usernames,
                limit.unwrap_or(config.cast_limit),
                concurrency,
                Utc::now(),
                true,
            )
            .await;
            terminal::display_leaderboard(&board.entries);
            if !board.missing.is_empty() {
                println!(
                    "\n  {} not found: {}",
                    "Warning:".yellow(),
                    board.missing.join(", ")
                );
            }
        }

        Commands::Share { username } => {
            let provider = build_provider(&config)?;
            let report = fetch_report(&provider, &username, config.cast_limit).await?;
            let score = report.card_score;
            let tier = report.share_tier;
            let text = share::share_text(score, &report.top_supporters);
            let frame = share::frame_url(&config.app_url, &report.profile.handle, score, tier.as_str());

            println!("{}\n", text);
            println!("  Share tier:  {} ({})", tier, tier.description());
            println!("  Frame:       {frame}");
            println!("  Compose:     {}", share::compose_url_with_frame(&text, &frame));
        }

        Commands::Channels { username } => {
            let provider = build_provider(&config)?;
            let profile = resolve(&provider, &username).await?;
            let channels = provider
                .client()
                .user_channels(profile.id)
                .await
                .context("Failed to fetch channels")?;
            if channels.is_empty() {
                println!("@{} isn't active in any channels.", profile.handle);
            }
            for c in &channels {
                println!(
                    "  /{:<20} {:>8} followers  {}",
                    c.id,
                    format::format_number(c.follower_count),
                    truncate_chars(&c.description, 60).dimmed()
                );
            }
        }

        Commands::Trending { limit } => {
            let provider = build_provider(&config)?;
            let casts = provider
                .client()
                .trending_casts(limit)
                .await
                .context("Failed to fetch trending casts")?;
            let now = Utc::now();
            for cast in casts {
                match Post::try_from(cast) {
                    Ok(post) => println!(
                        "  @{:<20} {:>5} engagement  {:>8}  {}",
                        post.author_handle,
                        post.engagement(),
                        format::format_relative_time(post.timestamp, now),
                        truncate_chars(&post.text, 70)
                    ),
                    Err(e) => warn!(error = %e, "Skipping malformed trending cast"),
                }
            }
        }

        Commands::Prefs { action } => {
            let notifier = open_notifier(&config, None);
            match action {
                PrefsAction::Show => {
                    let prefs = notifier.preferences()?;
                    println!("Preferences ({})", config.prefs_path.display());
                    println!("  permission:        {}", notifier.permission()?.as_str());
                    for kind in [
                        PreferenceKind::ActivityReminders,
                        PreferenceKind::WeeklySummary,
                        PreferenceKind::GoalAlerts,
                    ] {
                        let state = if prefs.get(kind) { "on".green() } else { "off".dimmed() };
                        println!("  {:<18} {}", format!("{}:", kind.describe()), state);
                    }
                }
                PrefsAction::Set { kind, enabled } => {
                    match notifier.update_preference(kind, enabled)? {
                        UpdateOutcome::PermissionRequired => {
                            println!(
                                "{} Notifications are not permitted. Run `activity-tracker prefs permission granted` first.",
                                "Warning:".yellow()
                            );
                        }
                        UpdateOutcome::Saved { confirmation } => {
                            println!(
                                "Turned {} {}.",
                                kind.describe(),
                                if enabled { "on" } else { "off" }
                            );
                            if let Some(n) = confirmation {
                                print_notification(&n);
                            }
                        }
                    }
                }
                PrefsAction::Permission { permission } => {
                    notifier.set_permission(permission)?;
                    println!("Notification permission: {}", permission.as_str());
                }
            }
        }

        Commands::Goals { action } => {
            let notifier = open_notifier(&config, None);
            match action {
                GoalsAction::Show => {
                    let goals = notifier.goals()?;
                    println!("  followers: {}", show_goal(goals.followers));
                    println!("  likes:     {}", show_goal(goals.likes));
                    println!("  posts:     {}", show_goal(goals.posts));
                }
                GoalsAction::Set {
                    followers,
                    likes,
                    posts,
                } => {
                    notifier.set_goals(&Goals {
                        followers,
                        likes,
                        posts,
                    })?;
                    println!("Goals saved.");
                }
                GoalsAction::Check { username } => {
                    let provider = build_provider(&config)?;
                    let report = fetch_report(&provider, &username, config.cast_limit).await?;
                    let snapshot = GoalSnapshot {
                        followers: report.profile.follower_count,
                        likes: report.stats.total_likes,
                        posts: report.posts_analyzed as u64,
                    };
                    let alerts = notifier.check_goals(&snapshot)?;
                    if alerts.is_empty() {
                        println!("No goals reached yet (or goal alerts are off).");
                    }
                    for n in &alerts {
                        print_notification(n);
                    }
                }
            }
        }

        Commands::Remind { username, force } => {
            let now = Local::now().naive_local();
            let notifier = open_notifier(&config, username.clone());

            if force || reminder_due(now) {
                match notifier.activity_reminder(now)? {
                    Some(n) => print_notification(&n),
                    None => info!("No activity reminder due"),
                }
            } else {
                info!("Outside the reminder hour, skipping activity reminder");
            }

            if let Some(username) = username {
                let provider = build_provider(&config)?;
                let report = fetch_report(&provider, &username, config.cast_limit).await?;
                let summary = WeeklySummary {
                    followers: report.profile.follower_count,
                    likes: report.stats.total_likes,
                    posts: report.stats.weekly_posts,
                    engagement_rate: report.stats.engagement_rate,
                };
                if let Some(n) = notifier.weekly_summary(&summary)? {
                    print_notification(&n);
                }
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let provider: Arc<dyn PostFeedProvider> = Arc::new(build_provider(&config)?);
            activity_tracker::web::run_server(config, provider, port, &bind).await?;
        }
    }

    Ok(())
}

fn build_provider(config: &Config) -> Result<NeynarProvider> {
    config.require_api_key()?;
    let client = NeynarClient::new(&config.neynar_api_url, &config.neynar_api_key)?;
    Ok(NeynarProvider::new(client))
}

async fn resolve(
    provider: &NeynarProvider,
    username: &str,
) -> Result<activity_tracker::models::Profile> {
    provider
        .resolve_user(username)
        .await
        .with_context(|| format!("User {username:?} not found on Farcaster"))
}

async fn fetch_report(
    provider: &NeynarProvider,
    username: &str,
    limit: usize,
) -> Result<EngagementReport> {
    let profile = resolve(provider, username).await?;
    let posts = provider.recent_posts(profile.id, limit).await;
    if posts.is_empty() {
        warn!(handle = %profile.handle, "No casts found, report will be empty");
    }
    Ok(EngagementReport::build(profile, &posts, Utc::now()))
}

fn open_notifier(config: &Config, username: Option<String>) -> Notifier {
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.prefs_path));
    Notifier::new(store, username)
}

fn print_notification(n: &Notification) {
    println!("\n  {} {}", format!("[{}]", n.kind).dimmed(), n.title.bold());
    println!("  {}", n.body);
}

fn show_goal(goal: Option<u64>) -> String {
    match goal {
        Some(t) if t > 0 => format::format_number(t),
        _ => "not set".dimmed().to_string(),
    }
}

fn parse_switch(raw: &str) -> std::result::Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("expected on or off, got {raw:?}")),
    }
}
