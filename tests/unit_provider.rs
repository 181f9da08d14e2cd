// Tests for the provider layer: username resolution fallbacks against an
// in-memory provider, Neynar wire-format parsing, limit clamping, and the
// concurrent leaderboard pipeline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use activity_tracker::models::{Post, Profile};
use activity_tracker::neynar::client::{clamp_cast_limit, clamp_search_limit, NeynarClient};
use activity_tracker::neynar::models::{CastsResponse, NeynarCast, SearchResponse, UserResponse};
use activity_tracker::neynar::provider::{NeynarProvider, PostFeedProvider};
use activity_tracker::neynar::username::normalize_username;
use activity_tracker::pipeline::leaderboard;
use activity_tracker::scoring::tier::ScoreTier;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn profile(id: u64, handle: &str) -> Profile {
    Profile {
        id,
        handle: handle.to_string(),
        display_name: handle.to_uppercase(),
        avatar_url: String::new(),
        bio: String::new(),
        follower_count: 100,
        following_count: 50,
        has_notability_badge: false,
    }
}

/// In-memory provider that records every call it receives.
#[derive(Default)]
struct FakeProvider {
    users: HashMap<String, Profile>,
    search_hits: HashMap<String, Profile>,
    posts: HashMap<u64, Vec<Post>>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with_user(mut self, key: &str, p: Profile) -> Self {
        self.users.insert(key.to_string(), p);
        self
    }

    fn with_search(mut self, query: &str, p: Profile) -> Self {
        self.search_hits.insert(query.to_string(), p);
        self
    }

    fn with_posts(mut self, id: u64, posts: Vec<Post>) -> Self {
        self.posts.insert(id, posts);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostFeedProvider for FakeProvider {
    async fn lookup_username(&self, username: &str) -> Option<Profile> {
        self.calls.lock().unwrap().push(format!("lookup:{username}"));
        self.users.get(username).cloned()
    }

    async fn user_by_id(&self, id: u64) -> Option<Profile> {
        self.users.values().find(|p| p.id == id).cloned()
    }

    async fn recent_posts(&self, id: u64, limit: usize) -> Vec<Post> {
        let mut posts = self.posts.get(&id).cloned().unwrap_or_default();
        posts.truncate(limit);
        posts
    }

    async fn search_users(&self, query: &str, limit: usize) -> Vec<Profile> {
        self.calls.lock().unwrap().push(format!("search:{query}:{limit}"));
        self.search_hits.get(query).cloned().into_iter().collect()
    }
}

// ============================================================
// resolve_user fallback chain
// ============================================================

#[tokio::test]
async fn direct_lookup_wins_first() {
    let provider = FakeProvider::default()
        .with_user("alice", profile(1, "alice"))
        .with_search("alice", profile(99, "alice-impostor"));

    let found = provider.resolve_user("@Alice.eth").await.unwrap();
    assert_eq!(found.id, 1);
    assert_eq!(provider.calls(), vec!["lookup:alice"]);
}

#[tokio::test]
async fn falls_back_to_search_top_hit() {
    let provider = FakeProvider::default().with_search("bob", profile(2, "bob"));

    let found = provider.resolve_user("bob.fc").await.unwrap();
    assert_eq!(found.id, 2);
    assert_eq!(provider.calls(), vec!["lookup:bob", "search:bob:1"]);
}

#[tokio::test]
async fn falls_back_to_raw_name_last() {
    let provider = FakeProvider::default().with_user("Carol.eth", profile(3, "carol.eth"));

    let found = provider.resolve_user("@Carol.eth").await.unwrap();
    assert_eq!(found.id, 3);
    assert_eq!(
        provider.calls(),
        vec!["lookup:carol", "search:carol:1", "lookup:Carol.eth"]
    );
}

#[tokio::test]
async fn skips_raw_lookup_when_already_normalized() {
    let provider = FakeProvider::default();

    assert!(provider.resolve_user("dave").await.is_none());
    assert_eq!(provider.calls(), vec!["lookup:dave", "search:dave:1"]);
}

#[tokio::test]
async fn blank_input_makes_no_calls() {
    let provider = FakeProvider::default();
    assert!(provider.resolve_user("  @ ").await.is_none());
    assert!(provider.calls().is_empty());
}

#[test]
fn normalization_cases() {
    assert_eq!(normalize_username("  @DWR  "), "dwr");
    assert_eq!(normalize_username("v.FARCASTER.ETH"), "v");
    assert_eq!(normalize_username("name.farcaster"), "name");
    assert_eq!(normalize_username("eth"), "eth");
    // Only the first matching suffix is removed.
    assert_eq!(normalize_username("a.fc.eth"), "a.fc");
}

// ============================================================
// Wire format
// ============================================================

const USER_JSON: &str = r#"{
    "user": {
        "object": "user",
        "fid": 3,
        "username": "dwr.eth",
        "display_name": "Dan Romero",
        "pfp_url": "https://example.test/dwr.png",
        "profile": { "bio": { "text": "Working on Farcaster" } },
        "follower_count": 250000,
        "following_count": 2500,
        "power_badge": true,
        "verifications": ["0xabc"]
    }
}"#;

#[test]
fn parses_user_response() {
    let resp: UserResponse = serde_json::from_str(USER_JSON).unwrap();
    let p = Profile::from(resp.user);
    assert_eq!(p.id, 3);
    assert_eq!(p.handle, "dwr.eth");
    assert_eq!(p.bio, "Working on Farcaster");
    assert_eq!(p.follower_count, 250_000);
    assert!(p.has_notability_badge);
}

#[test]
fn sparse_user_gets_defaults() {
    let resp: SearchResponse =
        serde_json::from_str(r#"{"result":{"users":[{"fid":9,"username":"x"}]}}"#).unwrap();
    let p = Profile::from(resp.result.users.into_iter().next().unwrap());
    assert_eq!(p.display_name, "");
    assert_eq!(p.follower_count, 0);
    assert!(!p.has_notability_badge);
}

#[test]
fn parses_casts_into_posts() {
    let json = r#"{
        "casts": [{
            "hash": "0xfeed",
            "author": { "fid": 5, "username": "eve", "pfp_url": "https://example.test/e.png" },
            "text": "gm farcaster",
            "timestamp": "2024-05-30T09:15:00.000Z",
            "reactions": { "likes_count": 12, "recasts_count": 3 },
            "replies": { "count": 4 }
        }],
        "next": { "cursor": null }
    }"#;
    let resp: CastsResponse = serde_json::from_str(json).unwrap();
    let post = Post::try_from(resp.casts.into_iter().next().unwrap()).unwrap();

    assert_eq!(post.id, "0xfeed");
    assert_eq!(post.author_id, 5);
    assert_eq!(post.author_handle, "eve");
    assert_eq!(post.engagement(), 19);
    assert_eq!(
        post.timestamp,
        Utc.with_ymd_and_hms(2024, 5, 30, 9, 15, 0).unwrap()
    );
}

#[test]
fn bad_timestamp_is_rejected() {
    let cast: NeynarCast = serde_json::from_str(
        r#"{"hash":"0x1","author":{"fid":1,"username":"a"},"timestamp":"yesterday"}"#,
    )
    .unwrap();
    assert!(Post::try_from(cast).is_err());
}

#[test]
fn limits_are_clamped() {
    assert_eq!(clamp_cast_limit(0), 1);
    assert_eq!(clamp_cast_limit(25), 25);
    assert_eq!(clamp_cast_limit(1000), 150);
    assert_eq!(clamp_search_limit(0), 1);
    assert_eq!(clamp_search_limit(500), 100);
}

// ============================================================
// Neynar provider caching
// ============================================================

/// Local HTTP/1.1 server that answers every request with the same status
/// and JSON body, counting the requests it serves.
async fn stub_neynar(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), hits)
}

fn neynar_provider(base_url: &str) -> NeynarProvider {
    NeynarProvider::new(NeynarClient::new(base_url, "test-key").unwrap())
}

#[tokio::test]
async fn repeated_lookup_reuses_first_answer() {
    let (base_url, hits) = stub_neynar("200 OK", USER_JSON).await;
    let provider = neynar_provider(&base_url);

    let first = provider.lookup_username("dwr.eth").await.unwrap();
    let second = provider.lookup_username("dwr.eth").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.id, 3);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // A different key is its own cache entry.
    provider.lookup_username("v").await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn not_found_is_remembered() {
    let (base_url, hits) = stub_neynar("404 Not Found", "{}").await;
    let provider = neynar_provider(&base_url);

    assert!(provider.lookup_username("nobody").await.is_none());
    assert!(provider.lookup_username("nobody").await.is_none());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_failures_are_retried() {
    let (base_url, hits) = stub_neynar("500 Internal Server Error", "{}").await;
    let provider = neynar_provider(&base_url);

    assert!(provider.lookup_username("dwr.eth").await.is_none());
    assert!(provider.search_users("dwr", 5).await.is_empty());
    assert!(provider.lookup_username("dwr.eth").await.is_none());
    assert!(provider.search_users("dwr", 5).await.is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

// ============================================================
// Leaderboard pipeline
// ============================================================

fn cast(id: &str, author: u64, text: &str, likes: u64, replies: u64) -> Post {
    Post {
        id: id.to_string(),
        author_id: author,
        author_handle: format!("fan{author}"),
        author_avatar_url: String::new(),
        text: text.to_string(),
        timestamp: Utc::now() - Duration::hours(3),
        like_count: likes,
        recast_count: 1,
        reply_count: replies,
    }
}

#[tokio::test]
async fn leaderboard_ranks_and_reports_missing() {
    let provider = FakeProvider::default()
        .with_user("quiet", profile(10, "quiet"))
        .with_user("loud", profile(11, "loud"))
        .with_posts(10, vec![cast("0x1", 100, "gm", 1, 0)])
        .with_posts(
            11,
            vec![
                cast("0x2", 101, "shipping on base", 20, 4),
                cast("0x3", 102, "farcaster frames", 15, 3),
            ],
        );

    let usernames = vec![
        "quiet".to_string(),
        "ghost".to_string(),
        "loud".to_string(),
    ];
    let board = leaderboard::run(&provider, &usernames, 25, 2, Utc::now(), false).await;

    let handles: Vec<&str> = board.entries.iter().map(|e| e.handle.as_str()).collect();
    assert_eq!(handles, vec!["loud", "quiet"]);
    assert!(board.entries[0].score > board.entries[1].score);
    assert_eq!(board.entries[0].posts_analyzed, 2);
    assert_eq!(board.missing, vec!["ghost"]);
}

#[tokio::test]
async fn leaderboard_with_no_posts_is_starter() {
    let provider = FakeProvider::default().with_user("new", profile(20, "new"));
    let board = leaderboard::run(&provider, &["new".to_string()], 25, 4, Utc::now(), false).await;

    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].score, 0);
    assert_eq!(board.entries[0].tier, ScoreTier::Starter);
}
