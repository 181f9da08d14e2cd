// Post feed provider: the data source the engine's callers consume.
//
// The trait never returns errors. A failed or empty upstream answer comes
// back as `None` / an empty list, which the engine already treats as a
// legitimate zero-data input.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::cache::{TtlCache, SEARCH_TTL, USER_TTL};
use super::client::{clamp_cast_limit, clamp_search_limit, NeynarClient};
use super::username::{normalize_username, strip_at};
use crate::models::{Post, Profile};

/// Source of profiles and casts.
#[async_trait]
pub trait PostFeedProvider: Send + Sync {
    /// Exact lookup of an already-normalized username.
    async fn lookup_username(&self, username: &str) -> Option<Profile>;

    /// Lookup by account id (FID).
    async fn user_by_id(&self, id: u64) -> Option<Profile>;

    /// Most recent casts for an account, newest first.
    async fn recent_posts(&self, id: u64, limit: usize) -> Vec<Post>;

    /// Fuzzy search over usernames.
    async fn search_users(&self, query: &str, limit: usize) -> Vec<Profile>;

    /// Resolve free-form user input to a profile.
    ///
    /// Tries, in order: exact lookup of the normalized name, the top fuzzy
    /// search hit for the normalized name, and exact lookup of the input
    /// with only the `@` removed. The first hit wins.
    async fn resolve_user(&self, username: &str) -> Option<Profile> {
        let normalized = normalize_username(username);
        if normalized.is_empty() {
            return None;
        }

        if let Some(profile) = self.lookup_username(&normalized).await {
            return Some(profile);
        }

        debug!(username = %normalized, "Direct lookup missed, trying search");
        if let Some(profile) = self.search_users(&normalized, 1).await.into_iter().next() {
            return Some(profile);
        }

        let raw = strip_at(username.trim());
        if !raw.is_empty() && raw != normalized {
            debug!(username = %raw, "Search missed, trying un-normalized lookup");
            return self.lookup_username(raw).await;
        }

        None
    }
}

/// Neynar-backed provider with short-lived request deduplication.
///
/// Answers (including "not found") are reused for the TTL of their cache.
/// Failed requests are not stored. Deduplication only covers requests made
/// one after another: concurrent misses for the same key each reach Neynar,
/// and the last answer to arrive is the one kept.
pub struct NeynarProvider {
    client: NeynarClient,
    users: TtlCache<String, Option<Profile>>,
    users_by_id: TtlCache<u64, Option<Profile>>,
    casts: TtlCache<(u64, usize), Vec<Post>>,
    searches: TtlCache<(String, usize), Vec<Profile>>,
}

impl NeynarProvider {
    pub fn new(client: NeynarClient) -> Self {
        Self {
            client,
            users: TtlCache::new(USER_TTL),
            users_by_id: TtlCache::new(USER_TTL),
            casts: TtlCache::new(USER_TTL),
            searches: TtlCache::new(SEARCH_TTL),
        }
    }

    /// The underlying HTTP client, for endpoints outside the provider trait.
    pub fn client(&self) -> &NeynarClient {
        &self.client
    }
}

#[async_trait]
impl PostFeedProvider for NeynarProvider {
    async fn lookup_username(&self, username: &str) -> Option<Profile> {
        let key = username.to_string();
        if let Some(hit) = self.users.get(&key).await {
            return hit;
        }

        match self.client.user_by_username(username).await {
            Ok(user) => {
                let profile = user.map(Profile::from);
                self.users.insert(key, profile.clone()).await;
                profile
            }
            Err(e) => {
                warn!(username = username, error = %e, "User lookup failed");
                None
            }
        }
    }

    async fn user_by_id(&self, id: u64) -> Option<Profile> {
        if let Some(hit) = self.users_by_id.get(&id).await {
            return hit;
        }

        match self.client.user_by_fid(id).await {
            Ok(user) => {
                let profile = user.map(Profile::from);
                self.users_by_id.insert(id, profile.clone()).await;
                profile
            }
            Err(e) => {
                warn!(fid = id, error = %e, "User lookup by FID failed");
                None
            }
        }
    }

    async fn recent_posts(&self, id: u64, limit: usize) -> Vec<Post> {
        let key = (id, clamp_cast_limit(limit));
        if let Some(hit) = self.casts.get(&key).await {
            return hit;
        }

        let casts = match self.client.user_casts(id, limit).await {
            Ok(casts) => casts,
            Err(e) => {
                warn!(fid = id, error = %e, "Cast fetch failed");
                return Vec::new();
            }
        };

        let posts: Vec<Post> = casts
            .into_iter()
            .filter_map(|cast| match Post::try_from(cast) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!(fid = id, error = %e, "Skipping malformed cast");
                    None
                }
            })
            .collect();

        info!(fid = id, count = posts.len(), "Collected casts for analysis");
        self.casts.insert(key, posts.clone()).await;
        posts
    }

    async fn search_users(&self, query: &str, limit: usize) -> Vec<Profile> {
        let key = (query.to_string(), clamp_search_limit(limit));
        if let Some(hit) = self.searches.get(&key).await {
            return hit;
        }

        match self.client.search_users(query, limit).await {
            Ok(users) => {
                let profiles: Vec<Profile> = users.into_iter().map(Profile::from).collect();
                self.searches.insert(key, profiles.clone()).await;
                profiles
            }
            Err(e) => {
                warn!(query = query, error = %e, "User search failed");
                Vec::new()
            }
        }
    }
}
