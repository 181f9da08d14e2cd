// Neynar HTTP client: authenticated GETs against the Farcaster v2 API.
//
// Every request carries the `x-api-key` header. A 404 is reported as
// `Ok(None)` so callers can tell "not found" apart from a failed request.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{
    BulkUsersResponse, CastsResponse, ChannelsResponse, NeynarCast, NeynarChannel, NeynarUser,
    SearchResponse, UserResponse,
};

/// Default Neynar API base URL.
pub const DEFAULT_NEYNAR_API_URL: &str = "https://api.neynar.com/v2/farcaster";

/// Default number of casts fetched per account.
pub const DEFAULT_CAST_LIMIT: usize = 25;

/// Largest page the user-casts feed accepts.
pub const MAX_CAST_LIMIT: usize = 150;

/// Default and maximum number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Thin reqwest wrapper around the Neynar REST API.
#[derive(Clone)]
pub struct NeynarClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NeynarClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("activity-tracker/0.1 (engagement-analytics)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// GET `path` with query `params` and deserialize the JSON body.
    ///
    /// Returns `Ok(None)` on 404 and an error for any other non-success status.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "Neynar GET request");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Neynar request failed: {path}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Neynar {path} returned {status}: {body}");
        }

        let body = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize Neynar {path} response"))?;
        Ok(Some(body))
    }

    /// Exact username lookup.
    pub async fn user_by_username(&self, username: &str) -> Result<Option<NeynarUser>> {
        let resp: Option<UserResponse> = self
            .get("user/by_username", &[("username", username)])
            .await?;
        Ok(resp.map(|r| r.user))
    }

    /// Lookup by FID.
    pub async fn user_by_fid(&self, fid: u64) -> Result<Option<NeynarUser>> {
        let fids = fid.to_string();
        let resp: Option<BulkUsersResponse> = self.get("user/bulk", &[("fids", &fids)]).await?;
        Ok(resp.and_then(|r| r.users.into_iter().next()))
    }

    /// An account's most recent top-level casts, newest first.
    pub async fn user_casts(&self, fid: u64, limit: usize) -> Result<Vec<NeynarCast>> {
        let fid = fid.to_string();
        let limit = clamp_cast_limit(limit).to_string();
        let resp: Option<CastsResponse> = self
            .get(
                "feed/user/casts",
                &[("fid", &fid), ("limit", &limit), ("include_replies", "false")],
            )
            .await?;
        Ok(resp.unwrap_or_default().casts)
    }

    /// Fuzzy username search.
    pub async fn search_users(&self, query: &str, limit: usize) -> Result<Vec<NeynarUser>> {
        let limit = clamp_search_limit(limit).to_string();
        let resp: Option<SearchResponse> = self
            .get("user/search", &[("q", query), ("limit", &limit)])
            .await?;
        Ok(resp.unwrap_or_default().result.users)
    }

    /// Channels an account is active in.
    pub async fn user_channels(&self, fid: u64) -> Result<Vec<NeynarChannel>> {
        let fid = fid.to_string();
        let resp: Option<ChannelsResponse> = self.get("user/channels", &[("fid", &fid)]).await?;
        Ok(resp.unwrap_or_default().channels)
    }

    /// Network-wide trending casts.
    pub async fn trending_casts(&self, limit: usize) -> Result<Vec<NeynarCast>> {
        let limit = limit.clamp(1, 10).to_string();
        let resp: Option<CastsResponse> = self.get("feed/trending", &[("limit", &limit)]).await?;
        Ok(resp.unwrap_or_default().casts)
    }
}

/// Clamp a requested cast count to what the feed endpoint accepts.
pub fn clamp_cast_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_CAST_LIMIT)
}

/// Clamp a requested search result count.
pub fn clamp_search_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}
