use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::neynar::client::{clamp_cast_limit, DEFAULT_CAST_LIMIT, DEFAULT_NEYNAR_API_URL};
use crate::prefs::store::default_prefs_path;
use crate::share::DEFAULT_APP_URL;

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded automatically
/// at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Neynar API key (NEYNAR_API_KEY). Required for any fetch.
    pub neynar_api_key: String,
    /// Neynar API base URL (NEYNAR_API_URL).
    pub neynar_api_url: String,
    /// Public origin used in share and frame links (TRACKER_APP_URL).
    pub app_url: String,
    /// Preference file location (TRACKER_PREFS_PATH).
    pub prefs_path: PathBuf,
    /// Casts fetched per account when no limit is given (TRACKER_CAST_LIMIT).
    pub cast_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the API key, which is only checked
    /// by commands that talk to Neynar.
    pub fn load() -> Result<Self> {
        let cast_limit = match env::var("TRACKER_CAST_LIMIT") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| {
                anyhow::anyhow!("TRACKER_CAST_LIMIT must be a positive integer, got {raw:?}")
            })?,
            Err(_) => DEFAULT_CAST_LIMIT,
        };

        Ok(Self {
            neynar_api_key: env::var("NEYNAR_API_KEY").unwrap_or_default(),
            neynar_api_url: env::var("NEYNAR_API_URL")
                .unwrap_or_else(|_| DEFAULT_NEYNAR_API_URL.to_string()),
            app_url: env::var("TRACKER_APP_URL").unwrap_or_else(|_| DEFAULT_APP_URL.to_string()),
            prefs_path: env::var("TRACKER_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_prefs_path()),
            cast_limit: clamp_cast_limit(cast_limit),
        })
    }

    /// Check that the Neynar API key is configured.
    /// Call this before any operation that fetches profiles or casts.
    pub fn require_api_key(&self) -> Result<()> {
        if self.neynar_api_key.is_empty() {
            anyhow::bail!(
                "NEYNAR_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
