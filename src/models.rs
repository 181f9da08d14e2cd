// Domain models: the plain values every other module works with.
//
// Separate from the Neynar wire types. Conversions live in `neynar::models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single cast (post) with its reaction counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Cast hash, stable across fetches.
    pub id: String,
    /// FID of the author.
    pub author_id: u64,
    pub author_handle: String,
    pub author_avatar_url: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub like_count: u64,
    pub recast_count: u64,
    pub reply_count: u64,
}

impl Post {
    /// Likes + recasts + replies.
    pub fn engagement(&self) -> u64 {
        self.like_count + self.recast_count + self.reply_count
    }
}

/// A Farcaster account profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// FID.
    pub id: u64,
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    /// Neynar "power badge". Displayed only.
    pub has_notability_badge: bool,
}
