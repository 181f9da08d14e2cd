// Neynar wire types and their conversions into domain models.
//
// Only the fields the tracker reads are declared; serde ignores the rest.
// Everything optional upstream gets a default so a sparse response still
// deserializes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Post, Profile};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeynarUser {
    pub fid: u64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub pfp_url: String,
    #[serde(default)]
    pub profile: NeynarUserProfile,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub power_badge: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeynarUserProfile {
    #[serde(default)]
    pub bio: NeynarBio,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeynarBio {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeynarCast {
    pub hash: String,
    pub author: NeynarUser,
    #[serde(default)]
    pub text: String,
    /// RFC 3339 publish time.
    pub timestamp: String,
    #[serde(default)]
    pub reactions: NeynarReactions,
    #[serde(default)]
    pub replies: NeynarReplies,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeynarReactions {
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub recasts_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeynarReplies {
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeynarChannel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub follower_count: u64,
}

// -- Response envelopes --

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: NeynarUser,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkUsersResponse {
    #[serde(default)]
    pub users: Vec<NeynarUser>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CastsResponse {
    #[serde(default)]
    pub casts: Vec<NeynarCast>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: SearchResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub users: Vec<NeynarUser>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelsResponse {
    #[serde(default)]
    pub channels: Vec<NeynarChannel>,
}

// -- Conversions --

impl From<NeynarUser> for Profile {
    fn from(user: NeynarUser) -> Self {
        Profile {
            id: user.fid,
            handle: user.username,
            display_name: user.display_name,
            avatar_url: user.pfp_url,
            bio: user.profile.bio.text,
            follower_count: user.follower_count,
            following_count: user.following_count,
            has_notability_badge: user.power_badge,
        }
    }
}

impl TryFrom<NeynarCast> for Post {
    type Error = anyhow::Error;

    fn try_from(cast: NeynarCast) -> Result<Self> {
        let timestamp = DateTime::parse_from_rfc3339(&cast.timestamp)
            .with_context(|| format!("Invalid timestamp on cast {}", cast.hash))?
            .with_timezone(&Utc);

        Ok(Post {
            id: cast.hash,
            author_id: cast.author.fid,
            author_handle: cast.author.username,
            author_avatar_url: cast.author.pfp_url,
            text: cast.text,
            timestamp,
            like_count: cast.reactions.likes_count,
            recast_count: cast.reactions.recasts_count,
            reply_count: cast.replies.count,
        })
    }
}
