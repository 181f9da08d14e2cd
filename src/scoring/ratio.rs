// Follower / following ratio classification.

use serde::{Deserialize, Serialize};

/// A classified follow ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowRatio {
    pub ratio: f64,
    pub label: String,
}

/// Classify an account by followers per account followed.
///
/// Accounts that follow nobody get `ratio = followers` and a plain
/// follower-count label instead of a class.
pub fn classify_follow_ratio(followers: u64, following: u64) -> FollowRatio {
    if following == 0 {
        return FollowRatio {
            ratio: followers as f64,
            label: format!("{followers} followers"),
        };
    }

    let ratio = followers as f64 / following as f64;
    let label = match ratio {
        r if r >= 10.0 => "Influencer",
        r if r >= 2.0 => "Creator",
        r if r >= 1.0 => "Balanced",
        _ => "Networker",
    };

    FollowRatio {
        ratio,
        label: label.to_string(),
    }
}
