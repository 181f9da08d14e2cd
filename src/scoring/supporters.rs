// Top supporters: the highest-engagement distinct authors in a feed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Post;

/// Default number of supporters shown on share cards.
pub const TOP_SUPPORTER_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supporter {
    pub id: u64,
    pub handle: String,
    pub avatar_url: String,
    pub engagement: u64,
}

/// Pick up to `n` distinct authors ranked by cast engagement.
///
/// Each author is represented by their first cast in input order. The
/// sort is stable, so equal engagement keeps input order.
pub fn top_supporters(posts: &[Post], n: usize) -> Vec<Supporter> {
    let mut seen = HashSet::new();
    let mut supporters: Vec<Supporter> = posts
        .iter()
        .filter(|p| seen.insert(p.author_id))
        .map(|p| Supporter {
            id: p.author_id,
            handle: p.author_handle.clone(),
            avatar_url: p.author_avatar_url.clone(),
            engagement: p.engagement(),
        })
        .collect();

    supporters.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    supporters.truncate(n);
    supporters
}
