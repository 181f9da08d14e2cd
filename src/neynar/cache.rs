// Short-lived response cache for request deduplication.
//
// Repeated lookups for the same key inside the TTL reuse the first answer
// instead of hitting Neynar again. Expired entries are dropped when their
// key is read and swept from the whole map on every insert, so keys that are
// never asked for again do not pile up in a long-running server.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Dedup window for user lookups and cast feeds.
pub const USER_TTL: Duration = Duration::from_secs(60);

/// Dedup window for username search.
pub const SEARCH_TTL: Duration = Duration::from_secs(30);

/// A TTL map shared across clones.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<K, (Instant, V)>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the cached value if it was stored less than `ttl` ago.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let fresh = entries
            .get(key)
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone());
        if fresh.is_none() {
            entries.remove(key);
        }
        fresh
    }

    /// Store `value` under `key`, first sweeping out every expired entry.
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(key, (Instant::now(), value));
    }

    /// Number of stored entries. Expired ones count until the next insert
    /// or a read of their key.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
