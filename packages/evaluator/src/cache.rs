/// Document metadata cache shared across parses.
///
/// Owned by the parser instance rather than living in a global, so tests
/// (and hosts with several workspaces) get independent caches. Entries never
/// expire unless a TTL is configured; `invalidate` drops one id explicitly.
use codex_common::{DocumentRecord, QueryCollection};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry {
    /// `None` records that the lookup answered without this id
    record: Option<DocumentRecord>,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(entry.fetched_at) < ttl,
            None => true,
        }
    }

    /// Ids with no fresh entry, in the order given, without duplicates
    pub async fn missing(&self, ids: &[String]) -> Vec<String> {
        let entries = self.entries.read().await;
        let now = Instant::now();
        let mut missing: Vec<String> = Vec::new();
        for id in ids {
            let fresh = entries
                .get(id)
                .map(|entry| self.is_fresh(entry, now))
                .unwrap_or(false);
            if !fresh && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        missing
    }

    /// Store the answer to a request for `requested`. Requested ids the
    /// answer did not include are cached as misses.
    pub async fn store(&self, requested: &[String], records: Vec<DocumentRecord>) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        for id in requested {
            entries.insert(
                id.clone(),
                CacheEntry {
                    record: None,
                    fetched_at: now,
                },
            );
        }
        for record in records {
            entries.insert(
                record.id.clone(),
                CacheEntry {
                    record: Some(record),
                    fetched_at: now,
                },
            );
        }
        debug!(entries = entries.len(), "Query cache updated");
    }

    pub async fn get(&self, id: &str) -> Option<DocumentRecord> {
        let entries = self.entries.read().await;
        entries.get(id).and_then(|entry| entry.record.clone())
    }

    /// Per-parse collection of every cached record among `ids`
    pub async fn collect<'a>(&self, ids: impl IntoIterator<Item = &'a String>) -> QueryCollection {
        let entries = self.entries.read().await;
        ids.into_iter()
            .filter_map(|id| {
                entries
                    .get(id)
                    .and_then(|entry| entry.record.clone())
                    .map(|record| (id.clone(), record))
            })
            .collect()
    }

    pub async fn invalidate(&self, id: &str) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
