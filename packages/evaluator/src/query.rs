/// Cross-document queries
///
/// Validation of reference-bearing elements yields a [`Queries`] map. After
/// the whole tree is validated the map is resolved in one batched lookup.
use crate::cache::QueryCache;
use crate::error::PipelineResult;
use codex_common::{LookupResponse, MetadataLookup, QueryCollection};
use codex_parser::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

static DOCUMENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// How much of a referenced document a node needs. Ordered: a `Content`
/// query satisfies a `Title` query for the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    Title = 0,
    Content = 1,
}

/// Document id -> richest kind requested
pub type Queries = HashMap<String, QueryKind>;

pub fn single_query(id: impl Into<String>, kind: QueryKind) -> Queries {
    let mut queries = Queries::new();
    queries.insert(id.into(), kind);
    queries
}

/// Key-wise maximum of two query maps
pub fn merge_queries(into: &mut Queries, from: Queries) {
    for (id, kind) in from {
        into.entry(id)
            .and_modify(|existing| *existing = (*existing).max(kind))
            .or_insert(kind);
    }
}

pub fn is_document_id(id: &str) -> bool {
    DOCUMENT_ID.is_match(id)
}

/// Resolve every query through the cache, fetching what the cache lacks in
/// a single request. A failure payload aborts the parse.
#[instrument(skip_all, fields(queries = queries.len()))]
pub async fn resolve_queries(
    queries: &Queries,
    cache: &QueryCache,
    lookup: &dyn MetadataLookup,
) -> PipelineResult<QueryCollection> {
    if queries.is_empty() {
        return Ok(QueryCollection::new());
    }

    let mut wanted: Vec<String> = queries
        .keys()
        .filter(|id| is_document_id(id))
        .cloned()
        .collect();
    wanted.sort();

    let missing = cache.missing(&wanted).await;
    if !missing.is_empty() {
        debug!(ids = ?missing, "Fetching document metadata");
        match lookup.get_many(&missing).await? {
            LookupResponse::Success { records } => {
                debug!(returned = records.len(), "Metadata fetch succeeded");
                cache.store(&missing, records).await;
            }
            LookupResponse::Failure { error } => {
                warn!(ids = ?missing, error = %error, "Metadata fetch failed");
                return Err(ParseError::MetadataFetch {
                    ids: missing,
                    message: error,
                }
                .into());
            }
        }
    }

    Ok(cache.collect(queries.keys()).await)
}
