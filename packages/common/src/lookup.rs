/// The metadata lookup collaborator.
///
/// The markup pipeline never talks to storage directly. Whatever serves
/// document metadata (a REST endpoint, a database, a fixture) implements
/// [`MetadataLookup`] and is handed to the parser.
use crate::document::DocumentRecord;
use crate::error::LookupError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Payload of a batched lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LookupResponse {
    Success { records: Vec<DocumentRecord> },
    Failure { error: String },
}

#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Fetch metadata for every id in one request.
    ///
    /// `Ok(LookupResponse::Failure)` is a well-formed refusal from the
    /// service; `Err` means the request itself could not be made.
    async fn get_many(&self, ids: &[String]) -> anyhow::Result<LookupResponse>;
}

#[derive(Debug, Clone)]
enum Mode {
    Serve,
    Refuse(String),
    Broken(String),
}

/// In-memory lookup backed by a fixed record set. Records every request it
/// receives, which makes it the usual stand-in for the real service in tests.
#[derive(Debug)]
pub struct StaticLookup {
    records: HashMap<String, DocumentRecord>,
    mode: Mode,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            mode: Mode::Serve,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = DocumentRecord>) -> Self {
        let mut lookup = Self::new();
        for record in records {
            lookup.add_record(record);
        }
        lookup
    }

    /// A lookup that answers every request with a failure payload
    pub fn refusing(error: impl Into<String>) -> Self {
        Self {
            mode: Mode::Refuse(error.into()),
            ..Self::new()
        }
    }

    /// A lookup whose transport fails outright
    pub fn broken(error: impl Into<String>) -> Self {
        Self {
            mode: Mode::Broken(error.into()),
            ..Self::new()
        }
    }

    pub fn add_record(&mut self, record: DocumentRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Number of batched requests served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Id lists of every request, in arrival order
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for StaticLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataLookup for StaticLookup {
    async fn get_many(&self, ids: &[String]) -> anyhow::Result<LookupResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(ids.to_vec());
        }
        debug!(ids = ids.len(), "Static lookup request");

        match &self.mode {
            Mode::Serve => Ok(LookupResponse::Success {
                records: ids
                    .iter()
                    .filter_map(|id| self.records.get(id).cloned())
                    .collect(),
            }),
            Mode::Refuse(error) => Ok(LookupResponse::Failure {
                error: error.clone(),
            }),
            Mode::Broken(error) => Err(LookupError::Transport(error.clone()).into()),
        }
    }
}
