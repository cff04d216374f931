/// The markup pipeline: parse, validate, resolve queries, build.
///
/// [`MarkupParser::render`] is the only place errors are caught. Authoring
/// mistakes become an inline error node; anything else is surfaced in dev
/// mode and replaced by a generic error node otherwise.
use crate::builder::ComponentBuilder;
use crate::cache::QueryCache;
use crate::config::ParserConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::query::resolve_queries;
use crate::validator::validate_tree;
use crate::vdom::VNode;
use codex_common::{Metadata, MetadataLookup};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, instrument, warn};

/// Shown in place of content when rendering fails for a reason the author
/// cannot fix
pub const GENERIC_ERROR_MESSAGE: &str = "Unable to render content";

pub struct MarkupParser<L: MetadataLookup> {
    lookup: L,
    cache: QueryCache,
    config: ParserConfig,
}

impl<L: MetadataLookup> MarkupParser<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_config(lookup, ParserConfig::default())
    }

    pub fn with_config(lookup: L, config: ParserConfig) -> Self {
        let cache = match config.cache_ttl() {
            Some(ttl) => QueryCache::with_ttl(ttl),
            None => QueryCache::new(),
        };
        Self { lookup, cache, config }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Run the whole pipeline on one markup field, without catching errors.
    ///
    /// Resolved documents are added to `metadata.queries`; variables bound by
    /// `\set` land in `metadata.variables[variables_key]`.
    #[instrument(skip(self, source, metadata), fields(len = source.len()))]
    pub async fn parse(
        &self,
        source: &str,
        variables_key: &str,
        metadata: &mut Metadata,
    ) -> PipelineResult<Option<VNode>> {
        let mut root = codex_parser::parse(source, variables_key, metadata)?;

        let queries = validate_tree(&mut root)?;
        debug!(queries = queries.len(), "Validation complete");

        let resolved = resolve_queries(&queries, &self.cache, &self.lookup).await?;
        debug!(resolved = resolved.len(), "Queries resolved");
        metadata.queries.extend(resolved);

        let node = ComponentBuilder::new(metadata, variables_key).build(&root, None)?;
        Ok(node)
    }

    /// Parse and catch: the entry point for hosts
    pub async fn render(
        &self,
        source: &str,
        variables_key: &str,
        metadata: &mut Metadata,
    ) -> PipelineResult<Option<VNode>> {
        match self.parse(source, variables_key, metadata).await {
            Ok(node) => Ok(node),
            Err(PipelineError::Parse(err)) => {
                warn!(variables_key, error = %err, "Markup failed to parse");
                Ok(Some(VNode::error(err.to_string())))
            }
            Err(err) if self.config.dev_mode => Err(err),
            Err(err) => {
                error!(variables_key, error = ?err, "Unexpected failure while rendering markup");
                Ok(Some(VNode::error(GENERIC_ERROR_MESSAGE)))
            }
        }
    }

    /// Render a [`VNode::Deferred`] left by a toggle or a linked document.
    /// Other nodes are returned as they are.
    ///
    /// Deferred content of a linked document is parsed against that
    /// document's own fields.
    pub async fn expand_deferred(&self, node: &VNode, metadata: &mut Metadata) -> PipelineResult<Option<VNode>> {
        let VNode::Deferred {
            source,
            variables_key,
            document,
        } = node
        else {
            return Ok(Some(node.clone()));
        };

        match document {
            None => self.render(source, variables_key, metadata).await,
            Some(id) => match metadata.query(id) {
                Some(record) => {
                    let mut scoped = Metadata::from_fields(record.metadata.clone());
                    self.render(source, variables_key, &mut scoped).await
                }
                None => {
                    warn!(document = %id, "Deferred content refers to a document that is not loaded");
                    Ok(Some(VNode::error(format!("Document '{}' is not loaded", id))))
                }
            },
        }
    }

    /// Render into a slot, dropping the result if a newer render started
    /// meanwhile. Returns whether the result was committed.
    pub async fn render_into(
        &self,
        slot: &RenderSlot,
        source: &str,
        variables_key: &str,
        metadata: &mut Metadata,
    ) -> PipelineResult<bool> {
        let generation = slot.begin();
        let node = self.render(source, variables_key, metadata).await?;
        Ok(slot.commit(generation, node))
    }
}

/// Holds the latest rendered output of one markup field. Each render takes
/// a generation from [`RenderSlot::begin`]; only the newest one may commit.
#[derive(Debug, Default)]
pub struct RenderSlot {
    started: AtomicU64,
    current: Mutex<Committed>,
}

#[derive(Debug, Default)]
struct Committed {
    generation: u64,
    node: Option<VNode>,
}

impl RenderSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.started.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn commit(&self, generation: u64, node: Option<VNode>) -> bool {
        if generation < self.started.load(Ordering::SeqCst) {
            debug!(generation, "Discarding stale render");
            return false;
        }
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if generation <= current.generation {
            return false;
        }
        current.generation = generation;
        current.node = node;
        true
    }

    pub fn current(&self) -> Option<VNode> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .node
            .clone()
    }

    /// Generation of the committed output, 0 before the first commit
    pub fn generation(&self) -> u64 {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }
}
