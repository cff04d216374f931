//! # Codex markup evaluator
//!
//! Takes the [`codex_parser::ParseNode`] tree of a markup field and turns it
//! into a [`VNode`] tree the host can render:
//!
//! 1. bind and validate element options ([`validator`]), collecting the
//!    documents the tree references
//! 2. resolve those references in one batched lookup, through a cache
//!    ([`query`], [`cache`])
//! 3. build components ([`builder`], [`elements`])
//!
//! [`MarkupParser`] runs the whole pipeline and owns the cache.

pub mod builder;
pub mod cache;
pub mod config;
pub mod elements;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod query;
pub mod registry;
pub mod validator;
pub mod vdom;

#[cfg(test)]
mod tests_elements;

#[cfg(test)]
mod tests_pipeline;

pub use builder::ComponentBuilder;
pub use cache::QueryCache;
pub use config::{ParserConfig, DEFAULT_CONFIG_NAME};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{MarkupParser, RenderSlot, GENERIC_ERROR_MESSAGE};
pub use query::{merge_queries, Queries, QueryKind};
pub use registry::{registry, ElementDescriptor, Registry};
pub use validator::{bind_options, validate_tree};
pub use vdom::VNode;
