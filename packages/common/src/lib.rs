pub mod document;
pub mod error;
pub mod lookup;
pub mod metadata;

pub use document::{DocumentRecord, DocumentType};
pub use error::LookupError;
pub use lookup::{LookupResponse, MetadataLookup, StaticLookup};
pub use metadata::{Metadata, QueryCollection, VariableMap, VariablesCollection};
