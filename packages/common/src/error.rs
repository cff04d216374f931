use thiserror::Error;

/// Errors raised by lookup implementations shipped with this crate
#[derive(Error, Debug, Clone)]
pub enum LookupError {
    #[error("Lookup transport failed: {0}")]
    Transport(String),
}
