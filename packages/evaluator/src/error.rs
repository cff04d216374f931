use codex_parser::ParseError;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failure of a whole parse. Only `Parse` is an authoring mistake; anything
/// else is a host or programming failure.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unexpected error while rendering markup: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            PipelineError::Parse(err) => Some(err),
            PipelineError::Unexpected(_) => None,
        }
    }
}
