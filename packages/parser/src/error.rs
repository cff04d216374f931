use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Every markup authoring mistake surfaces as a `ParseError`. The message is
/// what the reader of the rendered document sees in place of the content.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("Unexpected content start: '{{' does not follow a command")]
    UnexpectedContentStart,

    #[error("Unexpected content end: '}}' without a matching '{{'")]
    UnexpectedContentEnd,

    #[error("Unclosed content for command '{command}'")]
    UnclosedContent { command: String },

    #[error("Invalid option '{key}' for element '{element}'")]
    InvalidOptionKey { element: String, key: String },

    #[error("Duplicate option '{key}' for element '{element}'")]
    DuplicateOption { element: String, key: String },

    #[error("Element '{element}' takes no unnamed option (got '{value}')")]
    MissingDefaultKey { element: String, value: String },

    #[error("Invalid value '{value}' for option '{key}' of element '{element}': {reason}")]
    InvalidOptionValue {
        element: String,
        key: String,
        value: String,
        reason: String,
    },

    #[error("Element '{element}' requires option '{key}'")]
    MissingOption { element: String, key: String },

    #[error("Table content must be a table header, table cell or text, found '{found}'")]
    InvalidTableContent { found: String },

    #[error("Element '{element}' must be placed inside a table, found inside '{parent}'")]
    MisplacedElement { element: String, parent: String },

    #[error("Unset variable '{name}'")]
    UnsetVariable { name: String },

    #[error("Failed to fetch metadata for ids [{}]: {message}", .ids.join(", "))]
    MetadataFetch { ids: Vec<String>, message: String },
}

impl ParseError {
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    pub fn invalid_option_key(element: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidOptionKey {
            element: element.into(),
            key: key.into(),
        }
    }

    pub fn invalid_value(
        element: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOptionValue {
            element: element.into(),
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_option(element: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingOption {
            element: element.into(),
            key: key.into(),
        }
    }

    pub fn unset_variable(name: impl Into<String>) -> Self {
        Self::UnsetVariable { name: name.into() }
    }
}
