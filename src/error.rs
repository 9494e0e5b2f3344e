use thiserror::Error;

/// Which of the three natural-language failures occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    Empty,
    Unrecognized,
    Conflict,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Query is empty")]
    Empty,
    #[error("Unable to parse natural language query: {query}")]
    Unrecognized { query: String },
    #[error("Unsupported phrase '{phrase}' in query: {query}")]
    Unsupported { query: String, phrase: String },
    #[error("Query parsed but resulted in conflicting filters: '{first}' contradicts '{second}' ({detail})")]
    Conflict { first: String, second: String, detail: String },
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::Empty => ParseErrorKind::Empty,
            ParseError::Unrecognized { .. } | ParseError::Unsupported { .. } => ParseErrorKind::Unrecognized,
            ParseError::Conflict { .. } => ParseErrorKind::Conflict,
        }
    }
}

#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("String already exists in the system: {0}")]
    Duplicate(String),
    #[error("String does not exist in the system: {0}")]
    NotFound(String),
    #[error("Missing 'value' field")]
    MissingValue,
    #[error("Invalid data type for 'value' (must be string)")]
    InvalidValue,
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

impl SieveError {
    pub fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter { name: name.to_string(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, SieveError>;

// Helper conversions
impl From<rusqlite::Error> for SieveError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<serde_json::Error> for SieveError {
    fn from(e: serde_json::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<config::ConfigError> for SieveError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for SieveError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
