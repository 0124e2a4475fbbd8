use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where in the registry document a validation failure was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAt {
    Registry,
    /// A command entry, with its index when validated inside the
    /// `commands` sequence.
    Command(Option<usize>),
}

impl fmt::Display for ValueAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueAt::Registry => f.write_str("Registry"),
            ValueAt::Command(None) => f.write_str("Command"),
            ValueAt::Command(Some(index)) => write!(f, "Command at index {index}"),
        }
    }
}

/// A required command field together with the violation message it
/// produces. The url requirement only applies to the `github` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Author,
    Description,
    Type,
    Url,
}

impl RequiredField {
    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Author => "author",
            RequiredField::Description => "description",
            RequiredField::Type => "type",
            RequiredField::Url => "url",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Name => f.write_str("must have a non-empty name"),
            RequiredField::Author => f.write_str("must have a non-empty author"),
            RequiredField::Description => f.write_str("must have a non-empty description"),
            RequiredField::Type => f.write_str("must have a type"),
            RequiredField::Url => f.write_str("with type \"github\" must have a non-empty url"),
        }
    }
}

/// Schema violations produced by the pure validator. Field checks run in
/// a fixed order (name, author, description, type) and the first
/// violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must be an object")]
    InvalidShape(ValueAt),

    #[error("Registry must have a 'commands' array")]
    MissingCommandsArray,

    #[error("{at} {field}")]
    MissingField { at: ValueAt, field: RequiredField },

    #[error("{at} has invalid type \"{value}\". Must be \"registry_entry\" or \"github\"")]
    InvalidType { at: ValueAt, value: String },

    #[error("Duplicate command names found: {}", .names.join(", "))]
    DuplicateNames { names: Vec<String> },
}

/// HTTP status line of a non-success registry response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatus {
    pub code: u16,
    pub text: String,
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

fn status_suffix(status: &Option<HttpStatus>) -> String {
    match status {
        Some(status) => format!(": {status}"),
        None => String::new(),
    }
}

/// Failures surfaced by the registry loader. Validation failures keep
/// the descriptor of whichever source produced the document.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// The local registry document could not be read or parsed.
    #[error("Failed to parse registry from {descriptor}")]
    ParseFailed {
        descriptor: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Registry validation failed for {descriptor}: {error}")]
    Validation {
        descriptor: String,
        #[source]
        error: ValidationError,
    },

    /// A non-success response, or a fetched body that could not be
    /// parsed (no status line in that case, the cause carries the
    /// parse failure).
    #[error("Failed to fetch registry from {url}{}", status_suffix(.status))]
    FetchFailed {
        url: String,
        status: Option<HttpStatus>,
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Network request failed for {url}")]
    Request {
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error(
        "Registry must be loaded asynchronously in production mode. Use RegistryLoader::load_async instead."
    )]
    AsyncRequired,
}
