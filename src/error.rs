use thiserror::Error;

/// Errors that can occur while constructing the inspector services or
/// while validating request input.
///
/// Unusual Unicode content in an analyzed label is never an error: missing
/// names, unassigned codepoints and unnormalizable strings all resolve to
/// documented defaults or `None` fields in the result. The variants here
/// cover malformed bundled data and caller contract violations only.
#[derive(Debug, Error)]
pub enum Error {
    /// One of the bundled JSON data tables failed to parse, or a
    /// materialized result did not match the wire models.
    #[error("malformed data table or result: {0}")]
    DataFormat(#[from] serde_json::Error),

    /// A codepoint key in the bundled name table was not valid hex.
    #[error("invalid codepoint key in name table: {0:?}")]
    BadCodepointKey(String),

    /// A built-in pattern failed to compile.
    #[error(transparent)]
    BadPattern(#[from] regex::Error),

    /// A codepoint has no name in any of the data sources and no default
    /// was supplied.
    #[error("no name for codepoint U+{0:04X}")]
    NameNotFound(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
