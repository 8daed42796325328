use thiserror::Error;

/// Errors raised while reading or writing OFX documents.
///
/// Malformed document structure is not an error: the readers report it as `None`, and value
/// accessors fall back to defaults.
#[derive(Debug, Error)]
pub enum Error {
    #[error("token exceeds the maximum length of {limit} characters")]
    TokenTooLong { limit: usize },
    #[error("no property converter registered for `{0}`")]
    UnsupportedType(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("formatting error")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
