use thiserror::Error;

/// Errors raised while binding or running a filter instance.
///
/// None of these ever surface to the host as a panic: configuration errors
/// leave the instance inert with a logged warning, and pattern errors are
/// recovered inside the keystroke that produced them.
#[derive(Debug, Error)]
pub enum Error {
    /// The query text could not be compiled as a regular expression.
    ///
    /// Queries are deliberately passed to the regex engine unescaped, so a
    /// user typing `a(` mid-thought will hit this until the pattern closes.
    #[error("invalid search pattern {query:?}")]
    InvalidPattern {
        query: String,
        #[source]
        source: regex::Error,
    },

    /// No input field was configured for the instance.
    #[error("no input field bound")]
    MissingInput,

    /// A selector string used syntax the engine does not support.
    #[error("unsupported selector {0:?}")]
    InvalidSelector(String),
}
