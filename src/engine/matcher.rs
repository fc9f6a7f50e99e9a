use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// Case-insensitive containment matcher for one search pass.
///
/// The query is handed to the regex engine raw, exactly as typed: no
/// escaping, no normalization. Literal regex search is part of the
/// contract, so `gold|silver` matches either word and a half-typed `a(`
/// fails with [`Error::InvalidPattern`] instead of matching anything.
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile the raw query. Fails, never panics, on malformed syntax.
    pub fn new(query: &str) -> Result<Self, Error> {
        let regex = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                query: query.to_string(),
                source,
            })?;
        Ok(Self { regex })
    }

    /// Whether the candidate's rendered text contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// One-shot form of the matcher contract.
pub fn matches(text: &str, query: &str) -> Result<bool, Error> {
    Ok(Matcher::new(query)?.is_match(text))
}
