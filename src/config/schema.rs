use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId, Selector};
use crate::engine::visibility::TransitionFn;
use crate::error::Error;

/// Options for one bound filter instance.
///
/// Merged from caller-supplied overrides onto defaults and immutable after
/// bind. The custom transition slots are explicit options, not
/// serializable values; a config file can only set the plain fields.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Selector for the live text field driving the filter. Required:
    /// without it the instance is inert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Selector scoping the candidate elements within the container.
    pub selector: String,
    /// Minimum query length before filtering activates.
    pub threshold: usize,
    /// Default fade duration in milliseconds.
    pub fade_speed: u64,
    /// Custom show transition; owns the transition entirely when set.
    #[serde(skip)]
    pub fade_in: Option<TransitionFn>,
    /// Custom hide transition; owns the transition entirely when set.
    #[serde(skip)]
    pub fade_out: Option<TransitionFn>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            input: None,
            selector: "*".to_string(),
            threshold: 3,
            fade_speed: 200,
            fade_in: None,
            fade_out: None,
        }
    }
}

impl FilterOptions {
    /// Options with an input and candidate selector, defaults elsewhere.
    pub fn new(input: &str, selector: &str) -> Self {
        Self {
            input: Some(input.to_string()),
            selector: selector.to_string(),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_fade_speed(mut self, fade_speed: u64) -> Self {
        self.fade_speed = fade_speed;
        self
    }

    pub fn with_fade_in(mut self, f: impl Fn(&mut dyn Document, NodeId) + 'static) -> Self {
        self.fade_in = Some(Box::new(f));
        self
    }

    pub fn with_fade_out(mut self, f: impl Fn(&mut dyn Document, NodeId) + 'static) -> Self {
        self.fade_out = Some(Box::new(f));
        self
    }

    /// Parse and validate the configured selectors.
    ///
    /// Fails with [`Error::MissingInput`] when no input is configured and
    /// [`Error::InvalidSelector`] when either selector does not parse.
    pub fn parse_selectors(&self) -> Result<(Selector, Selector), Error> {
        let input = self.input.as_deref().ok_or(Error::MissingInput)?;
        Ok((Selector::parse(input)?, Selector::parse(&self.selector)?))
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("input", &self.input)
            .field("selector", &self.selector)
            .field("threshold", &self.threshold)
            .field("fade_speed", &self.fade_speed)
            .field("fade_in", &self.fade_in.as_ref().map(|_| "custom"))
            .field("fade_out", &self.fade_out.as_ref().map(|_| "custom"))
            .finish()
    }
}
