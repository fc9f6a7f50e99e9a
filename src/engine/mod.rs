pub mod highlight;
pub mod matcher;
pub mod visibility;

pub use highlight::{clean, Highlighter};
pub use matcher::Matcher;
pub use visibility::VisibilityController;

use tracing::{debug, warn};

use crate::config::FilterOptions;
use crate::dom::{Document, NodeId, Selector};

/// Data marker recording that a container already has a filter attached.
const BOUND_MARKER: &str = "plugin_goldpan";

/// Per-keystroke orchestrator for one bound container.
///
/// Every key event runs one synchronous pass: clean old markers, check the
/// query against the threshold, then either show everything or classify
/// each candidate as match (show + highlight) or no-match (hide). Fades
/// started by a previous pass are simply superseded, never awaited.
pub struct SearchController {
    container: NodeId,
    binding: Option<Binding>,
}

struct Binding {
    input: NodeId,
    selector: Selector,
    threshold: usize,
    visibility: VisibilityController,
}

impl SearchController {
    /// Attach a filter to `container`.
    ///
    /// Configuration problems never propagate: a missing or unresolvable
    /// input, or an unparsable selector, logs a warning and yields a
    /// permanently inert instance. Binding a container that already
    /// carries a filter is a no-op for the same reason.
    pub fn bind(doc: &mut dyn Document, container: NodeId, options: FilterOptions) -> Self {
        if doc.data(container, BOUND_MARKER).is_some() {
            debug!("container already bound, leaving the existing instance in place");
            return Self::inert(container);
        }

        let (input_selector, selector) = match options.parse_selectors() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("filter disabled: {}", e);
                return Self::inert(container);
            }
        };

        let root = doc.root();
        let Some(input) = doc.query(root, &input_selector).into_iter().next() else {
            warn!(
                "filter disabled: input {:?} not found in document",
                options.input
            );
            return Self::inert(container);
        };

        doc.set_data(container, BOUND_MARKER, "1");

        Self {
            container,
            binding: Some(Binding {
                input,
                selector,
                threshold: options.threshold,
                visibility: VisibilityController::new(
                    options.fade_speed,
                    options.fade_in,
                    options.fade_out,
                ),
            }),
        }
    }

    fn inert(container: NodeId) -> Self {
        Self {
            container,
            binding: None,
        }
    }

    /// Whether this instance will react to key events.
    pub fn is_active(&self) -> bool {
        self.binding.is_some()
    }

    /// Run one search pass against the current value of the bound input.
    pub fn on_key_event(&self, doc: &mut dyn Document) {
        let Some(binding) = &self.binding else {
            return;
        };

        // Previous highlighting comes off first, match or not
        highlight::clean(doc, self.container);

        let query = doc.input_value(binding.input).unwrap_or("").to_string();
        if query.chars().count() < binding.threshold {
            binding
                .visibility
                .show_all(doc, self.container, &binding.selector);
            return;
        }

        self.search(doc, binding, &query);
    }

    fn search(&self, doc: &mut dyn Document, binding: &Binding, query: &str) {
        let matcher = match Matcher::new(query) {
            Ok(matcher) => matcher,
            Err(e) => {
                debug!("skipping pass: {}", e);
                return;
            }
        };
        let highlighter = match Highlighter::new(query) {
            Ok(highlighter) => highlighter,
            Err(e) => {
                debug!("skipping pass: {}", e);
                return;
            }
        };

        for node in doc.query(self.container, &binding.selector) {
            if matcher.is_match(&doc.text(node)) {
                binding.visibility.show(doc, node);
                let highlighted = highlighter.apply(doc.markup(node));
                doc.set_markup(node, highlighted);
            } else {
                binding.visibility.hide(doc, node);
            }
        }
    }
}
