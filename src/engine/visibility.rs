use crate::dom::{Document, FadeDirection, NodeId, Selector};

/// A custom transition, owning the show or hide entirely when configured.
pub type TransitionFn = Box<dyn Fn(&mut dyn Document, NodeId)>;

/// Applies show/hide transitions to candidates.
///
/// Each direction either runs the caller's custom callback or the default
/// timed fade over `fade_speed` milliseconds, never both.
pub struct VisibilityController {
    fade_speed: u64,
    fade_in: Option<TransitionFn>,
    fade_out: Option<TransitionFn>,
}

impl VisibilityController {
    pub fn new(
        fade_speed: u64,
        fade_in: Option<TransitionFn>,
        fade_out: Option<TransitionFn>,
    ) -> Self {
        Self {
            fade_speed,
            fade_in,
            fade_out,
        }
    }

    /// Transition one candidate toward visible.
    pub fn show(&self, doc: &mut dyn Document, node: NodeId) {
        if let Some(custom) = &self.fade_in {
            custom(doc, node);
        } else {
            doc.begin_fade(node, FadeDirection::In, self.fade_speed);
        }
    }

    /// Transition one candidate toward hidden.
    pub fn hide(&self, doc: &mut dyn Document, node: NodeId) {
        if let Some(custom) = &self.fade_out {
            custom(doc, node);
        } else {
            doc.begin_fade(node, FadeDirection::Out, self.fade_speed);
        }
    }

    /// Show every candidate under `container` matching `selector`.
    pub fn show_all(&self, doc: &mut dyn Document, container: NodeId, selector: &Selector) {
        for node in doc.query(container, selector) {
            self.show(doc, node);
        }
    }
}
