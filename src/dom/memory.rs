use std::collections::HashMap;

use scraper::{ElementRef, Html};
use tracing::debug;

use super::selector::Selector;
use super::{Document, FadeDirection, NodeId, Visibility};

/// In-memory document built from an HTML fragment.
///
/// Parsing happens once, up front: every element in the fragment becomes a
/// node owning its tag, id, classes and inner markup. After that each
/// node's markup payload is authoritative and mutated independently;
/// nested elements are kept for selector matching only.
#[derive(Debug)]
pub struct MemoryDocument {
    elements: Vec<ElementNode>,
}

#[derive(Debug)]
struct ElementNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    markup: String,
    visibility: Visibility,
    pending_fade: Option<(FadeDirection, u64)>,
    value: Option<String>,
    data: HashMap<String, String>,
}

impl MemoryDocument {
    /// Build a document from an HTML fragment.
    pub fn parse(html: &str) -> Self {
        let fragment = Html::parse_fragment(html);
        let root = fragment.root_element();

        let mut elements = Vec::new();
        let mut by_tree_id = HashMap::new();

        for node in root.descendants() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            let parent = node
                .parent()
                .and_then(|p| by_tree_id.get(&p.id()).copied());
            let value = el.value();
            let is_input = matches!(value.name(), "input" | "textarea");

            let idx = NodeId(elements.len());
            by_tree_id.insert(node.id(), idx);
            elements.push(ElementNode {
                tag: value.name().to_string(),
                id: value.id().map(str::to_string),
                classes: value.classes().map(str::to_string).collect(),
                parent,
                markup: el.inner_html(),
                visibility: Visibility::Visible,
                pending_fade: None,
                value: is_input
                    .then(|| value.attr("value").unwrap_or_default().to_string()),
                data: HashMap::new(),
            });
        }

        debug!("parsed document fragment: {} elements", elements.len());
        Self { elements }
    }

    /// First element in document order matching `selector`, if any.
    pub fn find(&self, selector: &Selector) -> Option<NodeId> {
        self.query(self.root(), selector).into_iter().next()
    }

    /// Set the current value of a text input.
    pub fn set_input_value(&mut self, node: NodeId, text: &str) {
        self.elements[node.0].value = Some(text.to_string());
    }

    /// Complete every in-flight fade, as a host render loop would after the
    /// transition duration elapses.
    pub fn settle(&mut self) {
        for element in &mut self.elements {
            if let Some((direction, _)) = element.pending_fade.take() {
                element.visibility = match direction {
                    FadeDirection::In => Visibility::Visible,
                    FadeDirection::Out => Visibility::Hidden,
                };
            }
        }
    }

    /// The fade currently in flight for an element, if any.
    pub fn pending_fade(&self, node: NodeId) -> Option<(FadeDirection, u64)> {
        self.elements[node.0].pending_fade
    }

    fn is_within(&self, node: NodeId, container: NodeId) -> bool {
        let mut current = self.elements[node.0].parent;
        while let Some(parent) = current {
            if parent == container {
                return true;
            }
            current = self.elements[parent.0].parent;
        }
        false
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn query(&self, container: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, _)| NodeId(i))
            .filter(|&id| id != container && self.is_within(id, container))
            .filter(|&id| {
                let el = &self.elements[id.0];
                selector.matches(&el.tag, el.id.as_deref(), &el.classes)
            })
            .collect()
    }

    fn text(&self, node: NodeId) -> String {
        Html::parse_fragment(&self.elements[node.0].markup)
            .root_element()
            .text()
            .collect()
    }

    fn markup(&self, node: NodeId) -> &str {
        &self.elements[node.0].markup
    }

    fn set_markup(&mut self, node: NodeId, markup: String) {
        self.elements[node.0].markup = markup;
    }

    fn visibility(&self, node: NodeId) -> Visibility {
        self.elements[node.0].visibility
    }

    fn set_visibility(&mut self, node: NodeId, visibility: Visibility) {
        self.elements[node.0].visibility = visibility;
    }

    fn begin_fade(&mut self, node: NodeId, direction: FadeDirection, duration_ms: u64) {
        let element = &mut self.elements[node.0];
        let settled = match direction {
            FadeDirection::In => Visibility::Visible,
            FadeDirection::Out => Visibility::Hidden,
        };
        // Fading toward the state we are already in is a no-op
        if element.visibility == settled && element.pending_fade.is_none() {
            return;
        }
        element.visibility = match direction {
            FadeDirection::In => Visibility::FadingIn,
            FadeDirection::Out => Visibility::FadingOut,
        };
        element.pending_fade = Some((direction, duration_ms));
    }

    fn input_value(&self, node: NodeId) -> Option<&str> {
        self.elements[node.0].value.as_deref()
    }

    fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.elements[node.0].data.get(key).map(String::as_str)
    }

    fn set_data(&mut self, node: NodeId, key: &str, value: &str) {
        self.elements[node.0]
            .data
            .insert(key.to_string(), value.to_string());
    }
}
