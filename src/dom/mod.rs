pub mod memory;
pub mod selector;

pub use memory::MemoryDocument;
pub use selector::Selector;

/// Handle to an element inside a [`Document`].
///
/// Opaque to the engine; only the owning document can resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Visibility state of a candidate element.
///
/// The two fading states model an in-flight timed transition; the host's
/// render loop is responsible for completing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    FadingIn,
    FadingOut,
}

impl Visibility {
    /// Whether the element is visible or on its way to visible.
    pub fn is_showing(self) -> bool {
        matches!(self, Visibility::Visible | Visibility::FadingIn)
    }
}

/// Direction of a timed fade transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Capability interface over a host document tree.
///
/// The filter engine never creates or destroys elements; it only queries
/// them, rewrites their markup payloads, and changes their visibility.
/// Implementable over any UI toolkit's tree; [`MemoryDocument`] is the
/// built-in implementation used by the demo binary and the tests.
pub trait Document {
    /// The document's root element, used to scope document-wide lookups.
    fn root(&self) -> NodeId;

    /// Elements under `container` matching `selector`, in document order.
    ///
    /// Re-evaluated on every call; the engine never caches the result
    /// between keystrokes since the underlying tree may change.
    fn query(&self, container: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// Rendered text content of an element, with markup stripped.
    fn text(&self, node: NodeId) -> String;

    /// Serialized inner markup of an element.
    fn markup(&self, node: NodeId) -> &str;

    /// Replace an element's inner markup.
    fn set_markup(&mut self, node: NodeId, markup: String);

    fn visibility(&self, node: NodeId) -> Visibility;

    fn set_visibility(&mut self, node: NodeId, visibility: Visibility);

    /// Start a timed fade toward shown or hidden.
    ///
    /// Fire and forget: a later request on the same element supersedes a
    /// pending one, so rapid keystrokes interrupt and restart transitions.
    fn begin_fade(&mut self, node: NodeId, direction: FadeDirection, duration_ms: u64);

    /// Current value of a text input element, if the node is one.
    fn input_value(&self, node: NodeId) -> Option<&str>;

    /// Read a per-element data marker.
    fn data(&self, node: NodeId, key: &str) -> Option<&str>;

    /// Attach a per-element data marker.
    fn set_data(&mut self, node: NodeId, key: &str, value: &str);
}
