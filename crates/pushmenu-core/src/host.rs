#![forbid(unsafe_code)]

//! The host environment seam.
//!
//! [`DomHost`] is everything the menu needs from a document: tree queries,
//! geometry, classes, attributes, inline transforms, and click listeners.
//! The browser implementation lives in `pushmenu-web`; tests use
//! [`MockDom`](crate::testing::MockDom).
//!
//! Listeners are requested by [`ListenerSlot`] rather than by closure. The
//! host attaches whatever native callback it likes and routes each click
//! back through [`LevelMenu::dispatch`](crate::LevelMenu::dispatch) with the
//! same slot.

use crate::transform::Transform;

/// Which handler a registered listener belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerSlot {
    /// Open/close toggle on the trigger element.
    Trigger,
    /// Link of the menu item at this index (see [`LevelMenu::menu_items`](crate::LevelMenu::menu_items)).
    SubLevel(usize),
    /// Panel at this index (see [`LevelMenu::panels`](crate::LevelMenu::panels)).
    Panel(usize),
    /// Back control at this index.
    Back(usize),
    /// One-shot document-wide click-outside listener.
    Outside,
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenTarget<N> {
    Element(N),
    Document,
}

/// A click delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click<N> {
    /// The element the click originated on (`event.target`).
    pub target: N,
}

impl<N> Click<N> {
    #[must_use]
    pub fn on(target: N) -> Self {
        Self { target }
    }
}

/// What the host should do with the native event after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Propagation {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Propagation {
    /// Neither flag set.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };
}

/// Document operations the menu relies on.
pub trait DomHost {
    /// Element handle. Equality must be element identity.
    type Node: Clone + Eq + core::fmt::Debug;

    /// Parent element, `None` at the top of the tree.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// All descendants of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query_first(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    /// First element in the whole document matching `selector`.
    fn query_document(&self, selector: &str) -> Option<Self::Node>;

    /// Rendered width in CSS pixels (`offsetWidth`).
    fn offset_width(&self, node: &Self::Node) -> f64;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Apply an inline transform to `node`.
    fn set_transform(&mut self, node: &Self::Node, transform: &Transform);

    fn add_listener(&mut self, target: ListenTarget<Self::Node>, slot: ListenerSlot);
    fn remove_listener(&mut self, target: ListenTarget<Self::Node>, slot: ListenerSlot);
}
