#![forbid(unsafe_code)]

//! [`DomHost`] over the browser DOM.
//!
//! Element queries, classes, attributes, and inline styles go straight to
//! `web-sys`. Listener requests are queued as [`ListenerOp`]s instead: the
//! exported wrapper owns the JS closures and applies the queue after each
//! call into the menu (see `wasm::sync_listeners`).

use pushmenu_core::{DomHost, ListenTarget, ListenerSlot, Transform};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Vendor-prefixed properties written alongside `transform`.
const TRANSFORM_PROPERTIES: [&str; 3] = ["-webkit-transform", "-moz-transform", "transform"];

/// A queued listener change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOp {
    Add(ListenTarget<Element>, ListenerSlot),
    Remove(ListenTarget<Element>, ListenerSlot),
}

/// Browser document host.
#[derive(Debug)]
pub struct WebDom {
    document: Document,
    pending: Vec<ListenerOp>,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Drain listener changes requested since the last call.
    pub fn take_pending(&mut self) -> Vec<ListenerOp> {
        std::mem::take(&mut self.pending)
    }
}

impl DomHost for WebDom {
    type Node = Element;

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn query_all(&self, scope: &Element, selector: &str) -> Vec<Element> {
        let Ok(list) = scope.query_selector_all(selector) else {
            #[cfg(feature = "tracing")]
            tracing::warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_first(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_document(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn offset_width(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_width()))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn set_transform(&mut self, node: &Element, transform: &Transform) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        let css = transform.to_css();
        for property in TRANSFORM_PROPERTIES {
            if css.is_empty() {
                let _ = style.remove_property(property);
            } else {
                let _ = style.set_property(property, &css);
            }
        }
    }

    fn add_listener(&mut self, target: ListenTarget<Element>, slot: ListenerSlot) {
        self.pending.push(ListenerOp::Add(target, slot));
    }

    fn remove_listener(&mut self, target: ListenTarget<Element>, slot: ListenerSlot) {
        self.pending.push(ListenerOp::Remove(target, slot));
    }
}
