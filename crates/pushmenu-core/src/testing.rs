#![forbid(unsafe_code)]

//! In-memory [`DomHost`] for tests.
//!
//! [`MockDom`] is an arena of elements with tags, ids, classes, attributes,
//! widths, inline transforms, and registered listeners. Selectors support
//! compound simple selectors only (`div`, `.a`, `#id`, `div.a.b`).
//!
//! [`simulate_click`] dispatches a click the way a browser bubbles it: every
//! listener on the target, then on each ancestor, then on the document,
//! stopping when a handler asks to stop propagation.

use std::collections::BTreeMap;

use crate::config::PushMenuConfig;
use crate::host::{Click, DomHost, ListenTarget, ListenerSlot};
use crate::menu::LevelMenu;
use crate::transform::Transform;

/// Element handle inside a [`MockDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MockNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    width: f64,
    transform: Option<Transform>,
}

/// Arena-backed document.
#[derive(Debug, Default)]
pub struct MockDom {
    nodes: Vec<MockNode>,
    listeners: Vec<(ListenTarget<NodeId>, ListenerSlot)>,
    transform_log: Vec<(NodeId, Transform)>,
}

/// Builder returned by [`MockDom::element`].
#[derive(Debug)]
pub struct ElementBuilder<'a> {
    dom: &'a mut MockDom,
    node: MockNode,
}

impl ElementBuilder<'_> {
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.node.id = Some(id.to_owned());
        self
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.node.classes.push(class.to_owned());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.node.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn width(mut self, px: f64) -> Self {
        self.node.width = px;
        self
    }

    /// Insert the element and return its handle.
    pub fn build(self) -> NodeId {
        let id = NodeId(self.dom.nodes.len());
        if let Some(parent) = self.node.parent {
            self.dom.nodes[parent.0].children.push(id);
        }
        self.dom.nodes.push(self.node);
        id
    }
}

impl MockDom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new element under `parent` (`None` makes a top-level node).
    pub fn element(&mut self, tag: &str, parent: Option<NodeId>) -> ElementBuilder<'_> {
        ElementBuilder {
            dom: self,
            node: MockNode {
                tag: tag.to_owned(),
                id: None,
                classes: Vec::new(),
                attributes: BTreeMap::new(),
                parent,
                children: Vec::new(),
                width: 0.0,
                transform: None,
            },
        }
    }

    pub fn set_width(&mut self, node: NodeId, px: f64) {
        self.nodes[node.0].width = px;
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.nodes[node.0].classes.iter().map(String::as_str).collect()
    }

    /// Current inline transform, `None` if never set or cleared to identity.
    #[must_use]
    pub fn transform(&self, node: NodeId) -> Option<Transform> {
        self.nodes[node.0].transform
    }

    /// Every transform ever applied, in order.
    #[must_use]
    pub fn transform_log(&self) -> &[(NodeId, Transform)] {
        &self.transform_log
    }

    #[must_use]
    pub fn listeners(&self) -> &[(ListenTarget<NodeId>, ListenerSlot)] {
        &self.listeners
    }

    #[must_use]
    pub fn listener_count(&self, slot: ListenerSlot) -> usize {
        self.listeners.iter().filter(|(_, s)| *s == slot).count()
    }

    /// Slots registered on `target`, in registration order.
    #[must_use]
    pub fn slots_on(&self, target: &ListenTarget<NodeId>) -> Vec<ListenerSlot> {
        self.listeners
            .iter()
            .filter(|(t, _)| t == target)
            .map(|(_, s)| *s)
            .collect()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let n = &self.nodes[node.0];
        let mut rest = selector.trim();
        let tag_end = rest.find(['.', '#']).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&n.tag) {
            return false;
        }
        rest = &rest[tag_end..];
        while !rest.is_empty() {
            let marker = rest.as_bytes()[0];
            let body = &rest[1..];
            let end = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..end];
            let ok = match marker {
                b'.' => n.classes.iter().any(|c| c == name),
                b'#' => n.id.as_deref() == Some(name),
                _ => false,
            };
            if !ok {
                return false;
            }
            rest = &body[end..];
        }
        true
    }

    fn collect_descendants(&self, scope: NodeId, selector: &str, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[scope.0].children {
            if self.matches(child, selector) {
                out.push(child);
            }
            self.collect_descendants(child, selector, out);
        }
    }
}

impl DomHost for MockDom {
    type Node = NodeId;

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn query_all(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(*scope, selector, &mut out);
        out
    }

    fn query_document(&self, selector: &str) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.nodes[id.0].parent.is_none())
            .find_map(|top| {
                if self.matches(top, selector) {
                    return Some(top);
                }
                self.query_first(&top, selector)
            })
    }

    fn offset_width(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].width
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node.0].classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        self.nodes[node.0].classes.retain(|c| c != class);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_transform(&mut self, node: &NodeId, transform: &Transform) {
        self.transform_log.push((*node, *transform));
        self.nodes[node.0].transform = match transform {
            Transform::Identity => None,
            other => Some(*other),
        };
    }

    fn add_listener(&mut self, target: ListenTarget<NodeId>, slot: ListenerSlot) {
        self.listeners.push((target, slot));
    }

    fn remove_listener(&mut self, target: ListenTarget<NodeId>, slot: ListenerSlot) {
        if let Some(pos) = self
            .listeners
            .iter()
            .position(|(t, s)| *t == target && *s == slot)
        {
            self.listeners.remove(pos);
        }
    }
}

/// Result of [`simulate_click`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickOutcome {
    /// Handlers that ran, in bubbling order.
    pub handled: Vec<ListenerSlot>,
    pub default_prevented: bool,
}

/// Bubble a click from `target` through the menu's registered listeners.
pub fn simulate_click(menu: &mut LevelMenu<MockDom>, target: NodeId) -> ClickOutcome {
    let click = Click::on(target);
    let mut outcome = ClickOutcome::default();

    let mut path: Vec<ListenTarget<NodeId>> = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        path.push(ListenTarget::Element(node));
        current = menu.host().parent(&node);
    }
    path.push(ListenTarget::Document);

    for hop in path {
        let slots = menu.host().slots_on(&hop);
        let mut stopped = false;
        for slot in slots {
            let prop = menu.dispatch(slot, &click);
            outcome.handled.push(slot);
            outcome.default_prevented |= prop.prevent_default;
            stopped |= prop.stop_propagation;
        }
        if stopped {
            break;
        }
    }
    outcome
}

/// Handles of the three-level sample menu built by [`sample_menu`].
#[derive(Debug, Clone)]
pub struct SampleMenu {
    pub body: NodeId,
    pub wrapper: NodeId,
    pub root: NodeId,
    pub trigger: NodeId,
    /// Element inside the page but outside the menu.
    pub outside: NodeId,
    /// Panels along the main branch, index 0 = depth 1.
    pub panels: Vec<NodeId>,
    /// `links[i]` opens `panels[i + 1]`.
    pub links: Vec<NodeId>,
    /// `backs[i]` sits in `panels[i + 1]`.
    pub backs: Vec<NodeId>,
    /// Second depth-2 panel next to `panels[1]`.
    pub sibling_panel: NodeId,
    pub sibling_link: NodeId,
    /// Plain link in the deepest panel.
    pub leaf: NodeId,
}

/// Build a menu whose main branch is three levels deep, with a second
/// depth-2 sibling, a 300px root, and default class names.
///
/// ```text
/// body
/// └─ div#ts-pushmenu-mp-pusher
///    ├─ nav#mp-menu
///    │  └─ div.level (1)
///    │     └─ ul
///    │        ├─ li ─ a, div.level (2) ─ a.back, ul ─ li ─ a, div.level (3) ─ a.back, ul ─ li ─ a
///    │        └─ li ─ a, div.level (2, sibling) ─ a.back
///    └─ div.content ─ a#trigger, p
/// ```
pub fn sample_menu() -> (MockDom, SampleMenu) {
    let defaults = PushMenuConfig::<NodeId>::default();
    let level = defaults.classes.level.as_str();
    let back = defaults.classes.back.as_str();

    let mut dom = MockDom::new();
    let body = dom.element("body", None).width(1024.0).build();
    let wrapper = dom
        .element("div", Some(body))
        .id("ts-pushmenu-mp-pusher")
        .width(1024.0)
        .build();
    let root = dom.element("nav", Some(wrapper)).id("mp-menu").width(300.0).build();

    let p1 = dom.element("div", Some(root)).class(level).build();
    let ul1 = dom.element("ul", Some(p1)).build();

    let li1 = dom.element("li", Some(ul1)).build();
    let link1 = dom.element("a", Some(li1)).attr("href", "#").build();
    let p2 = dom.element("div", Some(li1)).class(level).build();
    let back2 = dom.element("a", Some(p2)).class(back).build();
    let ul2 = dom.element("ul", Some(p2)).build();
    let li2 = dom.element("li", Some(ul2)).build();
    let link2 = dom.element("a", Some(li2)).attr("href", "#").build();
    let p3 = dom.element("div", Some(li2)).class(level).build();
    let back3 = dom.element("a", Some(p3)).class(back).build();
    let ul3 = dom.element("ul", Some(p3)).build();
    let li3 = dom.element("li", Some(ul3)).build();
    let leaf = dom.element("a", Some(li3)).attr("href", "#").build();

    let li1b = dom.element("li", Some(ul1)).build();
    let sibling_link = dom.element("a", Some(li1b)).attr("href", "#").build();
    let sibling_panel = dom.element("div", Some(li1b)).class(level).build();
    let _sibling_back = dom.element("a", Some(sibling_panel)).class(back).build();

    let content = dom.element("div", Some(wrapper)).class("content").build();
    let trigger = dom.element("a", Some(content)).id("trigger").build();
    let outside = dom.element("p", Some(content)).build();

    let sample = SampleMenu {
        body,
        wrapper,
        root,
        trigger,
        outside,
        panels: vec![p1, p2, p3],
        links: vec![link1, link2],
        backs: vec![back2, back3],
        sibling_panel,
        sibling_link,
        leaf,
    };
    (dom, sample)
}
