#![forbid(unsafe_code)]

//! The multi-level push menu.
//!
//! [`LevelMenu`] tracks how many levels are open and keeps the page in sync:
//! the wrapper slides right by the container width (plus a gap per extra
//! level in overlap mode), panels gain and lose the open/overlay marker
//! classes, and same-depth siblings of an opening panel are parked
//! off-screen so they never collide.
//!
//! # Lifecycle
//!
//! ```text
//! new(host, config)   validate options, find the wrapper
//!   → subscribe(..)   optional
//!   → init()          annotate depths, request listeners,
//!                     emit EventsBound then Initialized
//!   → dispatch(slot, click)  for every click the host routes back
//! ```
//!
//! # Invariants
//!
//! 1. `current_level` is 0 exactly when the menu is closed and grows by one
//!    per opened level.
//! 2. `is_open` ⇔ `current_level > 0`, except transiently inside handlers.
//! 3. The outside-click listener is registered ⇔ `is_open`, and never more
//!    than once.

use crate::config::{ClassNames, MenuType, PushMenuConfig, Selectors};
use crate::depth::{closest, is_within, level_depth};
use crate::error::MenuError;
use crate::host::{Click, DomHost, ListenTarget, ListenerSlot, Propagation};
use crate::notify::{MenuEvent, Observers, SubscriptionId};
use crate::panel::{MenuItem, Panel, annotate_panels, collect_menu_items};
use crate::transform::{Transform, level_offset, wrapper_translation};

/// Stateful push menu bound to a [`DomHost`].
pub struct LevelMenu<H: DomHost> {
    host: H,
    root: H::Node,
    trigger: H::Node,
    wrapper: H::Node,

    menu_type: MenuType,
    mode_class: String,
    level_spacing: f64,
    classes: ClassNames,
    selectors: Selectors,

    is_open: bool,
    current_level: u32,
    initialized: bool,
    outside_armed: bool,

    panels: Vec<Panel<H::Node>>,
    menu_items: Vec<MenuItem<H::Node>>,
    back_elements: Vec<H::Node>,

    observers: Observers,
}

impl<H: DomHost> core::fmt::Debug for LevelMenu<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LevelMenu")
            .field("root", &self.root)
            .field("menu_type", &self.menu_type)
            .field("is_open", &self.is_open)
            .field("current_level", &self.current_level)
            .field("panels", &self.panels.len())
            .field("menu_items", &self.menu_items.len())
            .field("back_elements", &self.back_elements.len())
            .finish_non_exhaustive()
    }
}

impl<H: DomHost> LevelMenu<H> {
    /// Validate `config` against `host` without touching the page.
    ///
    /// Fails if `el` or `trigger` is missing, the spacing is invalid, or the
    /// wrapper selector matches nothing.
    pub fn new(host: H, config: PushMenuConfig<H::Node>) -> Result<Self, MenuError> {
        let (root, trigger) = config.validate()?;
        let wrapper = host
            .query_document(&config.selectors.wrapper)
            .ok_or_else(|| MenuError::WrapperNotFound(config.selectors.wrapper.clone()))?;

        let mode_class = config.mode_class();
        Ok(Self {
            host,
            root,
            trigger,
            wrapper,
            menu_type: config.menu_type,
            mode_class,
            level_spacing: config.level_spacing,
            classes: config.classes,
            selectors: config.selectors,
            is_open: false,
            current_level: 0,
            initialized: false,
            outside_armed: false,
            panels: Vec::new(),
            menu_items: Vec::new(),
            back_elements: Vec::new(),
            observers: Observers::new(),
        })
    }

    /// [`new`](Self::new) followed by [`init`](Self::init).
    pub fn build(host: H, config: PushMenuConfig<H::Node>) -> Result<Self, MenuError> {
        let mut menu = Self::new(host, config)?;
        menu.init();
        Ok(menu)
    }

    /// Annotate panel depths, tag the root with the mode class, and request
    /// every listener. Calling it again is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            #[cfg(feature = "tracing")]
            tracing::warn!("LevelMenu::init called twice; ignored");
            return;
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("pushmenu_init", menu_type = self.menu_type.as_str())
            .entered();

        self.is_open = false;
        self.current_level = 0;
        self.panels = annotate_panels(
            &mut self.host,
            &self.root,
            &self.selectors.level,
            &self.classes.level,
        );
        self.menu_items = collect_menu_items(
            &self.host,
            &self.root,
            &self.selectors.item,
            &self.selectors.link,
            &self.selectors.level,
        );
        let back_selector = format!(".{}", self.classes.back);
        self.back_elements = self.host.query_all(&self.root, &back_selector);

        self.host.add_class(&self.root, &self.mode_class);

        self.bind_events();
        self.initialized = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            panels = self.panels.len(),
            items = self.menu_items.len(),
            backs = self.back_elements.len(),
            "push menu initialized"
        );
        self.observers.emit(MenuEvent::Initialized);
    }

    fn bind_events(&mut self) {
        self.host
            .add_listener(ListenTarget::Element(self.trigger.clone()), ListenerSlot::Trigger);
        for (i, item) in self.menu_items.iter().enumerate() {
            self.host
                .add_listener(ListenTarget::Element(item.link.clone()), ListenerSlot::SubLevel(i));
        }
        for (i, panel) in self.panels.iter().enumerate() {
            self.host
                .add_listener(ListenTarget::Element(panel.node.clone()), ListenerSlot::Panel(i));
        }
        for (i, back) in self.back_elements.iter().enumerate() {
            self.host
                .add_listener(ListenTarget::Element(back.clone()), ListenerSlot::Back(i));
        }
        self.observers.emit(MenuEvent::EventsBound);
    }

    // -- Notifications ------------------------------------------------------

    /// Register a lifecycle callback. Subscribe before [`init`](Self::init)
    /// to observe both events.
    pub fn subscribe(&mut self, callback: impl FnMut(&MenuEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the one-shot outside-click listener is currently registered.
    #[must_use]
    pub fn is_outside_armed(&self) -> bool {
        self.outside_armed
    }

    #[must_use]
    pub fn menu_type(&self) -> MenuType {
        self.menu_type
    }

    #[must_use]
    pub fn level_spacing(&self) -> f64 {
        self.level_spacing
    }

    #[must_use]
    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel<H::Node>] {
        &self.panels
    }

    #[must_use]
    pub fn menu_items(&self) -> &[MenuItem<H::Node>] {
        &self.menu_items
    }

    #[must_use]
    pub fn back_elements(&self) -> &[H::Node] {
        &self.back_elements
    }

    #[must_use]
    pub fn root(&self) -> &H::Node {
        &self.root
    }

    #[must_use]
    pub fn trigger(&self) -> &H::Node {
        &self.trigger
    }

    #[must_use]
    pub fn wrapper(&self) -> &H::Node {
        &self.wrapper
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Recorded depth of `node`, computing it for unknown elements.
    #[must_use]
    pub fn depth_of(&self, node: &H::Node) -> u32 {
        self.panels
            .iter()
            .find(|p| &p.node == node)
            .map(|p| p.depth)
            .unwrap_or_else(|| level_depth(&self.host, node, &self.root, &self.classes.level))
    }

    // -- Click routing ------------------------------------------------------

    /// Run the handler for `slot` and report what to do with the native event.
    pub fn dispatch(&mut self, slot: ListenerSlot, click: &Click<H::Node>) -> Propagation {
        match slot {
            ListenerSlot::Trigger => self.on_trigger(),
            ListenerSlot::SubLevel(i) => self.on_sub_level(i),
            ListenerSlot::Panel(i) => self.on_panel(i, click),
            ListenerSlot::Back(i) => self.on_back(i),
            ListenerSlot::Outside => self.on_outside(click),
        }
    }

    fn on_trigger(&mut self) -> Propagation {
        if self.is_open {
            self.reset_menu();
        } else {
            self.open();
        }
        Propagation {
            prevent_default: true,
            stop_propagation: true,
        }
    }

    fn on_outside(&mut self, click: &Click<H::Node>) -> Propagation {
        if self.is_open && !is_within(&self.host, &click.target, &self.root) {
            #[cfg(feature = "tracing")]
            tracing::debug!("click outside menu; closing");
            self.reset_menu();
        }
        Propagation::PASS
    }

    fn on_sub_level(&mut self, index: usize) -> Propagation {
        let mut prop = Propagation {
            prevent_default: true,
            stop_propagation: false,
        };
        let Some(item) = self.menu_items.get(index).cloned() else {
            return prop;
        };
        let Some(ancestor) = closest(&self.host, &item.item, &self.classes.level) else {
            return prop;
        };
        let depth = self.depth_of(&ancestor);
        if self.current_level <= depth {
            prop.stop_propagation = true;
            self.host.add_class(&ancestor, &self.classes.menu_overlay);
            self.open_menu(Some(item.sub_panel));
        }
        prop
    }

    fn on_panel(&mut self, index: usize, click: &Click<H::Node>) -> Propagation {
        let prop = Propagation {
            prevent_default: false,
            stop_propagation: true,
        };
        let Some(depth) = self.panels.get(index).map(|p| p.depth) else {
            return prop;
        };
        if depth < self.current_level {
            self.host
                .remove_class(&click.target, &self.classes.menu_overlay);
            self.close_to(depth);
        }
        prop
    }

    fn on_back(&mut self, index: usize) -> Propagation {
        let mut prop = Propagation {
            prevent_default: true,
            stop_propagation: false,
        };
        let Some(back) = self.back_elements.get(index).cloned() else {
            return prop;
        };
        let Some(ancestor) = closest(&self.host, &back, &self.classes.level) else {
            return prop;
        };
        let depth = self.depth_of(&ancestor);
        if depth <= self.current_level {
            prop.stop_propagation = true;
            self.close_to(depth.saturating_sub(1));
        }
        prop
    }

    // -- State machine ------------------------------------------------------

    /// Open the first level. No-op when already open.
    pub fn open(&mut self) {
        if !self.is_open {
            self.open_menu(None);
        }
    }

    /// Close every level. No-op when already closed.
    pub fn close(&mut self) {
        if self.is_open {
            self.reset_menu();
        }
    }

    /// Go one level deeper, optionally into a specific sub panel.
    pub fn open_menu(&mut self, sub_panel: Option<H::Node>) {
        self.current_level += 1;
        let level = self.current_level;
        let offset = level_offset(level, self.level_spacing);
        self.slide_wrapper(level);

        if let Some(sub) = &sub_panel {
            self.host.set_transform(sub, &Transform::Identity);
            let depth = self.depth_of(sub);
            for panel in &self.panels {
                if &panel.node != sub
                    && panel.depth == depth
                    && !self.host.has_class(&panel.node, &self.classes.menu_open)
                {
                    self.host
                        .set_transform(&panel.node, &Transform::Offscreen { offset });
                }
            }
        }

        if level == 1 {
            self.host.add_class(&self.wrapper, &self.classes.pushed);
            self.is_open = true;
            self.arm_outside();
        }

        let opened = sub_panel.or_else(|| self.panels.first().map(|p| p.node.clone()));
        if let Some(node) = opened {
            self.host.add_class(&node, &self.classes.menu_open);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(level, "menu level opened");
    }

    /// Re-slide the wrapper for the current (already lowered) level and
    /// strip classes from deeper panels.
    pub fn close_menu(&mut self) {
        self.slide_wrapper(self.current_level);
        self.toggle_levels();

        #[cfg(feature = "tracing")]
        tracing::debug!(level = self.current_level, "menu level closed");
    }

    /// Collapse to `level`: a full reset at 0, a partial close otherwise.
    pub fn close_to(&mut self, level: u32) {
        self.current_level = level;
        if level == 0 {
            self.reset_menu();
        } else {
            self.close_menu();
        }
    }

    /// Slide the wrapper home and close every level.
    pub fn reset_menu(&mut self) {
        self.host.set_transform(&self.wrapper, &Transform::ZERO);
        self.current_level = 0;
        self.host.remove_class(&self.wrapper, &self.classes.pushed);
        self.toggle_levels();
        self.is_open = false;
        self.disarm_outside();

        #[cfg(feature = "tracing")]
        tracing::debug!("menu reset");
    }

    /// Strip open/overlay from panels deeper than the current level and
    /// overlay from panels at exactly the current level.
    pub fn toggle_levels(&mut self) {
        let level = self.current_level;
        for panel in &self.panels {
            if panel.depth > level {
                self.host.remove_class(&panel.node, &self.classes.menu_open);
                self.host.remove_class(&panel.node, &self.classes.menu_overlay);
            } else if panel.depth == level {
                self.host.remove_class(&panel.node, &self.classes.menu_overlay);
            }
        }
    }

    fn slide_wrapper(&mut self, level: u32) {
        let width = self.host.offset_width(&self.root);
        let px = wrapper_translation(self.menu_type, width, level, self.level_spacing);
        self.host
            .set_transform(&self.wrapper, &Transform::TranslateX(px));
    }

    fn arm_outside(&mut self) {
        if !self.outside_armed {
            self.host
                .add_listener(ListenTarget::Document, ListenerSlot::Outside);
            self.outside_armed = true;
        }
    }

    fn disarm_outside(&mut self) {
        if self.outside_armed {
            self.host
                .remove_listener(ListenTarget::Document, ListenerSlot::Outside);
            self.outside_armed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDom, NodeId, SampleMenu, sample_menu};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn menu() -> (LevelMenu<MockDom>, SampleMenu) {
        let (dom, s) = sample_menu();
        let cfg = PushMenuConfig::new(s.root, s.trigger);
        (LevelMenu::build(dom, cfg).expect("sample menu builds"), s)
    }

    fn has(menu: &LevelMenu<MockDom>, node: NodeId, class: &str) -> bool {
        menu.host().has_class(&node, class)
    }

    #[test]
    fn missing_trigger_is_reported() {
        let (dom, s) = sample_menu();
        let cfg = PushMenuConfig::default().with_el(s.root);
        let err = LevelMenu::new(dom, cfg).unwrap_err();
        assert_eq!(err, MenuError::MissingOption("trigger"));
    }

    #[test]
    fn missing_wrapper_is_reported() {
        let (dom, s) = sample_menu();
        let mut selectors = Selectors::default();
        selectors.wrapper = "#nope".into();
        let cfg = PushMenuConfig::new(s.root, s.trigger).with_selectors(selectors);
        let err = LevelMenu::new(dom, cfg).unwrap_err();
        assert_eq!(err, MenuError::WrapperNotFound("#nope".into()));
    }

    #[test]
    fn init_annotates_and_binds() {
        let (m, s) = menu();
        let depths: Vec<u32> = m.panels().iter().map(|p| p.depth).collect();
        assert_eq!(depths, vec![1, 2, 3, 2]);
        assert_eq!(m.menu_items().len(), 3);
        assert_eq!(m.back_elements().len(), 3);
        assert!(has(&m, s.root, "ts-pushmenu-mp-overlap"));

        let dom = m.host();
        assert_eq!(dom.listener_count(ListenerSlot::Trigger), 1);
        assert_eq!(dom.listener_count(ListenerSlot::Outside), 0);
        assert_eq!(dom.listeners().len(), 1 + 3 + 4 + 3);
    }

    #[test]
    fn events_bound_precedes_initialized() {
        let (dom, s) = sample_menu();
        let mut m = LevelMenu::new(dom, PushMenuConfig::new(s.root, s.trigger)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        m.subscribe(move |e| sink.borrow_mut().push(*e));
        m.init();
        m.init();
        assert_eq!(
            *seen.borrow(),
            vec![MenuEvent::EventsBound, MenuEvent::Initialized]
        );
    }

    #[test]
    fn scenario_overlap_translations() {
        let (mut m, s) = menu();
        m.open_menu(None);
        assert_eq!(m.host().transform(s.wrapper), Some(Transform::TranslateX(300.0)));
        assert!(has(&m, s.wrapper, "ts-pushmenu-mp-pushed"));
        assert!(m.is_outside_armed());
        assert!(has(&m, s.panels[0], "ts-pushmenu-mp-level-open"));

        m.open_menu(Some(s.panels[1]));
        assert_eq!(m.host().transform(s.wrapper), Some(Transform::TranslateX(340.0)));
        assert_eq!(m.current_level(), 2);

        m.reset_menu();
        assert_eq!(m.host().transform(s.wrapper), Some(Transform::ZERO));
        assert!(!has(&m, s.wrapper, "ts-pushmenu-mp-pushed"));
        assert!(!m.is_open());
        assert!(!m.is_outside_armed());
        assert_eq!(m.current_level(), 0);
    }

    #[test]
    fn opening_sub_panel_parks_closed_siblings() {
        let (mut m, s) = menu();
        m.open_menu(None);
        m.open_menu(Some(s.panels[1]));

        assert_eq!(m.host().transform(s.panels[1]), None);
        assert_eq!(
            m.host().transform(s.sibling_panel),
            Some(Transform::Offscreen { offset: 40.0 })
        );
        // Other depths are left alone.
        assert_eq!(m.host().transform(s.panels[2]), None);
        assert_eq!(m.host().transform(s.panels[0]), None);
    }

    #[test]
    fn toggle_pass_strips_deeper_classes() {
        let (mut m, s) = menu();
        m.open_menu(None);
        m.host_mut().add_class(&s.panels[0], "ts-pushmenu-mp-level-overlay");
        m.open_menu(Some(s.panels[1]));
        m.host_mut().add_class(&s.panels[1], "ts-pushmenu-mp-level-overlay");
        m.open_menu(Some(s.panels[2]));

        m.close_to(1);
        assert!(!has(&m, s.panels[2], "ts-pushmenu-mp-level-open"));
        assert!(!has(&m, s.panels[1], "ts-pushmenu-mp-level-open"));
        assert!(!has(&m, s.panels[1], "ts-pushmenu-mp-level-overlay"));
        assert!(has(&m, s.panels[0], "ts-pushmenu-mp-level-open"));
        assert!(!has(&m, s.panels[0], "ts-pushmenu-mp-level-overlay"));
        assert_eq!(m.host().transform(s.wrapper), Some(Transform::TranslateX(300.0)));
    }

    #[test]
    fn cover_mode_slides_by_width_only() {
        let (dom, s) = sample_menu();
        let cfg = PushMenuConfig::new(s.root, s.trigger).with_menu_type(MenuType::Cover);
        let mut m = LevelMenu::build(dom, cfg).unwrap();
        assert!(has(&m, s.root, "ts-pushmenu-mp-cover"));
        m.open_menu(None);
        m.open_menu(Some(s.panels[1]));
        m.open_menu(Some(s.panels[2]));
        assert_eq!(m.host().transform(s.wrapper), Some(Transform::TranslateX(300.0)));
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (mut m, _s) = menu();
        m.close();
        assert_eq!(m.host().transform_log().len(), 0);
        m.open();
        m.open();
        assert_eq!(m.current_level(), 1);
        assert_eq!(m.host().listener_count(ListenerSlot::Outside), 1);
        m.close();
        assert!(!m.is_open());
        assert!(!m.is_outside_armed());
        assert_eq!(m.host().listener_count(ListenerSlot::Outside), 0);
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let (mut m, s) = menu();
        let click = Click::on(s.leaf);
        let prop = m.dispatch(ListenerSlot::SubLevel(99), &click);
        assert!(prop.prevent_default);
        assert!(!prop.stop_propagation);
        m.dispatch(ListenerSlot::Panel(99), &click);
        m.dispatch(ListenerSlot::Back(99), &click);
        assert_eq!(m.current_level(), 0);
    }
}
