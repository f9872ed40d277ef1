#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the push menu and modal triggers.
//!
//! [`PushMenu`] owns a [`LevelMenu<WebDom>`] and the JS closures for every
//! listener the menu has requested. After each call into the menu the queued
//! [`ListenerOp`]s are applied: adds create a closure that routes the click
//! back through [`LevelMenu::dispatch`], removes detach the closure and park
//! it until the next sync. Closures hold only a `Weak` to the menu, so
//! dropping the JS handle frees everything. Only compiled on `wasm32`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use pushmenu_core::{
    Click, LevelMenu, ListenTarget, ListenerSlot, MenuError, ModalTrigger, PushMenuConfig,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

use crate::dom::{ListenerOp, WebDom};
use crate::options::parse_options;

type Handler = Closure<dyn FnMut(Event)>;

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    static HOOK: std::sync::Once = std::sync::Once::new();
    HOOK.call_once(|| {
        std::panic::set_hook(Box::new(|info| console_error(&format!("pushmenu: {info}"))));
    });
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| to_js(&MenuError::Host("no document available".into())))
}

fn to_js(err: &dyn std::error::Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn event_target<'a>(document: &'a Document, target: &'a ListenTarget<Element>) -> &'a EventTarget {
    match target {
        ListenTarget::Element(el) => el.as_ref(),
        ListenTarget::Document => document.as_ref(),
    }
}

fn clicked_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// The event currently being dispatched (`window.event`), if any.
fn dispatching_event() -> Option<Event> {
    Reflect::get(&js_sys::global(), &"event".into())
        .ok()
        .and_then(|v| v.dyn_into::<Event>().ok())
}

// -- Listener registry ------------------------------------------------------

struct Binding {
    target: ListenTarget<Element>,
    slot: ListenerSlot,
    handler: Handler,
}

#[derive(Default)]
struct Listeners {
    bound: Vec<Binding>,
    /// Detached handlers; one of them may still be on the call stack.
    retired: Vec<Handler>,
}

struct Shared {
    menu: RefCell<LevelMenu<WebDom>>,
    listeners: RefCell<Listeners>,
}

/// Listener for `slot`. A click still bubbling when the listener was
/// attached (`armed_by`) is not delivered to it.
fn make_handler(shared: Weak<Shared>, slot: ListenerSlot, armed_by: Option<Event>) -> Handler {
    Closure::new(move |event: Event| {
        if armed_by.as_ref() == Some(&event) {
            return;
        }
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let Some(target) = clicked_element(&event) else {
            return;
        };
        let Ok(mut menu) = shared.menu.try_borrow_mut() else {
            #[cfg(feature = "tracing")]
            tracing::warn!(?slot, "re-entrant click ignored");
            return;
        };
        let prop = menu.dispatch(slot, &Click::on(target));
        drop(menu);

        if prop.prevent_default {
            event.prevent_default();
        }
        if prop.stop_propagation {
            event.stop_propagation();
        }
        sync_listeners(&shared, Some(&event));
    })
}

/// Apply queued listener changes from the menu's host. `origin` is the click
/// being handled, if the changes were made during one.
fn sync_listeners(shared: &Rc<Shared>, origin: Option<&Event>) {
    let (ops, document) = {
        let mut menu = shared.menu.borrow_mut();
        let host = menu.host_mut();
        (host.take_pending(), host.document().clone())
    };
    let mut listeners = shared.listeners.borrow_mut();
    listeners.retired.clear();

    for op in ops {
        match op {
            ListenerOp::Add(target, slot) => {
                let handler = make_handler(Rc::downgrade(shared), slot, origin.cloned());
                let attached = event_target(&document, &target)
                    .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
                if let Err(err) = attached {
                    console_error(&format!("pushmenu: failed to attach {slot:?}: {err:?}"));
                    continue;
                }
                listeners.bound.push(Binding {
                    target,
                    slot,
                    handler,
                });
            }
            ListenerOp::Remove(target, slot) => {
                let Some(pos) = listeners
                    .bound
                    .iter()
                    .position(|b| b.slot == slot && b.target == target)
                else {
                    continue;
                };
                let binding = listeners.bound.swap_remove(pos);
                let _ = event_target(&document, &binding.target).remove_event_listener_with_callback(
                    "click",
                    binding.handler.as_ref().unchecked_ref(),
                );
                listeners.retired.push(binding.handler);
            }
        }
    }
}

// -- PushMenu ---------------------------------------------------------------

/// Multi-level push menu bound to the page.
///
/// ```js
/// const menu = new PushMenu("mp-menu", "trigger", JSON.stringify({ type: "cover" }));
/// menu.onEvent((name) => console.log(name));
/// menu.init();
/// ```
#[wasm_bindgen]
pub struct PushMenu {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl PushMenu {
    /// Look up the root and trigger by id and validate the options.
    /// Listeners are not attached until [`init`](Self::init).
    #[wasm_bindgen(constructor)]
    pub fn new(
        root_id: &str,
        trigger_id: &str,
        options_json: Option<String>,
    ) -> Result<PushMenu, JsValue> {
        install_panic_hook();
        let document = document()?;
        let options = parse_options(options_json.as_deref().unwrap_or_default())
            .map_err(|e| to_js(&e))?;

        let config = options.apply(PushMenuConfig {
            el: document.get_element_by_id(root_id),
            trigger: document.get_element_by_id(trigger_id),
            ..PushMenuConfig::default()
        });

        let menu = LevelMenu::new(WebDom::new(document), config).map_err(|e| to_js(&e))?;
        Ok(Self {
            shared: Rc::new(Shared {
                menu: RefCell::new(menu),
                listeners: RefCell::new(Listeners::default()),
            }),
        })
    }

    /// Annotate panels, attach listeners, and emit lifecycle events.
    pub fn init(&self) -> Result<(), JsValue> {
        self.with_menu(LevelMenu::init)
    }

    /// Open the first level.
    pub fn open(&self) -> Result<(), JsValue> {
        self.with_menu(LevelMenu::open)
    }

    /// Close every level.
    pub fn close(&self) -> Result<(), JsValue> {
        self.with_menu(LevelMenu::close)
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.shared.menu.try_borrow().is_ok_and(|m| m.is_open())
    }

    #[wasm_bindgen(js_name = currentLevel)]
    pub fn current_level(&self) -> u32 {
        self.shared.menu.try_borrow().map_or(0, |m| m.current_level())
    }

    /// Call `callback(name)` for each lifecycle event (`"eventsBound"`,
    /// `"initialized"`). Subscribe before `init()` to see both.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        self.with_menu(move |menu| {
            menu.subscribe(move |event| {
                let name = JsValue::from_str(event.as_str());
                if let Err(err) = callback.call1(&JsValue::NULL, &name) {
                    console_error(&format!("pushmenu: event callback threw: {err:?}"));
                }
            });
        })
    }
}

impl PushMenu {
    fn with_menu(&self, f: impl FnOnce(&mut LevelMenu<WebDom>)) -> Result<(), JsValue> {
        {
            let mut menu = self
                .shared
                .menu
                .try_borrow_mut()
                .map_err(|_| to_js(&MenuError::Host("menu is busy".into())))?;
            f(&mut menu);
        }
        // Page code may call in from its own click handler.
        sync_listeners(&self.shared, dispatching_event().as_ref());
        Ok(())
    }
}

impl Drop for PushMenu {
    fn drop(&mut self) {
        let Ok(menu) = self.shared.menu.try_borrow() else {
            return;
        };
        let document = menu.host().document().clone();
        drop(menu);
        let Ok(mut listeners) = self.shared.listeners.try_borrow_mut() else {
            return;
        };
        for binding in listeners.bound.drain(..) {
            let _ = event_target(&document, &binding.target).remove_event_listener_with_callback(
                "click",
                binding.handler.as_ref().unchecked_ref(),
            );
        }
    }
}

// -- ModalTriggers ----------------------------------------------------------

/// Delegated click listener that opens modals named by `data-modal`.
///
/// ```js
/// new ModalTriggers("td-modal-buttons", (name) => showModal(name));
/// ```
#[wasm_bindgen]
pub struct ModalTriggers {
    container: Element,
    handler: Handler,
}

#[wasm_bindgen]
impl ModalTriggers {
    /// Listen for clicks on `.md-trigger` elements inside `container_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, callback: js_sys::Function) -> Result<ModalTriggers, JsValue> {
        install_panic_hook();
        let document = document()?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| to_js(&MenuError::MissingOption("containerId")))?;

        let dom = WebDom::new(document);
        let rules = ModalTrigger::default();
        let handler = Handler::new(move |event: Event| {
            let Some(target) = clicked_element(&event) else {
                return;
            };
            let mut show = |name: &str| {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(name)) {
                    console_error(&format!("pushmenu: modal callback threw: {err:?}"));
                }
            };
            rules.handle(&dom, &target, &mut show);
        });

        container.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        Ok(Self { container, handler })
    }
}

impl Drop for ModalTriggers {
    fn drop(&mut self) {
        let _ = self
            .container
            .remove_event_listener_with_callback("click", self.handler.as_ref().unchecked_ref());
    }
}
