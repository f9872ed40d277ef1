#![forbid(unsafe_code)]

//! Core: multi-level push menu state, depth annotation, and transform math.
//!
//! # Role in pushmenu
//! `pushmenu-core` owns everything about the push menu that does not need a
//! browser. The page's DOM is reached through the [`DomHost`] trait, so the
//! level state machine, the depth walk, and the wrapper translation can be
//! driven from plain tests with [`testing::MockDom`].
//!
//! # Primary responsibilities
//! - **LevelMenu**: open/close/reset state machine and click routing.
//! - **Depth annotation**: nesting depth of every level panel.
//! - **Transforms**: wrapper translation per level and menu type.
//! - **Notifications**: `eventsBound` / `initialized` lifecycle signals.
//! - **Modal triggers**: delegated click resolution to a modal name.
//!
//! # How it fits in the system
//! `pushmenu-web` implements [`DomHost`] over `web-sys`, attaches the real
//! listeners the menu asks for, and forwards clicks to
//! [`LevelMenu::dispatch`].

pub mod config;
pub mod depth;
pub mod error;
pub mod host;
pub mod logging;
pub mod menu;
pub mod modal;
pub mod notify;
pub mod panel;
pub mod transform;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};

pub use config::{ClassNames, MenuType, PushMenuConfig, Selectors};
pub use error::MenuError;
pub use host::{Click, DomHost, ListenTarget, ListenerSlot, Propagation};
pub use menu::LevelMenu;
pub use modal::{ModalHost, ModalTrigger};
pub use notify::{MenuEvent, SubscriptionId};
pub use panel::{MenuItem, Panel};
pub use transform::Transform;
