#![forbid(unsafe_code)]

//! Browser bindings for `pushmenu-core`.
//!
//! - [`options`]: camelCase options JSON, parsed with `serde_json`. Native.
//! - `WebDom`: [`pushmenu_core::DomHost`] over `web-sys`. wasm32 only.
//! - `PushMenu` / `ModalTriggers`: `wasm-bindgen` exports that attach real
//!   click listeners and route them into the core. wasm32 only.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use options::{MenuOptions, OptionsError, parse_options};

#[cfg(target_arch = "wasm32")]
pub use dom::{ListenerOp, WebDom};
#[cfg(target_arch = "wasm32")]
pub use wasm::{ModalTriggers, PushMenu};
