#![forbid(unsafe_code)]

//! JSON options parser for the JavaScript constructor.
//!
//! [`parse_options`] accepts the same camelCase option object the widget has
//! always taken (`type`, `levelSpacing`, `backClass`, ...) serialized as
//! JSON, and [`MenuOptions::apply`] folds it into a [`PushMenuConfig`].
//! Every field is optional; unknown fields are ignored and an unknown `type`
//! falls back to overlap.
//!
//! This module has no JS/WASM types so it can be tested natively.

use pushmenu_core::{MenuType, PushMenuConfig};
use serde::Deserialize;

/// Errors from parsing options JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Malformed JSON or a field of the wrong type.
    Json(String),
}

impl core::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "options JSON parse error: {msg}"),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Optional overrides, as supplied by the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOptions {
    #[serde(rename = "type")]
    pub menu_type: Option<String>,
    pub level_spacing: Option<f64>,
    pub back_class: Option<String>,
    pub pushed_class: Option<String>,
    pub level_class: Option<String>,
    pub level_selector: Option<String>,
    pub wrapper_selector: Option<String>,
    pub menu_open_class: Option<String>,
    pub menu_overlay_class: Option<String>,
    pub item_selector: Option<String>,
    pub link_selector: Option<String>,
}

/// Parse options JSON. Empty or whitespace-only input yields the defaults.
pub fn parse_options(json: &str) -> Result<MenuOptions, OptionsError> {
    if json.trim().is_empty() {
        return Ok(MenuOptions::default());
    }
    serde_json::from_str(json).map_err(|e| OptionsError::Json(e.to_string()))
}

impl MenuOptions {
    /// Overlay the supplied fields onto `config`.
    #[must_use]
    pub fn apply<N>(&self, mut config: PushMenuConfig<N>) -> PushMenuConfig<N> {
        if let Some(name) = &self.menu_type {
            config.menu_type = MenuType::from_name(name);
        }
        if let Some(px) = self.level_spacing {
            config.level_spacing = px;
        }

        let classes = &mut config.classes;
        set(&mut classes.back, self.back_class.as_deref());
        set(&mut classes.pushed, self.pushed_class.as_deref());
        set(&mut classes.level, self.level_class.as_deref());
        set(&mut classes.menu_open, self.menu_open_class.as_deref());
        set(&mut classes.menu_overlay, self.menu_overlay_class.as_deref());

        let selectors = &mut config.selectors;
        set(&mut selectors.level, self.level_selector.as_deref());
        set(&mut selectors.wrapper, self.wrapper_selector.as_deref());
        set(&mut selectors.item, self.item_selector.as_deref());
        set(&mut selectors.link, self.link_selector.as_deref());
        config
    }
}

fn set(slot: &mut String, value: Option<&str>) {
    if let Some(v) = value {
        v.clone_into(slot);
    }
}
