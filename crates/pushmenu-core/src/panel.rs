#![forbid(unsafe_code)]

//! Records built once at init: level panels and sub-level menu items.

use crate::depth::level_depth;
use crate::host::DomHost;

/// Attribute mirroring each panel's depth for stylesheets and inspection.
pub const DEPTH_ATTRIBUTE: &str = "data-level";

/// A level panel and its nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel<N> {
    pub node: N,
    pub depth: u32,
}

/// A menu item that owns a nested panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<N> {
    /// The item element (`li`).
    pub item: N,
    /// The link whose click opens `sub_panel`.
    pub link: N,
    /// First level panel nested inside the item.
    pub sub_panel: N,
}

/// Annotate every panel under `root` with its depth.
///
/// Writes [`DEPTH_ATTRIBUTE`] on each panel and returns the records in
/// document order.
pub fn annotate_panels<H: DomHost + ?Sized>(
    host: &mut H,
    root: &H::Node,
    level_selector: &str,
    level_class: &str,
) -> Vec<Panel<H::Node>> {
    let nodes = host.query_all(root, level_selector);
    let mut panels = Vec::with_capacity(nodes.len());
    for node in nodes {
        let depth = level_depth(host, &node, root, level_class);
        host.set_attribute(&node, DEPTH_ATTRIBUTE, &depth.to_string());
        panels.push(Panel { node, depth });
    }
    panels
}

/// Collect the items under `root` that contain a nested panel.
///
/// Items with a nested panel but no link are skipped.
pub fn collect_menu_items<H: DomHost + ?Sized>(
    host: &H,
    root: &H::Node,
    item_selector: &str,
    link_selector: &str,
    level_selector: &str,
) -> Vec<MenuItem<H::Node>> {
    host.query_all(root, item_selector)
        .into_iter()
        .filter_map(|item| {
            let sub_panel = host.query_first(&item, level_selector)?;
            let Some(link) = host.query_first(&item, link_selector) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(?item, "menu item has a sub level but no link; skipped");
                return None;
            };
            Some(MenuItem {
                item,
                link,
                sub_panel,
            })
        })
        .collect()
}
