#![forbid(unsafe_code)]

//! Ancestor walks over the host tree.
//!
//! # Invariants
//!
//! 1. `level_depth` counts level-marked nodes from the start node (inclusive)
//!    up to the root (exclusive).
//! 2. A node whose parent chain never reaches the root has depth 0.
//! 3. The root itself has depth 0, whatever its classes.

use crate::host::DomHost;

/// Nesting depth of `node` relative to `root`, counting only ancestors that
/// carry `level_class`.
pub fn level_depth<H: DomHost + ?Sized>(
    host: &H,
    node: &H::Node,
    root: &H::Node,
    level_class: &str,
) -> u32 {
    let mut depth = 0u32;
    let mut current = node.clone();
    loop {
        if &current == root {
            return depth;
        }
        if host.has_class(&current, level_class) {
            depth += 1;
        }
        match host.parent(&current) {
            Some(parent) => current = parent,
            // Detached from the root.
            None => return 0,
        }
    }
}

/// Nearest inclusive ancestor of `node` carrying `class`.
pub fn closest<H: DomHost + ?Sized>(host: &H, node: &H::Node, class: &str) -> Option<H::Node> {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if host.has_class(&n, class) {
            return Some(n);
        }
        current = host.parent(&n);
    }
    None
}

/// Whether `node` is `root` or one of its descendants.
pub fn is_within<H: DomHost + ?Sized>(host: &H, node: &H::Node, root: &H::Node) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if &n == root {
            return true;
        }
        current = host.parent(&n);
    }
    false
}
