#![forbid(unsafe_code)]

//! Delegated modal triggers.
//!
//! A single click listener on a container resolves clicks on elements marked
//! with the trigger class to the modal named by their `data-modal` attribute,
//! then asks a [`ModalHost`] to show it.

use crate::host::DomHost;

/// Something that can display a named modal.
pub trait ModalHost {
    fn show(&mut self, name: &str);
}

impl<F: FnMut(&str)> ModalHost for F {
    fn show(&mut self, name: &str) {
        self(name);
    }
}

/// Matching rules for delegated modal triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalTrigger {
    pub trigger_class: String,
    pub modal_attribute: String,
}

impl Default for ModalTrigger {
    fn default() -> Self {
        Self {
            trigger_class: "md-trigger".into(),
            modal_attribute: "data-modal".into(),
        }
    }
}

impl ModalTrigger {
    #[must_use]
    pub fn with_trigger_class(mut self, class: impl Into<String>) -> Self {
        self.trigger_class = class.into();
        self
    }

    #[must_use]
    pub fn with_modal_attribute(mut self, name: impl Into<String>) -> Self {
        self.modal_attribute = name.into();
        self
    }

    /// Modal name for a click on `target`, if it is a trigger.
    ///
    /// Only the click target itself is inspected; clicks on a trigger's
    /// children do not count.
    pub fn resolve<H: DomHost + ?Sized>(&self, host: &H, target: &H::Node) -> Option<String> {
        if !host.has_class(target, &self.trigger_class) {
            return None;
        }
        host.attribute(target, &self.modal_attribute)
            .filter(|name| !name.is_empty())
    }

    /// Resolve `target` and show the modal. Returns whether one was shown.
    pub fn handle<H, M>(&self, host: &H, target: &H::Node, modals: &mut M) -> bool
    where
        H: DomHost + ?Sized,
        M: ModalHost + ?Sized,
    {
        match self.resolve(host, target) {
            Some(name) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(modal = %name, "modal trigger clicked");
                modals.show(&name);
                true
            }
            None => false,
        }
    }
}
