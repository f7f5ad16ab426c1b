//! Ordered style registration and activation.
//!
//! The registry guarantees exactly one visible style at any time and
//! isolates renderer failures: a style that errors in `set_active` or
//! `update` is logged and degraded, never allowed to break navigation
//! for the other styles.

use tracing::warn;

use crate::draw::DrawState;
use crate::error::StyleError;

use super::plugin::{StyleDescriptor, StylePlugin};

pub struct StyleRegistry<S> {
    styles: Vec<Box<dyn StylePlugin<S>>>,
    active: usize,
}

impl<S> StyleRegistry<S> {
    pub fn new() -> Self {
        Self {
            styles: Vec::new(),
            active: 0,
        }
    }

    /// Append a style to the navigation order.
    ///
    /// Descriptors are validated here, once, instead of on every call:
    /// ids must be non-empty and unique.
    pub fn register(&mut self, style: Box<dyn StylePlugin<S>>) -> Result<(), StyleError> {
        let id = &style.descriptor().id;
        if id.is_empty() {
            return Err(StyleError::EmptyId);
        }
        if self.styles.iter().any(|s| &s.descriptor().id == id) {
            return Err(StyleError::DuplicateId(id.clone()));
        }
        self.styles.push(style);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_descriptor(&self) -> Option<&StyleDescriptor> {
        self.styles.get(self.active).map(|s| s.descriptor())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.iter().map(|s| s.descriptor())
    }

    /// Mount every registered style into the surface, then apply the
    /// current activation. A failing mount is logged; the style stays
    /// registered but will simply keep failing quietly.
    pub fn mount_all(&mut self, surface: &mut S) {
        for style in &mut self.styles {
            if let Err(e) = style.create(surface) {
                warn!(id = %style.descriptor().id, error = %e, "style failed to mount");
            }
        }
        self.apply_active();
    }

    /// Make exactly the style at `index` (mod len) visible.
    pub fn activate(&mut self, index: usize) {
        if self.styles.is_empty() {
            return;
        }
        self.active = index % self.styles.len();
        self.apply_active();
    }

    pub fn next(&mut self) {
        if !self.styles.is_empty() {
            self.activate(self.active + 1);
        }
    }

    pub fn prev(&mut self) {
        if !self.styles.is_empty() {
            self.activate(self.active + self.styles.len() - 1);
        }
    }

    fn apply_active(&mut self) {
        let active = self.active;
        for (i, style) in self.styles.iter_mut().enumerate() {
            let on = i == active;
            if let Err(e) = style.set_active(on) {
                warn!(
                    id = %style.descriptor().id,
                    error = %e,
                    "set_active failed; falling back to raw visibility toggle"
                );
                style.set_visible(on);
            }
        }
    }

    /// Re-render the active style. Failures are logged, never
    /// propagated, so one broken renderer at worst freezes its own dial.
    pub fn update_active(&mut self, draw: &DrawState) {
        if let Some(style) = self.styles.get_mut(self.active) {
            if let Err(e) = style.update(draw) {
                warn!(id = %style.descriptor().id, error = %e, "style update failed");
            }
        }
    }
}

impl<S> Default for StyleRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
