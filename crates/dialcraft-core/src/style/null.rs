//! No-op style used by tests and headless hosts.
//!
//! It draws nothing but keeps the full protocol honest: it tracks mount
//! state, refuses nothing, and records the last draw state so callers
//! can assert on what a real renderer would have been given.

use std::cell::RefCell;
use std::rc::Rc;

use crate::draw::DrawState;
use crate::error::StyleError;

use super::plugin::{StyleDescriptor, StylePlugin};

/// Observable state shared between a [`NullStyle`] and its probe.
#[derive(Debug, Default, Clone)]
pub struct NullStyleState {
    pub created: bool,
    pub active: bool,
    pub update_count: usize,
    pub last_draw: Option<DrawState>,
}

/// Shared handle onto a registered [`NullStyle`]'s recorded state.
pub type NullStyleProbe = Rc<RefCell<NullStyleState>>;

pub struct NullStyle {
    descriptor: StyleDescriptor,
    state: NullStyleProbe,
}

impl NullStyle {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = format!("Null {id}");
        Self {
            descriptor: StyleDescriptor::new(id, label),
            state: Rc::new(RefCell::new(NullStyleState::default())),
        }
    }

    /// Build a style plus a probe that stays valid after the style is
    /// boxed into a registry.
    pub fn with_probe(id: impl Into<String>) -> (Self, NullStyleProbe) {
        let style = Self::new(id);
        let probe = Rc::clone(&style.state);
        (style, probe)
    }
}

impl<S> StylePlugin<S> for NullStyle {
    fn descriptor(&self) -> &StyleDescriptor {
        &self.descriptor
    }

    fn create(&mut self, _surface: &mut S) -> Result<(), StyleError> {
        self.state.borrow_mut().created = true;
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> Result<(), StyleError> {
        self.state.borrow_mut().active = active;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().active = visible;
    }

    fn update(&mut self, draw: &DrawState) -> Result<(), StyleError> {
        let mut state = self.state.borrow_mut();
        if !state.created {
            // Update before mount is tolerated, not an error.
            return Ok(());
        }
        state.update_count += 1;
        state.last_draw = Some(draw.clone());
        Ok(())
    }
}
