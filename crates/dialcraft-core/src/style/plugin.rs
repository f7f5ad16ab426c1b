//! The style plugin protocol.
//!
//! Every visual skin implements [`StylePlugin`] over the host's surface
//! type `S` (a DOM node, a terminal writer, a test probe - the core
//! never looks inside it).

use serde::{Deserialize, Serialize};

use crate::draw::DrawState;
use crate::error::StyleError;

/// Constant per-style metadata, fixed at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub id: String,
    pub label: String,
    /// The dial renders the time label itself; hosts that draw a shared
    /// label outside the dial hide it for such styles.
    #[serde(default)]
    pub show_label_inside_dial: bool,
}

impl StyleDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            show_label_inside_dial: false,
        }
    }

    pub fn with_label_inside_dial(mut self) -> Self {
        self.show_label_inside_dial = true;
        self
    }
}

/// Contract implemented by every visual style.
///
/// Lifecycle: constructed once, mounted once via `create`, then toggled
/// by `set_active` and re-rendered by `update` for the rest of the
/// session. Styles are never destroyed.
///
/// Renderer obligations:
/// - `update` before `create` must be a no-op, and malformed or short
///   label text is padded with default digits rather than rejected.
/// - `set_active` toggles visibility only; an inactive style resumes
///   showing its last rendered values when re-activated.
/// - `update` runs once per tick and must stay cheap.
pub trait StylePlugin<S> {
    fn descriptor(&self) -> &StyleDescriptor;

    /// One-time mount into the host surface, called exactly once before
    /// any `set_active`/`update`.
    fn create(&mut self, surface: &mut S) -> Result<(), StyleError>;

    /// Toggle visibility. Must not rebuild or reset visual state.
    fn set_active(&mut self, active: bool) -> Result<(), StyleError>;

    /// Raw visibility toggle, used as the fallback path when
    /// `set_active` fails. Must not fail.
    fn set_visible(&mut self, visible: bool);

    /// Re-render from the given draw state.
    fn update(&mut self, draw: &DrawState) -> Result<(), StyleError>;
}
