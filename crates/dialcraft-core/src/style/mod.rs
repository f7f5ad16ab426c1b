mod null;
mod plugin;
mod registry;

pub use null::{NullStyle, NullStyleProbe, NullStyleState};
pub use plugin::{StyleDescriptor, StylePlugin};
pub use registry::StyleRegistry;
