mod engine;
mod warning;

pub use engine::{Mode, TimeEngine};
pub use warning::{proximity_warning, Warning};
