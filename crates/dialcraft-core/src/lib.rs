//! # Dialcraft Core Library
//!
//! Core logic for the Dialcraft multi-style clock/timer. The crate owns
//! the time-tracking state and the contracts around it; everything
//! visual lives in host shells that plug in through two narrow seams
//! (render the current draw state, advance one tick).
//!
//! ## Architecture
//!
//! - **Time Engine**: a tick-driven counter pair (pomodoro countdown,
//!   count-up timer) plus a wall-clock mode; the caller invokes `step()`
//!   once per second
//! - **Draw State**: the normalized angle/label snapshot every renderer
//!   consumes, derived purely from engine state
//! - **Style Protocol**: the trait each visual skin implements, and the
//!   registry that keeps exactly one skin visible
//! - **Controller**: start/pause/reset and mode/style navigation over a
//!   single owned loop slot, so at most one repeating loop is ever armed
//!
//! The core knows nothing about rendering technology and holds no
//! ambient singletons; hosts construct one [`Controller`] from an
//! [`EngineConfig`] and drive it.
//!
//! ## Key Components
//!
//! - [`TimeEngine`]: countdown/count-up/clock state machine
//! - [`DrawState`]: renderer-agnostic snapshot for one instant
//! - [`StylePlugin`] / [`StyleRegistry`]: pluggable visual skins
//! - [`Controller`]: render loop and mode controller

pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod events;
pub mod style;
pub mod timer;

pub use config::EngineConfig;
pub use controller::{Controller, LoopKind, RunState};
pub use draw::{format_hms, format_mmss, DrawState};
pub use error::{ConfigError, CoreError, StyleError};
pub use events::Event;
pub use style::{NullStyle, StyleDescriptor, StylePlugin, StyleRegistry};
pub use timer::{proximity_warning, Mode, TimeEngine, Warning};
