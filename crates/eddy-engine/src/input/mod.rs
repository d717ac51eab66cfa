//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types; the
//! window runtime translates platform events into [`InputEvent`]s and the
//! run-loop drains the queue once per frame. Only the quit class is acted
//! upon by the core.

mod queue;
mod types;

pub use queue::EventQueue;
pub use types::InputEvent;
