//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, translates platform events into
//! the engine's input queue, and drives the per-frame sequence against the
//! GPU blit layer.

mod runtime;

pub use runtime::Runtime;
