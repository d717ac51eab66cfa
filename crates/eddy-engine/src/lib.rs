//! eddy engine crate.
//!
//! A reusable windowed run-loop: it owns the window lifecycle, a CPU pixel
//! surface, fixed-rate pacing, and the per-frame sequence
//! {drain events → clear → render → present → pace}, and hands the surface
//! to a caller-supplied renderer once per frame. Demo binaries live in
//! `eddy-demos`; simulator contracts live in `eddy-sim`.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod surface;
pub mod text;
pub mod time;
pub mod window;

pub use crate::core::{run, ConfigError, Render, RunConfig};
pub use crate::paint::Color;
pub use crate::surface::{PixelRect, Surface};
