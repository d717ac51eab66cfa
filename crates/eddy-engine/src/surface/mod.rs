//! CPU pixel surface.
//!
//! The surface is an owned RGBA8 framebuffer with integer pixel
//! coordinates (top-left origin, +X right, +Y down). Exactly one surface
//! exists per loop invocation; it is created at loop start, handed to the
//! renderer by mutable reference each frame, and never resized.
//!
//! All painting operations clip against the surface bounds; off-surface
//! writes are ignored rather than errors.

mod buffer;
mod rect;

pub use buffer::Surface;
pub use rect::PixelRect;
