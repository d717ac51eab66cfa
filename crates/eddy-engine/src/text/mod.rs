//! Text rasterization for overlay labels.
//!
//! The surface is CPU-side, so text is rasterized to a coverage bitmap
//! ([`TextLabel`]) and alpha-blended by `Surface::blit_text`. Callers
//! render a label per frame (or cache one) the same way they would render
//! any other pre-built asset.

mod font_system;
mod label;

pub use font_system::{system_font, FontId, FontLoadError, FontSystem};
pub use label::TextLabel;
