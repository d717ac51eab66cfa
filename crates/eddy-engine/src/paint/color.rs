use bytemuck::{Pod, Zeroable};

/// 8-bit straight-alpha RGBA color.
///
/// `repr(C)` with no padding so a `&[Color]` pixel buffer can be viewed as
/// bytes for texture upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Diagnostic fill for regions nothing has painted yet.
    pub const CLEAR_SENTINEL: Color = Color::rgb(255, 0, 255);

    /// Substituted for a cell whose field sample cannot be converted.
    pub const ERROR_SENTINEL: Color = Color::rgb(255, 0, 0);

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn grayscale(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Maps a density sample to a grayscale level.
    ///
    /// Total over all `f32` inputs: values are scaled by 255 and clamped to
    /// `[0, 255]`; a non-finite sample yields [`Color::ERROR_SENTINEL`]
    /// instead of panicking or propagating. A bad cell must never abort the
    /// frame.
    #[inline]
    pub fn from_density(density: f32) -> Self {
        if !density.is_finite() {
            return Self::ERROR_SENTINEL;
        }
        let level = (255.0 * density).clamp(0.0, 255.0) as u8;
        Self::grayscale(level)
    }
}
