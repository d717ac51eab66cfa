use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use super::TextLabel;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. Rasterization goes straight to a
/// [`TextLabel`] coverage bitmap; there is no glyph cache because the
/// harness renders a single short overlay label per frame.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Lays out and rasterizes `text` at `px` pixels into a coverage bitmap.
    ///
    /// Returns an empty label for empty/whitespace text or an invalid
    /// `FontId`. Blitting an empty label is a no-op, so callers need no
    /// special casing.
    pub fn render_label(&self, text: &str, id: FontId, px: f32) -> TextLabel {
        let Some(font) = self.get(id) else {
            return TextLabel::empty();
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, px, 0));

        let glyphs = layout.glyphs();

        let mut width = 0i32;
        let mut height = 0i32;
        for g in glyphs {
            width = width.max(g.x as i32 + g.width as i32);
            height = height.max(g.y as i32 + g.height as i32);
        }
        if width <= 0 || height <= 0 {
            return TextLabel::empty();
        }

        let mut label = TextLabel::from_coverage(
            width as u32,
            height as u32,
            vec![0; (width as usize) * (height as usize)],
        );

        for g in glyphs {
            let (metrics, bitmap) = font.rasterize_config(g.key);
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let c = bitmap[row * metrics.width + col];
                    if c == 0 {
                        continue;
                    }
                    let dx = g.x as i32 + col as i32;
                    let dy = g.y as i32 + row as i32;
                    if dx < 0 || dy < 0 {
                        continue;
                    }
                    if let Some(dst) = label.coverage_mut(dx as u32, dy as u32) {
                        // Overlapping glyph bitmaps keep the denser sample.
                        *dst = (*dst).max(c);
                    }
                }
            }
        }

        label
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Probes well-known system font paths.
///
/// Returns `None` when no font is installed; callers degrade to painting
/// no text rather than failing.
pub fn system_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Monaco.ttf",
        "C:\\Windows\\Fonts\\consola.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_label_with_invalid_font_id_is_empty() {
        let fs = FontSystem::new();
        let label = fs.render_label("hello", FontId(0), 15.0);
        assert!(label.is_empty());
    }

    #[test]
    fn load_font_rejects_garbage_bytes() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(&[0u8; 16]).is_err());
    }

    #[test]
    fn render_label_produces_coverage_when_a_font_is_available() {
        // Only meaningful on hosts with a system font installed.
        let Some(bytes) = system_font() else {
            return;
        };
        let mut fs = FontSystem::new();
        let id = fs.load_font(&bytes).expect("system font should parse");

        let label = fs.render_label("fps=60.0", id, 15.0);
        assert!(!label.is_empty());
        assert!(label.covered_pixels().count() > 0);
    }
}
