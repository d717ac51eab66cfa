use crate::paint::Color;
use crate::text::TextLabel;

use super::PixelRect;

/// Owned RGBA8 framebuffer handed to the renderer once per frame.
///
/// The buffer is `width × height` pixels, row-major from the top-left.
/// Painting operations clip silently; readback via [`pixel`](Surface::pixel)
/// is the test/tooling surface.
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Surface {
    /// Creates a surface filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Writes one pixel. Off-surface coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.pixels[i] = color;
    }

    /// Reads one pixel, `None` off-surface.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[self.index(x as u32, y as u32)])
    }

    /// Fills the whole surface.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fills a rectangle, clipped against the surface bounds.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let Some(r) = rect.clip_to(self.width, self.height) else {
            return;
        };
        for y in r.y..r.y + r.h {
            let row = self.index(r.x as u32, y as u32);
            self.pixels[row..row + r.w as usize].fill(color);
        }
    }

    /// Strokes a rectangle outline of `thickness` pixels, clipped.
    ///
    /// The stroke grows inward from the rectangle edge.
    pub fn outline_rect(&mut self, rect: PixelRect, color: Color, thickness: u32) {
        let r = rect.normalized();
        if r.is_empty() || thickness == 0 {
            return;
        }
        let t = (thickness as i32).min(r.w).min(r.h);

        self.fill_rect(PixelRect::new(r.x, r.y, r.w, t), color);
        self.fill_rect(PixelRect::new(r.x, r.y + r.h - t, r.w, t), color);
        self.fill_rect(PixelRect::new(r.x, r.y, t, r.h), color);
        self.fill_rect(PixelRect::new(r.x + r.w - t, r.y, t, r.h), color);
    }

    /// Alpha-blends a rasterized text label at `(x, y)` (top-left of the
    /// label), tinted with `color`. Off-surface parts are clipped.
    pub fn blit_text(&mut self, label: &TextLabel, x: i32, y: i32, color: Color) {
        for (lx, ly, coverage) in label.covered_pixels() {
            let alpha = (coverage as u16 * color.a as u16) / 255;
            if alpha == 0 {
                continue;
            }

            let dx = x + lx as i32;
            let dy = y + ly as i32;
            let Some(dst) = self.pixel(dx, dy) else {
                continue;
            };

            let blend = |s: u8, d: u8| -> u8 {
                ((s as u16 * alpha + d as u16 * (255 - alpha)) / 255) as u8
            };
            self.set_pixel(
                dx,
                dy,
                Color::rgba(
                    blend(color.r, dst.r),
                    blend(color.g, dst.g),
                    blend(color.b, dst.b),
                    255,
                ),
            );
        }
    }

    /// Tightly-packed RGBA8 view of the pixel buffer for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_pixels(surface: &Surface, color: Color) -> usize {
        let mut n = 0;
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    // ── pixels ────────────────────────────────────────────────────────────

    #[test]
    fn new_surface_is_filled_with_the_given_color() {
        let s = Surface::new(4, 3, Color::CLEAR_SENTINEL);
        assert_eq!(count_pixels(&s, Color::CLEAR_SENTINEL), 12);
    }

    #[test]
    fn set_pixel_clips_out_of_bounds_writes() {
        let mut s = Surface::new(4, 4, Color::BLACK);
        s.set_pixel(-1, 0, Color::WHITE);
        s.set_pixel(0, -1, Color::WHITE);
        s.set_pixel(4, 0, Color::WHITE);
        s.set_pixel(0, 4, Color::WHITE);
        assert_eq!(count_pixels(&s, Color::WHITE), 0);
    }

    #[test]
    fn set_then_read_roundtrips() {
        let mut s = Surface::new(4, 4, Color::BLACK);
        s.set_pixel(2, 3, Color::rgb(10, 20, 30));
        assert_eq!(s.pixel(2, 3), Some(Color::rgb(10, 20, 30)));
        assert_eq!(s.pixel(4, 4), None);
    }

    // ── rects ─────────────────────────────────────────────────────────────

    #[test]
    fn fill_rect_touches_only_the_clipped_region() {
        let mut s = Surface::new(8, 8, Color::BLACK);
        s.fill_rect(PixelRect::new(6, 6, 4, 4), Color::WHITE);
        assert_eq!(count_pixels(&s, Color::WHITE), 4);
        assert_eq!(s.pixel(6, 6), Some(Color::WHITE));
        assert_eq!(s.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn fill_rect_fully_outside_is_a_no_op() {
        let mut s = Surface::new(8, 8, Color::BLACK);
        s.fill_rect(PixelRect::new(-10, -10, 5, 5), Color::WHITE);
        s.fill_rect(PixelRect::new(100, 0, 5, 5), Color::WHITE);
        assert_eq!(count_pixels(&s, Color::WHITE), 0);
    }

    #[test]
    fn outline_rect_leaves_the_interior_untouched() {
        let mut s = Surface::new(8, 8, Color::BLACK);
        s.outline_rect(PixelRect::new(1, 1, 6, 6), Color::WHITE, 1);
        assert_eq!(s.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(s.pixel(6, 6), Some(Color::WHITE));
        assert_eq!(s.pixel(3, 3), Some(Color::BLACK));
        // 6×6 outline at thickness 1: 36 - 16 interior = 20 pixels.
        assert_eq!(count_pixels(&s, Color::WHITE), 20);
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn blit_text_blends_coverage_and_clips() {
        // 2×1 label: left pixel fully covered, right pixel untouched.
        let label = TextLabel::from_coverage(2, 1, vec![255, 0]);

        let mut s = Surface::new(2, 1, Color::BLACK);
        s.blit_text(&label, 0, 0, Color::WHITE);
        assert_eq!(s.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(s.pixel(1, 0), Some(Color::BLACK));

        // Off-surface placement must not panic or wrap.
        s.blit_text(&label, -5, 10, Color::WHITE);
        assert_eq!(count_pixels(&s, Color::WHITE), 1);
    }

    #[test]
    fn blit_text_partial_coverage_blends_toward_the_tint() {
        let label = TextLabel::from_coverage(1, 1, vec![128]);
        let mut s = Surface::new(1, 1, Color::BLACK);
        s.blit_text(&label, 0, 0, Color::WHITE);

        let px = s.pixel(0, 0).unwrap();
        assert!(px.r > 100 && px.r < 150, "got {}", px.r);
        assert_eq!(px.r, px.g);
        assert_eq!(px.g, px.b);
    }

    // ── upload view ───────────────────────────────────────────────────────

    #[test]
    fn as_bytes_is_tightly_packed_rgba() {
        let mut s = Surface::new(2, 1, Color::BLACK);
        s.set_pixel(1, 0, Color::rgba(1, 2, 3, 4));
        assert_eq!(s.as_bytes(), &[0, 0, 0, 255, 1, 2, 3, 4]);
    }
}
