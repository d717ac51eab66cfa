/// Rasterized text: an alpha-coverage bitmap plus its pixel dimensions.
///
/// Produced by `FontSystem::render_label`; consumed by
/// `Surface::blit_text`, which tints the coverage with a color at blit
/// time. Coverage is row-major, one byte per pixel.
#[derive(Debug, Clone, Default)]
pub struct TextLabel {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl TextLabel {
    /// Empty label; blitting it is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a label from raw coverage data.
    ///
    /// `coverage.len()` must equal `width * height`.
    pub fn from_coverage(width: u32, height: u32, coverage: Vec<u8>) -> Self {
        assert_eq!(coverage.len(), (width as usize) * (height as usize));
        Self {
            width,
            height,
            coverage,
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

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Yields `(x, y, coverage)` for every pixel with non-zero coverage.
    pub fn covered_pixels(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        let width = self.width;
        self.coverage
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(move |(i, &c)| {
                let x = (i as u32) % width;
                let y = (i as u32) / width;
                (x, y, c)
            })
    }

    pub(crate) fn coverage_mut(&mut self, x: u32, y: u32) -> Option<&mut u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize) * (self.width as usize) + (x as usize);
        self.coverage.get_mut(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_pixels_skips_zero_coverage() {
        let label = TextLabel::from_coverage(2, 2, vec![0, 10, 0, 20]);
        let covered: Vec<_> = label.covered_pixels().collect();
        assert_eq!(covered, vec![(1, 0, 10), (1, 1, 20)]);
    }

    #[test]
    fn empty_label_yields_nothing() {
        assert_eq!(TextLabel::empty().covered_pixels().count(), 0);
    }
}
