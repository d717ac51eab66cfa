use anyhow::Result;

use crate::paint::Color;
use crate::surface::Surface;
use crate::text::{system_font, FontSystem, TextLabel};

/// Per-frame unit of work supplied by the caller.
///
/// Invoked synchronously exactly once per frame on the run-loop thread,
/// after the surface is cleared and before the frame is presented. State
/// that must persist across frames (counters, timers) lives as fields on
/// the implementing type; the run-loop neither knows about nor manages it.
///
/// An `Err` return propagates out of the loop after the windowing
/// subsystem is torn down. There is no retry: a failed frame is not
/// redrawn.
pub trait Render {
    fn render(&mut self, surface: &mut Surface) -> Result<()>;
}

/// Stateless closures are renderers too.
impl<F> Render for F
where
    F: FnMut(&mut Surface) -> Result<()>,
{
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        self(surface)
    }
}

/// Renderer substituted when the caller supplies none.
///
/// Paints a fixed diagnostic message so an empty `run` invocation shows
/// something other than the bare sentinel fill. The message label is
/// resolved once at construction; each frame is a single blit. When no
/// system font exists the renderer degrades to a logged no-op and the
/// sentinel clear color stays visible, which is the diagnostic.
pub struct FallbackRender {
    label: TextLabel,
}

impl FallbackRender {
    const MESSAGE: &'static str = "no renderer installed";

    pub fn new() -> Self {
        let label = system_font()
            .and_then(|bytes| {
                let mut fonts = FontSystem::new();
                let id = fonts.load_font(&bytes).ok()?;
                Some(fonts.render_label(Self::MESSAGE, id, 18.0))
            })
            .unwrap_or_else(|| {
                log::warn!("no system font found; fallback renderer paints nothing");
                TextLabel::empty()
            });

        Self { label }
    }
}

impl Default for FallbackRender {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for FallbackRender {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        surface.blit_text(&self.label, 16, 16, Color::WHITE);
        Ok(())
    }
}
