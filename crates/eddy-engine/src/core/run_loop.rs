use anyhow::Result;

use crate::input::EventQueue;
use crate::paint::Color;
use crate::surface::Surface;

use super::{Render, RunConfig};

/// Per-invocation loop state and the owned surface.
///
/// One `FrameLoop` exists per `run` invocation; the loop never re-enters
/// itself. The windowed runtime drives it as
/// {[`pump`](FrameLoop::pump) → [`frame`](FrameLoop::frame) → present →
/// pace}, checking [`running`](FrameLoop::running) at the top of each
/// iteration. The iteration that observes a quit event still renders
/// and presents before the loop exits.
pub struct FrameLoop {
    surface: Surface,
    clear_color: Color,
    running: bool,
    frame_index: u64,
}

impl FrameLoop {
    /// Creates the loop state with the surface pre-filled with the clear
    /// sentinel, so the very first present shows it even if the renderer
    /// paints nothing.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            surface: Surface::new(config.width, config.height, config.clear_color),
            clear_color: config.clear_color,
            running: true,
            frame_index: 0,
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Number of completed frames.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Drains all pending events.
    ///
    /// A quit event latches the stop flag but never short-circuits: the
    /// whole batch is always processed, and the flag is only consulted at
    /// the top of the next iteration.
    pub fn pump(&mut self, events: &mut EventQueue) {
        for event in events.drain() {
            if event.is_quit() {
                self.running = false;
            }
            // TODO: interpret pointer events (currently drained and dropped)
        }
    }

    /// Runs one frame: clear, then render.
    ///
    /// Presentation is the caller's next step; a renderer error leaves the
    /// frame unpresented and uncounted.
    pub fn frame(&mut self, renderer: &mut dyn Render) -> Result<()> {
        self.surface.fill(self.clear_color);
        renderer.render(&mut self.surface)?;
        self.frame_index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;

    struct CounterRender {
        count: u8,
    }

    impl Render for CounterRender {
        fn render(&mut self, surface: &mut Surface) -> Result<()> {
            self.count = self.count.wrapping_add(1);
            surface.set_pixel(0, 0, Color::rgba(self.count, 0, 0, 255));
            Ok(())
        }
    }

    fn test_loop() -> FrameLoop {
        FrameLoop::new(&RunConfig::new(100, 100, "t"))
    }

    /// Drives the loop exactly as the windowed runtime does, with an
    /// immediate clock.
    fn drive(
        frame_loop: &mut FrameLoop,
        events: &mut EventQueue,
        renderer: &mut dyn Render,
        max_iterations: usize,
    ) -> usize {
        let mut iterations = 0;
        while frame_loop.running() && iterations < max_iterations {
            frame_loop.pump(events);
            frame_loop.frame(renderer).unwrap();
            iterations += 1;
        }
        iterations
    }

    // ── termination ───────────────────────────────────────────────────────

    #[test]
    fn immediate_quit_terminates_after_one_frame() {
        let mut frame_loop = test_loop();
        let mut events = EventQueue::new();
        events.push(InputEvent::Quit);

        let iterations = drive(&mut frame_loop, &mut events, &mut CounterRender { count: 0 }, 100);

        assert_eq!(iterations, 1);
        assert_eq!(frame_loop.frame_index(), 1);
    }

    #[test]
    fn quit_latches_but_the_batch_frame_still_renders() {
        let mut frame_loop = test_loop();
        let mut events = EventQueue::new();
        events.push(InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        events.push(InputEvent::Quit);

        frame_loop.pump(&mut events);
        assert!(!frame_loop.running());
        assert!(events.is_empty(), "the whole batch is drained");

        // The in-flight iteration still clears and renders.
        let mut renderer = CounterRender { count: 0 };
        frame_loop.frame(&mut renderer).unwrap();
        assert_eq!(frame_loop.surface().pixel(0, 0), Some(Color::rgba(1, 0, 0, 255)));
    }

    #[test]
    fn non_quit_events_do_not_stop_the_loop() {
        let mut frame_loop = test_loop();
        let mut events = EventQueue::new();
        events.push(InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        events.push(InputEvent::PointerButton { pressed: true });

        frame_loop.pump(&mut events);
        assert!(frame_loop.running());
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn five_frames_show_count_five_at_the_origin() {
        let mut frame_loop = test_loop();
        let mut events = EventQueue::new();
        let mut renderer = CounterRender { count: 0 };

        for _ in 0..5 {
            frame_loop.pump(&mut events);
            frame_loop.frame(&mut renderer).unwrap();
        }

        let px = frame_loop.surface().pixel(0, 0).unwrap();
        assert_eq!(px.r, 5);
        assert_eq!(frame_loop.frame_index(), 5);
    }

    #[test]
    fn surface_is_cleared_before_every_render() {
        let mut frame_loop = test_loop();

        let mut stamp = |surface: &mut Surface| -> Result<()> {
            surface.set_pixel(7, 7, Color::BLACK);
            Ok(())
        };
        frame_loop.frame(&mut stamp).unwrap();
        assert_eq!(frame_loop.surface().pixel(7, 7), Some(Color::BLACK));

        // The next frame starts from the clear color again.
        let mut check = |surface: &mut Surface| -> Result<()> {
            assert_eq!(surface.pixel(7, 7), Some(Color::CLEAR_SENTINEL));
            Ok(())
        };
        frame_loop.frame(&mut check).unwrap();
    }

    #[test]
    fn renderer_error_leaves_the_frame_uncounted() {
        let mut frame_loop = test_loop();
        let mut failing = |_: &mut Surface| -> Result<()> { anyhow::bail!("boom") };

        assert!(frame_loop.frame(&mut failing).is_err());
        assert_eq!(frame_loop.frame_index(), 0);
    }
}
