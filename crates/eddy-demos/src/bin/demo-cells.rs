//! Scaled-cell view with an FPS overlay.
//!
//! A 128-grid drift field shown at 4×4 pixels per cell, seeded with a
//! square whose Y-velocity is sine-modulated so the plume shears as it
//! moves. A debug label bottom-right reports frame index, frame time, and
//! rate; the renderer owns its own counter and timestamp across frames.

use std::f32::consts::PI;
use std::time::Instant;

use anyhow::Result;

use eddy_engine::logging::{init_logging, LoggingConfig};
use eddy_engine::text::{system_font, FontId, FontSystem};
use eddy_engine::{run, Color, PixelRect, RunConfig, Surface};
use eddy_sim::{DriftSim, Simulator};

const SIM_SIZE: usize = 128;
const CELL_PX: i32 = 4;
const WINDOW_SIZE: u32 = (SIM_SIZE as u32) * (CELL_PX as u32);
const TIME_RATE: f32 = 0.1;

const SQUARE_OFFSET: usize = 20;
const SQUARE_SIZE: usize = 40;
const SQUARE_DENSITY: f32 = 1.0;
const SQUARE_VELOCITY: (f32, f32) = (10.0, 10.0);

/// Draw a bounding rectangle around every cell.
const DRAW_CELL_OUTLINES: bool = false;
const OUTLINE_COLOR: Color = Color::rgba(0xff, 0xff, 0xff, 0x80);

struct CellView<S: Simulator> {
    sim: S,
    overlay: Option<(FontSystem, FontId)>,
    frame_index: u64,
    last_frame: Instant,
}

impl<S: Simulator> eddy_engine::Render for CellView<S> {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        self.sim.step();

        let n = self.sim.size();
        let density = self.sim.density();
        for grid_y in 0..n {
            for grid_x in 0..n {
                let cell = PixelRect::new(
                    grid_x as i32 * CELL_PX,
                    grid_y as i32 * CELL_PX,
                    CELL_PX,
                    CELL_PX,
                );

                let color = Color::from_density(density[self.sim.ix(grid_x, grid_y)]);
                surface.fill_rect(cell, color);

                if DRAW_CELL_OUTLINES {
                    surface.outline_rect(cell, OUTLINE_COLOR, 1);
                }
            }
        }

        // Frame accounting + debug label.
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().max(1e-6);
        if let Some((fonts, font)) = &self.overlay {
            let report = format!(
                "[ix={} | dt={:.4} | fps={:.1}]",
                self.frame_index,
                dt,
                1.0 / dt
            );
            let label = fonts.render_label(&report, *font, 15.0);
            surface.blit_text(
                &label,
                surface.width() as i32 - 300,
                surface.height() as i32 - 25,
                Color::WHITE,
            );
        }

        self.frame_index += 1;
        self.last_frame = now;
        Ok(())
    }
}

/// Seeds a square of fluid whose Y-velocity is modulated by a sine over
/// the square's extent.
fn create_sim() -> DriftSim {
    let mut sim = DriftSim::new(SIM_SIZE, TIME_RATE);

    let span = SQUARE_OFFSET..SQUARE_OFFSET + SQUARE_SIZE;
    for x in span.clone() {
        for y in span.clone() {
            sim.add_density((x, y), SQUARE_DENSITY);
        }
    }
    for x in span.clone() {
        for y in span.clone() {
            let yn = PI * (y as f32 / SQUARE_SIZE as f32);
            let velocity = (SQUARE_VELOCITY.0, SQUARE_VELOCITY.1 * yn.sin());
            sim.add_velocity((x, y), velocity);
        }
    }

    sim
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let overlay = system_font().and_then(|bytes| {
        let mut fonts = FontSystem::new();
        let id = fonts.load_font(&bytes).ok()?;
        Some((fonts, id))
    });
    if overlay.is_none() {
        log::warn!("no system font found; running without the FPS overlay");
    }

    let view = CellView {
        sim: create_sim(),
        overlay,
        frame_index: 0,
        last_frame: Instant::now(),
    };

    run(
        RunConfig::new(WINDOW_SIZE, WINDOW_SIZE, "eddy: cells").target_rate(60.0),
        Some(Box::new(view)),
    )
}
