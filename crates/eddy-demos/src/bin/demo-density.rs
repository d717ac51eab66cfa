//! Per-pixel density view.
//!
//! A 256-grid drift field in slow motion, seeded with a solid square of
//! fluid moving diagonally. Every frame advances the field once and maps
//! each cell's density to a grayscale pixel.

use anyhow::Result;

use eddy_engine::logging::{init_logging, LoggingConfig};
use eddy_engine::{run, Color, RunConfig, Surface};
use eddy_sim::{DriftSim, Simulator};

const SIM_SIZE: usize = 256;
const TIME_RATE: f32 = 0.001; // slow motion

const SQUARE_OFFSET: usize = 100;
const SQUARE_SIZE: usize = 64;
const SQUARE_DENSITY: f32 = 1.0;
const SQUARE_VELOCITY: (f32, f32) = (0.5, 0.5);

/// Steps run per frame.
const STEPS_PER_FRAME: u32 = 1;

struct DensityView<S: Simulator> {
    sim: S,
    frames: u64,
}

impl<S: Simulator> eddy_engine::Render for DensityView<S> {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        for _ in 0..STEPS_PER_FRAME {
            self.sim.step();
        }

        let n = self.sim.size();
        let density = self.sim.density();
        for y in 0..n {
            for x in 0..n {
                let color = Color::from_density(density[self.sim.ix(x, y)]);
                surface.set_pixel(x as i32, y as i32, color);
            }
        }

        self.frames += 1;
        if self.frames % 120 == 0 {
            let (lo, hi) = density
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &d| {
                    (lo.min(d), hi.max(d))
                });
            log::debug!("frame {}: density range [{lo:.3}, {hi:.3}]", self.frames);
        }

        Ok(())
    }
}

/// Seeds a solid square of fluid with constant velocity.
fn create_sim() -> DriftSim {
    let mut sim = DriftSim::new(SIM_SIZE, 1.0);

    // Slow motion keeps the plume legible at one step per frame.
    sim.set_time_rate(TIME_RATE);

    let span = SQUARE_OFFSET..SQUARE_OFFSET + SQUARE_SIZE;
    for x in span.clone() {
        for y in span.clone() {
            sim.add_density((x, y), SQUARE_DENSITY);
        }
    }
    for x in span.clone() {
        for y in span.clone() {
            sim.add_velocity((x, y), SQUARE_VELOCITY);
        }
    }

    sim
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let view = DensityView {
        sim: create_sim(),
        frames: 0,
    };

    run(
        RunConfig::new(SIM_SIZE as u32, SIM_SIZE as u32, "eddy: density"),
        Some(Box::new(view)),
    )
}
