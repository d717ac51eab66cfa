use crate::Simulator;

/// Per-step density decay factor.
///
/// Keeps long-running demos from saturating to solid white when seeded
/// density keeps circulating through the same cells.
const DECAY: f32 = 0.999;

/// Kinematic stand-in for a real fluid solver.
///
/// Density is transported along the stored velocity field by
/// nearest-neighbor back-trace and decays slightly per step; velocity is
/// static. There is no diffusion and no pressure projection: this is not a
/// fluid solver, it exists so the demos animate and the [`Simulator`]
/// contract is exercisable in tests. A real solver plugs in through the
/// same trait.
#[derive(Debug, Clone)]
pub struct DriftSim {
    size: usize,
    time_rate: f32,
    density: Vec<f32>,
    vx: Vec<f32>,
    vy: Vec<f32>,
    scratch: Vec<f32>,
}

impl DriftSim {
    /// Creates an N×N grid with zeroed fields.
    ///
    /// `time_rate` scales the per-step displacement; the demos run it
    /// anywhere from slow-motion (0.001) to brisk (0.1).
    pub fn new(size: usize, time_rate: f32) -> Self {
        assert!(size > 0, "grid size must be positive");
        let cells = size * size;
        Self {
            size,
            time_rate,
            density: vec![0.0; cells],
            vx: vec![0.0; cells],
            vy: vec![0.0; cells],
            scratch: vec![0.0; cells],
        }
    }

    pub fn time_rate(&self) -> f32 {
        self.time_rate
    }

    pub fn set_time_rate(&mut self, time_rate: f32) {
        self.time_rate = time_rate;
    }

    fn in_bounds(&self, cell: (usize, usize)) -> bool {
        cell.0 < self.size && cell.1 < self.size
    }
}

impl Simulator for DriftSim {
    fn size(&self) -> usize {
        self.size
    }

    fn step(&mut self) {
        let n = self.size;
        let max = (n - 1) as f32;

        for y in 0..n {
            for x in 0..n {
                let i = y * n + x;

                // Back-trace: the value arriving here left from upstream.
                let sx = (x as f32 - self.vx[i] * self.time_rate).clamp(0.0, max);
                let sy = (y as f32 - self.vy[i] * self.time_rate).clamp(0.0, max);

                let src = (sy.round() as usize) * n + (sx.round() as usize);
                self.scratch[i] = self.density[src] * DECAY;
            }
        }

        std::mem::swap(&mut self.density, &mut self.scratch);
    }

    fn add_density(&mut self, cell: (usize, usize), amount: f32) {
        if self.in_bounds(cell) {
            let i = self.ix(cell.0, cell.1);
            self.density[i] += amount;
        }
    }

    fn add_velocity(&mut self, cell: (usize, usize), velocity: (f32, f32)) {
        if self.in_bounds(cell) {
            let i = self.ix(cell.0, cell.1);
            self.vx[i] += velocity.0;
            self.vy[i] += velocity.1;
        }
    }

    fn density(&self) -> &[f32] {
        &self.density
    }

    fn velocity_x(&self) -> &[f32] {
        &self.vx
    }

    fn velocity_y(&self) -> &[f32] {
        &self.vy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_velocity(sim: &mut DriftSim, v: (f32, f32)) {
        for y in 0..sim.size() {
            for x in 0..sim.size() {
                sim.add_velocity((x, y), v);
            }
        }
    }

    // ── injection ─────────────────────────────────────────────────────────

    #[test]
    fn add_density_accumulates() {
        let mut sim = DriftSim::new(4, 1.0);
        sim.add_density((1, 2), 0.25);
        sim.add_density((1, 2), 0.5);
        let i = sim.ix(1, 2);
        assert_eq!(sim.density()[i], 0.75);
    }

    #[test]
    fn out_of_range_injection_is_ignored() {
        let mut sim = DriftSim::new(4, 1.0);
        sim.add_density((4, 0), 1.0);
        sim.add_velocity((0, 4), (1.0, 1.0));
        assert!(sim.density().iter().all(|&d| d == 0.0));
        assert!(sim.velocity_x().iter().all(|&v| v == 0.0));
    }

    // ── transport ─────────────────────────────────────────────────────────

    #[test]
    fn density_drifts_along_positive_x_velocity() {
        let mut sim = DriftSim::new(8, 1.0);
        uniform_velocity(&mut sim, (1.0, 0.0));
        sim.add_density((3, 3), 1.0);

        sim.step();

        let moved = sim.ix(4, 3);
        let origin = sim.ix(3, 3);
        assert!(sim.density()[moved] > 0.9);
        assert_eq!(sim.density()[origin], 0.0);
    }

    #[test]
    fn zero_time_rate_keeps_density_in_place() {
        let mut sim = DriftSim::new(8, 0.0);
        uniform_velocity(&mut sim, (5.0, -5.0));
        sim.add_density((2, 6), 1.0);

        sim.step();

        let i = sim.ix(2, 6);
        assert!((sim.density()[i] - DECAY).abs() < 1e-6);
    }

    #[test]
    fn transport_clamps_at_grid_edges() {
        let mut sim = DriftSim::new(4, 1.0);
        uniform_velocity(&mut sim, (2.0, 0.0));
        sim.add_density((0, 1), 1.0);

        // (0, 1) back-traces off the left edge; the clamp keeps sampling
        // column 0, so the seeded cell retains its mass.
        sim.step();
        let i = sim.ix(0, 1);
        assert!(sim.density()[i] > 0.9);
    }

    #[test]
    fn velocity_field_is_static_across_steps() {
        let mut sim = DriftSim::new(4, 0.5);
        sim.add_velocity((1, 1), (3.0, -1.5));
        let before: Vec<f32> = sim.velocity_x().to_vec();

        sim.step();
        sim.step();

        assert_eq!(sim.velocity_x(), &before[..]);
    }
}
