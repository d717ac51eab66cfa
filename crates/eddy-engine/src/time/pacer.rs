use std::time::{Duration, Instant};

/// Frame timing snapshot produced by [`FramePacer::pace`].
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never zero.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Blocks a loop to approximate a target update rate.
///
/// `pace()` sleeps the remainder of the period measured from the previous
/// tick, then rebaselines at the actual wake time. An overrunning frame is
/// followed immediately by the next one: no catch-up and no skipped
/// frames,
/// no debt carried across iterations.
///
/// `dt` is clamped to a small positive minimum so downstream consumers
/// never observe a zero interval, even when the platform sleep returns
/// early or the loop spins.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
}

impl FramePacer {
    /// Creates a pacer for `target_rate` updates per second.
    ///
    /// The rate is validated upstream by `RunConfig`; a non-positive value
    /// here is a programmer error.
    pub fn new(target_rate: f32) -> Self {
        debug_assert!(target_rate > 0.0 && target_rate.is_finite());
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(target_rate)),
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Resets the baseline, e.g. after window creation stalls.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Blocks until the target period has elapsed since the last tick, then
    /// returns a new [`FrameTime`].
    pub fn pace(&mut self) -> FrameTime {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }

        let now = Instant::now();
        let mut dt = now.saturating_duration_since(self.last);
        if dt < self.dt_min {
            dt = self.dt_min;
        }

        // Rebaseline at the wake time, not at `last + period`: an
        // overrunning frame starts the next period from now.
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_never_zero() {
        let mut pacer = FramePacer::new(1_000_000.0);
        for _ in 0..16 {
            assert!(pacer.pace().dt > 0.0);
        }
    }

    #[test]
    fn idle_loop_is_paced_to_roughly_the_period() {
        let mut pacer = FramePacer::new(100.0);
        pacer.pace();

        let start = Instant::now();
        let ft = pacer.pace();
        let waited = start.elapsed();

        // Sleep guarantees at least the period; allow generous scheduler
        // slack on the upper side.
        assert!(waited >= Duration::from_millis(8), "waited {waited:?}");
        assert!(ft.dt >= 0.008, "dt {}", ft.dt);
    }

    #[test]
    fn overrunning_frame_does_not_sleep_or_accumulate_debt() {
        let mut pacer = FramePacer::new(100.0);
        pacer.pace();

        // Simulate a frame that took 3× the period.
        std::thread::sleep(Duration::from_millis(30));

        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() < Duration::from_millis(5));

        // The next period starts from the late tick; it is not shortened to
        // claw back the overrun.
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() >= Duration::from_millis(8));
    }

    #[test]
    fn frame_index_is_monotonic() {
        let mut pacer = FramePacer::new(1_000_000.0);
        assert_eq!(pacer.pace().frame_index, 0);
        assert_eq!(pacer.pace().frame_index, 1);
        assert_eq!(pacer.pace().frame_index, 2);
    }
}
