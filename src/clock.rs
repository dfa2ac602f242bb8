use std::time::Instant;

/// Largest step handed to the simulation after a stall.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Wall-clock source for [`World::tick`](crate::World::tick).
///
/// The clock starts on its first tick, so a world created long before its
/// first frame does not receive one huge step. Later steps are clamped to
/// [`MAX_FRAME_DT`].
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    elapsed: f64,
    dt: f32,
    /// Number of ticks so far.
    pub frame_count: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame and returns its step in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.dt = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32().min(MAX_FRAME_DT));
        self.last = Some(now);
        self.elapsed += f64::from(self.dt);
        self.frame_count += 1;
        self.dt
    }

    /// Step of the latest frame.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Simulated seconds, the sum of every clamped step.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_a_zero_step() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(5));

        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count, 1);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn elapsed_sums_steps() {
        let mut clock = FrameClock::new();
        clock.tick();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let dt = clock.tick();

        assert!(dt > 0.0 && dt <= MAX_FRAME_DT);
        assert_eq!(clock.dt(), dt);
        assert!((clock.elapsed() - f64::from(dt)).abs() < 1e-9);
        assert_eq!(clock.frame_count, 2);
    }
}
