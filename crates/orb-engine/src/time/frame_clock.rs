use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, in milliseconds. Animation rates are
    /// expressed per millisecond.
    pub delta_ms: f32,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to 0.1 ms .. 250 ms so a stalled or minimized window
/// does not jump the animation when it resumes.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        FrameTime {
            delta_ms: dt.as_secs_f32() * 1000.0,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_clamped_to_max() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(clock.last + Duration::from_secs(3));
        assert_eq!(ft.delta_ms, 250.0);
    }

    #[test]
    fn delta_is_clamped_to_min() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(clock.last);
        assert!((ft.delta_ms - 0.1).abs() < 1e-6);
    }

    #[test]
    fn consecutive_ticks_measure_from_the_previous_one() {
        let mut clock = FrameClock::new();
        let t0 = clock.last;
        clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_millis(32));
        assert!((b.delta_ms - 16.0).abs() < 1e-3);
    }

    #[test]
    fn clock_going_backwards_yields_min_delta() {
        let mut clock = FrameClock::new();
        let t0 = clock.last;
        clock.tick_at(t0 + Duration::from_millis(50));
        let ft = clock.tick_at(t0);
        assert!((ft.delta_ms - 0.1).abs() < 1e-6);
    }
}
