use std::time::{Duration, Instant};

/// How often a summary is logged.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// CPU frame-time and FPS accounting.
#[derive(Debug, Clone)]
pub struct Stats {
    context: Option<String>,

    frame_start: Option<Instant>,
    frames: u64,
    last_ms: f32,
    total_ms: f64,

    window_start: Option<Instant>,
    window_frames: u32,
    fps: f32,

    report_interval: Duration,
    last_report: Option<Instant>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            context: None,
            frame_start: None,
            frames: 0,
            last_ms: 0.0,
            total_ms: 0.0,
            window_start: None,
            window_frames: 0,
            fps: 0.0,
            report_interval: DEFAULT_REPORT_INTERVAL,
            last_report: None,
        }
    }

    /// Records the rendering context the numbers belong to.
    pub fn attach(&mut self, info: &wgpu::AdapterInfo) {
        let desc = format!("{} ({:?})", info.name, info.backend);
        log::info!("stats attached to {desc}");
        self.context = Some(desc);
    }

    pub fn is_attached(&self) -> bool {
        self.context.is_some()
    }

    pub fn before_frame(&mut self) {
        self.before_frame_at(Instant::now());
    }

    pub fn after_frame(&mut self) {
        self.after_frame_at(Instant::now());
    }

    /// Frames measured so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// CPU time of the last measured frame, in milliseconds.
    pub fn last_ms(&self) -> f32 {
        self.last_ms
    }

    /// Mean CPU frame time, in milliseconds.
    pub fn average_ms(&self) -> f32 {
        if self.frames == 0 {
            0.0
        } else {
            (self.total_ms / self.frames as f64) as f32
        }
    }

    /// Frames per second over the last completed one-second window.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    fn before_frame_at(&mut self, now: Instant) {
        self.frame_start = Some(now);
        self.window_start.get_or_insert(now);
        self.last_report.get_or_insert(now);
    }

    fn after_frame_at(&mut self, now: Instant) {
        // Unpaired `after_frame` calls are ignored.
        let Some(start) = self.frame_start.take() else { return };

        let ms = now.saturating_duration_since(start).as_secs_f32() * 1000.0;
        self.frames += 1;
        self.last_ms = ms;
        self.total_ms += ms as f64;

        self.window_frames += 1;
        if let Some(window_start) = self.window_start {
            let span = now.saturating_duration_since(window_start);
            if span >= Duration::from_secs(1) {
                self.fps = self.window_frames as f32 / span.as_secs_f32();
                self.window_frames = 0;
                self.window_start = Some(now);
            }
        }

        if let Some(last) = self.last_report {
            if now.saturating_duration_since(last) >= self.report_interval {
                self.report();
                self.last_report = Some(now);
            }
        }
    }

    fn report(&self) {
        log::info!(
            "{} frames, {:.1} fps, cpu {:.2} ms (avg {:.2} ms){}",
            self.frames,
            self.fps,
            self.last_ms,
            self.average_ms(),
            self.context
                .as_deref()
                .map(|c| format!(" on {c}"))
                .unwrap_or_default(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_frame_time() {
        let mut stats = Stats::new();
        let t0 = Instant::now();

        stats.before_frame_at(t0);
        stats.after_frame_at(t0 + Duration::from_millis(4));
        stats.before_frame_at(t0 + Duration::from_millis(16));
        stats.after_frame_at(t0 + Duration::from_millis(24));

        assert_eq!(stats.frames(), 2);
        assert!((stats.last_ms() - 8.0).abs() < 1e-3);
        assert!((stats.average_ms() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn unpaired_after_frame_is_ignored() {
        let mut stats = Stats::new();
        stats.after_frame_at(Instant::now());
        assert_eq!(stats.frames(), 0);
        assert_eq!(stats.average_ms(), 0.0);
    }

    #[test]
    fn fps_over_one_second_window() {
        let mut stats = Stats::new();
        let t0 = Instant::now();

        for i in 0..=60u64 {
            let t = t0 + Duration::from_micros(i * 1_000_000 / 60);
            stats.before_frame_at(t);
            stats.after_frame_at(t);
        }

        assert!((stats.fps() - 61.0).abs() < 0.5, "fps {}", stats.fps());
    }

    #[test]
    fn not_attached_by_default() {
        assert!(!Stats::new().is_attached());
    }
}
