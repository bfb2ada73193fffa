use std::time::{Duration, Instant};

pub const FPS_HISTORY_LEN: usize = 128;

/// Wall-clock frame timing with a clamped simulation step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Longest step handed to the simulation, in seconds
    max_delta: f32,
    /// Instant at which tick() was last called
    last_frame_instant: Instant,
    /// Sum of every clamped step so far
    elapsed: f64,
    /// Time accumulated towards the next once-per-second FPS update
    second_timer: f32,
    frames_this_second: u32,
    fps: f32,
    /// Set by the tick that refreshed `fps`, cleared by the next one
    fps_refreshed: bool,
    history: [f32; FPS_HISTORY_LEN],
    history_cursor: usize,
    history_filled: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSummary {
    pub min: f32,
    pub max: f32,
    pub average: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta,
            last_frame_instant: Instant::now(),
            elapsed: 0.0,
            second_timer: 0.0,
            frames_this_second: 0,
            fps: 0.0,
            fps_refreshed: false,
            history: [0.0; FPS_HISTORY_LEN],
            history_cursor: 0,
            history_filled: 0,
        }
    }

    /// Measure the time since the previous tick and return the clamped step.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now - self.last_frame_instant;
        self.last_frame_instant = now;
        self.advance(raw)
    }

    pub fn advance(&mut self, raw: Duration) -> f32 {
        let raw_seconds = raw.as_secs_f32();
        let dt = raw_seconds.min(self.max_delta);
        self.elapsed += dt as f64;

        if raw_seconds > 0.0 {
            self.history[self.history_cursor] = raw_seconds.recip();
            self.history_cursor = (self.history_cursor + 1) % FPS_HISTORY_LEN;
            self.history_filled = (self.history_filled + 1).min(FPS_HISTORY_LEN);
        }

        self.fps_refreshed = false;
        self.frames_this_second += 1;
        self.second_timer += raw_seconds;
        if self.second_timer >= 1.0 {
            self.fps = self.frames_this_second as f32 / self.second_timer;
            self.fps_refreshed = true;
            self.frames_this_second = 0;
            self.second_timer = 0.0;
        }

        dt
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Frames counted over the last full second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// True on the tick that recomputed `fps`.
    pub fn fps_refreshed(&self) -> bool {
        self.fps_refreshed
    }

    pub fn fps_summary(&self) -> Option<FpsSummary> {
        if self.history_filled == 0 {
            return None;
        }
        let samples = &self.history[..self.history_filled];
        let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = samples.iter().copied().fold(0.0, f32::max);
        let average = samples.iter().sum::<f32>() / samples.len() as f32;
        Some(FpsSummary { min, max, average })
    }
}
