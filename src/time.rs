//! Frame timing.
//!
//! [`FrameClock`] counts frames and derives delta time and a smoothed FPS
//! from the timestamps the scheduler hands to each tick. It does not read the
//! system clock itself, so a simulated scheduler gives deterministic values.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! clock.tick(Duration::from_millis(16));
//! println!("Frame: {}", clock.frame());
//! println!("FPS: {:.1}", clock.fps());
//! ```

use std::time::Duration;

/// Frame counter and timing statistics.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the last tick.
    last: Option<Duration>,
    /// Time since the previous tick, in seconds.
    delta_secs: f32,
    /// Total ticks.
    frame_count: u64,
    /// FPS over the last completed measuring window.
    fps: f32,
    /// Frame count and timestamp at the start of the measuring window.
    window_start: Option<(u64, Duration)>,
    /// Length of an FPS measuring window.
    fps_update_interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            window_start: None,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame at `now`. Timestamps must not go backwards.
    pub fn tick(&mut self, now: Duration) {
        self.delta_secs = self
            .last
            .map(|last| now.saturating_sub(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        self.frame_count += 1;

        match self.window_start {
            None => self.window_start = Some((self.frame_count, now)),
            Some((start_frame, start_time)) => {
                let elapsed = now.saturating_sub(start_time);
                if elapsed >= self.fps_update_interval {
                    let frames = self.frame_count - start_frame;
                    self.fps = frames as f32 / elapsed.as_secs_f32();
                    self.window_start = Some((self.frame_count, now));
                }
            }
        }
    }

    /// Total frames recorded.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames per second over the last measuring window. `0` until the first
    /// window completes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget all history. The driver does this on every start.
    pub fn reset(&mut self) {
        *self = Self {
            fps_update_interval: self.fps_update_interval,
            ..Self::new()
        };
    }
}
