//! The animation driver: runs frames on a display-synchronized schedule.
//!
//! The driver does not own a timer. It asks a [`FrameScheduler`] for the next
//! frame and gets a [`FrameHandle`] back; when the host's refresh callback
//! fires it calls [`AnimationDriver::tick`] with that handle. Each tick runs
//! clear → update → draw on an [`Animated`] target and requests the next
//! frame.
//!
//! ```ignore
//! let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
//! driver.start();
//! driver.run_for(Duration::from_secs(1), &mut stage, &mut ctx);
//! driver.stop();
//! ```

use std::time::Duration;

use crate::kinematics::Bounds;
use crate::pointer::PointerState;
use crate::render::DrawContext;
use crate::scene::{DrawStats, Scene};
use crate::time::FrameClock;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Source of display-synchronized frame callbacks.
pub trait FrameScheduler {
    /// Request a callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a requested callback. Unknown or already fired handles are
    /// ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Something the driver can run frames on.
pub trait Animated {
    /// Paint the background.
    fn clear<C: DrawContext + ?Sized>(&mut self, ctx: &mut C);

    /// Advance one frame.
    fn update(&mut self);

    /// Draw the current state on top of the background.
    fn draw<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> DrawStats;
}

/// A scene together with the pointer and surface size it runs against.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub scene: Scene,
    pub pointer: PointerState,
    pub bounds: Bounds,
}

impl Stage {
    pub fn new(scene: Scene, bounds: Bounds) -> Self {
        Self {
            scene,
            pointer: PointerState::absent(),
            bounds,
        }
    }
}

impl Animated for Stage {
    fn clear<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) {
        self.scene.clear(ctx, self.bounds);
    }

    fn update(&mut self) {
        self.scene.update(&self.pointer, self.bounds);
    }

    fn draw<C: DrawContext + ?Sized>(&mut self, ctx: &mut C) -> DrawStats {
        self.scene.draw_entities(ctx)
    }
}

/// Lifecycle state of an [`AnimationDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Stopped,
    Running,
}

/// Runs frames while started.
#[derive(Debug)]
pub struct AnimationDriver<S: FrameScheduler> {
    scheduler: S,
    state: DriverState,
    pending: Option<FrameHandle>,
    clock: FrameClock,
    last_stats: Option<DrawStats>,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: DriverState::Stopped,
            pending: None,
            clock: FrameClock::new(),
            last_stats: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// The frame the driver is waiting for, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// What the most recent frame drew.
    pub fn last_stats(&self) -> Option<DrawStats> {
        self.last_stats
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start requesting frames. Does nothing if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = DriverState::Running;
        self.clock.reset();
        self.pending = Some(self.scheduler.request_frame());
        log::debug!("animation started");
    }

    /// Stop and cancel the pending frame. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = DriverState::Stopped;
        log::debug!("animation stopped after {} frames", self.clock.frame());
    }

    /// Run one frame for `handle`, fired at `now`.
    ///
    /// Returns `None` without touching `target` if `handle` is not the frame
    /// the driver is waiting for (stale, cancelled, or the driver is stopped).
    pub fn tick<A, C>(&mut self, handle: FrameHandle, now: Duration, target: &mut A, ctx: &mut C) -> Option<DrawStats>
    where
        A: Animated,
        C: DrawContext + ?Sized,
    {
        if !self.is_running() || self.pending != Some(handle) {
            log::trace!("ignoring stale frame {handle:?}");
            return None;
        }
        self.pending = None;
        self.clock.tick(now);

        target.clear(ctx);
        target.update();
        let stats = target.draw(ctx);

        self.pending = Some(self.scheduler.request_frame());
        self.last_stats = Some(stats);
        log::trace!(
            "frame {}: {} shapes, {} links",
            self.clock.frame(),
            stats.shapes,
            stats.links
        );
        Some(stats)
    }
}

impl AnimationDriver<SimulatedScheduler> {
    /// Advance simulated time by `duration`, running every frame that falls
    /// due. Returns the number of frames run.
    pub fn run_for<A, C>(&mut self, duration: Duration, target: &mut A, ctx: &mut C) -> usize
    where
        A: Animated,
        C: DrawContext + ?Sized,
    {
        let deadline = self.scheduler.now() + duration;
        let mut frames = 0;
        while let Some((handle, at)) = self.scheduler.fire_next(deadline) {
            if self.tick(handle, at, target, ctx).is_some() {
                frames += 1;
            }
        }
        self.scheduler.advance_to(deadline);
        frames
    }
}

/// Deterministic fixed-rate scheduler.
///
/// Frames fire on refresh boundaries (`k * interval`), never on the boundary
/// they were requested at, like a real vsync callback.
#[derive(Debug, Clone)]
pub struct SimulatedScheduler {
    interval: Duration,
    now: Duration,
    next_handle: u64,
    pending: Vec<(FrameHandle, Duration)>,
}

impl SimulatedScheduler {
    /// Scheduler refreshing `hz` times per second. `0` is treated as 1 and
    /// the interval never drops below a nanosecond.
    pub fn new(hz: u32) -> Self {
        Self {
            interval: (Duration::from_secs(1) / hz.max(1)).max(Duration::from_nanos(1)),
            now: Duration::ZERO,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Requested frames that have not fired or been cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Fire the earliest pending frame due at or before `deadline`, moving
    /// the clock to its refresh boundary.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<(FrameHandle, Duration)> {
        let (index, &(handle, due)) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (_, due))| *due)?;
        if due > deadline {
            return None;
        }
        self.pending.remove(index);
        self.now = self.now.max(due);
        Some((handle, due))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    fn next_refresh(&self) -> Duration {
        let interval = self.interval.as_nanos().max(1);
        let next = (self.now.as_nanos() / interval + 1) * interval;
        Duration::from_nanos(u64::try_from(next).unwrap_or(u64::MAX))
    }
}

impl FrameScheduler for SimulatedScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        let due = self.next_refresh();
        self.pending.push((handle, due));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingContext;

    /// Target that only counts calls.
    #[derive(Default)]
    struct Counter {
        clears: usize,
        updates: usize,
        draws: usize,
    }

    impl Animated for Counter {
        fn clear<C: DrawContext + ?Sized>(&mut self, _ctx: &mut C) {
            self.clears += 1;
        }
        fn update(&mut self) {
            assert_eq!(self.updates, self.clears - 1, "update before clear");
            self.updates += 1;
        }
        fn draw<C: DrawContext + ?Sized>(&mut self, _ctx: &mut C) -> DrawStats {
            assert_eq!(self.draws, self.updates - 1, "draw before update");
            self.draws += 1;
            DrawStats::default()
        }
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        assert_eq!(driver.state(), DriverState::Stopped);
        driver.start();
        driver.start();
        assert!(driver.is_running());
        assert_eq!(driver.scheduler().pending_count(), 1);
    }

    #[test]
    fn test_double_start_does_not_double_tick() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        let mut target = Counter::default();
        let mut ctx = RecordingContext::new();

        driver.start();
        driver.start();
        let frames = driver.run_for(Duration::from_secs(1), &mut target, &mut ctx);

        assert_eq!(frames, 60);
        assert_eq!(target.draws, 60);
        assert_eq!(driver.clock().frame(), 60);
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        let mut target = Counter::default();
        let mut ctx = RecordingContext::new();

        driver.start();
        driver.run_for(Duration::from_millis(500), &mut target, &mut ctx);
        let before = target.draws;
        driver.stop();
        assert_eq!(driver.scheduler().pending_count(), 0);
        assert_eq!(driver.pending_frame(), None);

        let frames = driver.run_for(Duration::from_secs(1), &mut target, &mut ctx);
        assert_eq!(frames, 0);
        assert_eq!(target.draws, before);
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        driver.stop();
        assert_eq!(driver.state(), DriverState::Stopped);
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        let mut target = Counter::default();
        let mut ctx = RecordingContext::new();

        driver.start();
        let first = driver.pending_frame().unwrap();
        driver.stop();
        driver.start();

        assert!(driver.tick(first, Duration::ZERO, &mut target, &mut ctx).is_none());
        assert_eq!(target.clears, 0);

        let current = driver.pending_frame().unwrap();
        assert!(driver.tick(current, Duration::ZERO, &mut target, &mut ctx).is_some());
        assert_eq!(target.draws, 1);
    }

    #[test]
    fn test_restart_resumes_ticking() {
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        let mut target = Counter::default();
        let mut ctx = RecordingContext::new();

        driver.start();
        driver.run_for(Duration::from_secs(1), &mut target, &mut ctx);
        driver.stop();
        driver.start();
        assert_eq!(driver.clock().frame(), 0);
        let frames = driver.run_for(Duration::from_secs(1), &mut target, &mut ctx);
        assert_eq!(frames, 60);
        assert_eq!(driver.clock().frame(), 60);
    }

    #[test]
    fn test_scheduler_fires_on_refresh_boundaries() {
        let mut sched = SimulatedScheduler::new(50);
        let h = sched.request_frame();
        assert_eq!(sched.fire_next(Duration::from_millis(10)), None);
        assert_eq!(sched.fire_next(Duration::from_millis(20)), Some((h, Duration::from_millis(20))));

        // Requested exactly on a boundary: fires on the next one
        let h2 = sched.request_frame();
        assert_eq!(sched.fire_next(Duration::from_secs(1)), Some((h2, Duration::from_millis(40))));
    }

    #[test]
    fn test_scheduler_beyond_nanosecond_rate() {
        let mut sched = SimulatedScheduler::new(u32::MAX);
        assert_eq!(sched.interval(), Duration::from_nanos(1));
        let h = sched.request_frame();
        assert_eq!(sched.fire_next(Duration::from_secs(1)), Some((h, Duration::from_nanos(1))));
    }

    #[test]
    fn test_scheduler_past_u32_refreshes() {
        let mut sched = SimulatedScheduler::new(1000);
        let late = Duration::from_secs(5_000_000);
        sched.advance_to(late);
        let h = sched.request_frame();
        assert_eq!(sched.fire_next(Duration::MAX), Some((h, late + Duration::from_millis(1))));
    }

    #[test]
    fn test_stage_runs_scene() {
        use crate::particle::{Particle, ParticleOptions};
        use glam::Vec2;
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = Scene::default();
        let id = scene.add(Particle::new(
            Vec2::new(100.0, 100.0),
            &ParticleOptions::new().with_velocity(Vec2::new(1.0, 0.0)).with_friction(1.0),
            &mut rng,
        ));
        let mut stage = Stage::new(scene, Bounds::new(800.0, 600.0));
        let mut driver = AnimationDriver::new(SimulatedScheduler::new(60));
        let mut ctx = RecordingContext::new();

        driver.start();
        let frames = driver.run_for(Duration::from_millis(100), &mut stage, &mut ctx);
        assert_eq!(frames, 6);
        assert_eq!(stage.scene.particle(id).unwrap().position(), Vec2::new(106.0, 100.0));
    }
}
