//! Next-frame scheduling and the refresh debounce.
//!
//! A [`FrameScheduler`] hands out one-shot "next paint" callbacks. The host
//! is responsible for delivering [`CarouselEvent::AnimationFrame`] back to
//! the carousel when a requested frame fires.
//!
//! [`CarouselEvent::AnimationFrame`]: crate::CarouselEvent::AnimationFrame

/// One-shot next-frame callbacks.
///
/// No `Send` bounds, so it works in both native and single-threaded WASM contexts.
pub trait FrameScheduler {
    /// Identifies a requested frame so it can be cancelled.
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Request a frame. Returns `None` when the environment cannot schedule
    /// one, in which case the caller runs its work immediately.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Collapses refresh requests into at most one outstanding frame.
#[derive(Debug)]
pub struct RefreshCoordinator<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

/// What a call to [`RefreshCoordinator::schedule`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A new frame was requested
    Scheduled,
    /// A frame is already pending; nothing queued
    Coalesced,
    /// No frame could be requested; refresh now
    RunNow,
}

impl<S: FrameScheduler> RefreshCoordinator<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request a refresh on the next frame unless one is already pending.
    pub fn schedule(&mut self) -> ScheduleOutcome {
        if self.pending.is_some() {
            return ScheduleOutcome::Coalesced;
        }
        match self.scheduler.request_frame() {
            Some(handle) => {
                self.pending = Some(handle);
                ScheduleOutcome::Scheduled
            }
            None => ScheduleOutcome::RunNow,
        }
    }

    /// Called when a frame fires. Returns `true` if a refresh was pending
    /// and should run now.
    pub fn frame_fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel the pending frame, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Virtual-clock scheduler. Frames fire only when [`advance`] is called.
///
/// Useful for tests and for hosts that drive their own paint loop.
///
/// [`advance`]: ManualFrameScheduler::advance
#[derive(Clone, Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    queued: Vec<u64>,
    cancelled: usize,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every queued frame. Returns how many fired.
    pub fn advance(&mut self) -> usize {
        let fired = self.queued.len();
        self.queued.clear();
        fired
    }

    /// Number of frames waiting to fire.
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Number of frames cancelled over the scheduler's lifetime.
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.queued.push(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u64) {
        let before = self.queued.len();
        self.queued.retain(|id| *id != handle);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Scheduler for environments without a paint loop; every refresh runs
/// synchronously.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl FrameScheduler for ImmediateScheduler {
    type Handle = ();

    fn request_frame(&mut self) -> Option<()> {
        None
    }

    fn cancel_frame(&mut self, _handle: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_schedules_coalesce() {
        let mut coordinator = RefreshCoordinator::new(ManualFrameScheduler::new());
        assert_eq!(coordinator.schedule(), ScheduleOutcome::Scheduled);
        assert_eq!(coordinator.schedule(), ScheduleOutcome::Coalesced);
        assert_eq!(coordinator.schedule(), ScheduleOutcome::Coalesced);
        assert_eq!(coordinator.scheduler().queued(), 1);
    }

    #[test]
    fn frame_fired_clears_pending() {
        let mut coordinator = RefreshCoordinator::new(ManualFrameScheduler::new());
        coordinator.schedule();
        assert_eq!(coordinator.scheduler_mut().advance(), 1);
        assert!(coordinator.frame_fired());
        assert!(!coordinator.is_pending());
        // a stray frame with nothing pending does nothing
        assert!(!coordinator.frame_fired());
        assert_eq!(coordinator.schedule(), ScheduleOutcome::Scheduled);
    }

    #[test]
    fn cancel_drops_the_queued_frame() {
        let mut coordinator = RefreshCoordinator::new(ManualFrameScheduler::new());
        coordinator.schedule();
        coordinator.cancel();
        assert!(!coordinator.is_pending());
        assert_eq!(coordinator.scheduler().queued(), 0);
        assert_eq!(coordinator.scheduler().cancelled(), 1);
    }

    #[test]
    fn one_frame_outstanding_at_a_time() {
        let mut coordinator = RefreshCoordinator::new(ManualFrameScheduler::new());
        for _ in 0..3 {
            coordinator.schedule();
            coordinator.schedule();
            assert_eq!(coordinator.scheduler().queued(), 1);
            coordinator.scheduler_mut().advance();
            assert!(coordinator.frame_fired());
        }
        // the last frame already fired, so there is nothing to cancel
        coordinator.cancel();
        assert_eq!(coordinator.scheduler().cancelled(), 0);

        coordinator.schedule();
        coordinator.cancel();
        assert_eq!(coordinator.scheduler().cancelled(), 1);
        assert_eq!(coordinator.schedule(), ScheduleOutcome::Scheduled);
        assert_eq!(coordinator.scheduler().queued(), 1);
    }

    #[test]
    fn immediate_scheduler_runs_now() {
        let mut coordinator = RefreshCoordinator::new(ImmediateScheduler);
        assert_eq!(coordinator.schedule(), ScheduleOutcome::RunNow);
        assert!(!coordinator.is_pending());
    }
}
