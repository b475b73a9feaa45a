//! Frame-by-frame easing of a scroll offset towards a moving target.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ScrollConfig;


/// A scrollable container as seen by the controller.
pub trait ScrollViewport {
    fn scroll_offset(&self) -> f64;
    fn set_scroll_offset(&mut self, offset: f64);
    /// Full height of the scrollable content.
    fn scroll_extent(&self) -> f64;
    /// Height of the visible area.
    fn viewport_extent(&self) -> f64;

    fn max_scroll_offset(&self) -> f64 {
        (self.scroll_extent() - self.viewport_extent()).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host display-refresh hook. Each requested frame must end in exactly one
/// call to [`SmoothScroller::tick`] unless it is cancelled first.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Reduced-motion capability check supplied by the host environment.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl<F> MotionPreference for F
where
    F: Fn() -> bool,
{
    fn prefers_reduced_motion(&self) -> bool {
        self()
    }
}

/// Scheduler for hosts that pump frames themselves. Clones share the same
/// pending slot, so the host can keep one clone while the controller owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    next_id: Rc<Cell<u64>>,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.get()
    }

    /// Consumes the pending frame, if any. The host ticks the controller once
    /// for every handle returned here.
    pub fn take_pending(&self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.set(Some(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollState {
    Idle,
    Easing { target: f64, frame: FrameHandle },
}

/// Outcome of a single animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTick {
    /// Nothing in flight; the viewport was not touched.
    Idle,
    /// Offset moved towards the target and another frame was requested.
    Moved { offset: f64 },
    /// Offset landed exactly on the target; the controller is idle again.
    Settled { offset: f64 },
}

pub struct SmoothScroller {
    config: ScrollConfig,
    state: ScrollState,
    scheduler: Box<dyn FrameScheduler>,
    motion: Box<dyn MotionPreference>,
}

impl SmoothScroller {
    pub fn new(
        config: ScrollConfig,
        scheduler: Box<dyn FrameScheduler>,
        motion: Box<dyn MotionPreference>,
    ) -> Self {
        Self {
            config,
            state: ScrollState::Idle,
            scheduler,
            motion,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_easing(&self) -> bool {
        matches!(self.state, ScrollState::Easing { .. })
    }

    pub fn target(&self) -> Option<f64> {
        match self.state {
            ScrollState::Easing { target, .. } => Some(target),
            ScrollState::Idle => None,
        }
    }

    /// Points the animation at `target`. An animation already in flight keeps
    /// its frame and only retargets.
    pub fn set_target<V>(&mut self, viewport: &mut V, target: f64)
    where
        V: ScrollViewport + ?Sized,
    {
        if let ScrollState::Easing { frame, .. } = self.state {
            self.state = ScrollState::Easing { target, frame };
            return;
        }

        if self.motion.prefers_reduced_motion() {
            viewport.set_scroll_offset(target);
            return;
        }

        let frame = self.scheduler.request_frame();
        self.state = ScrollState::Easing { target, frame };
    }

    pub fn tick<V>(&mut self, viewport: &mut V) -> ScrollTick
    where
        V: ScrollViewport + ?Sized,
    {
        let ScrollState::Easing { target, .. } = self.state else {
            return ScrollTick::Idle;
        };

        let current = viewport.scroll_offset();
        let delta = target - current;
        if delta.abs() < self.config.snap_epsilon {
            viewport.set_scroll_offset(target);
            self.state = ScrollState::Idle;
            return ScrollTick::Settled { offset: target };
        }

        let offset = current + delta * self.config.ease_fraction;
        viewport.set_scroll_offset(offset);
        let frame = self.scheduler.request_frame();
        self.state = ScrollState::Easing { target, frame };
        ScrollTick::Moved { offset }
    }

    pub fn cancel(&mut self) {
        if let ScrollState::Easing { frame, .. } = self.state {
            self.scheduler.cancel_frame(frame);
            tracing::debug!(frame = frame.0, "scroll: easing cancelled");
        }
        self.state = ScrollState::Idle;
    }
}

impl Drop for SmoothScroller {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Offset that shows `span_top` a `reading_band` fraction below the top of
/// the visible area, clamped to the scrollable range.
pub fn reading_band_offset<V>(viewport: &V, span_top: f64, reading_band: f64) -> f64
where
    V: ScrollViewport + ?Sized,
{
    let target = span_top - viewport.viewport_extent() * reading_band;
    target.clamp(0.0, viewport.max_scroll_offset())
}
