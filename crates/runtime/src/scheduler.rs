use std::collections::BTreeSet;

/// Opaque id of one scheduled frame callback.
///
/// In the browser this wraps the `requestAnimationFrame` id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Schedules one-shot per-display-frame callbacks.
///
/// Implementations deliver a fired frame back to the owner of the
/// [`RenderLoop`](crate::RenderLoop) together with the handle returned here.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: requested frames sit in a pending set until the
/// driver takes and fires them. Used by the headless driver and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: BTreeSet<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending frame, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.remove(&handle) {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameHandle, FrameScheduler, ManualScheduler};

    #[test]
    fn hands_out_increasing_handles() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert!(a < b);
        assert_eq!(sched.take_pending(), vec![a, b]);
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn cancel_only_counts_pending_frames() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        sched.cancel_frame(a);
        sched.cancel_frame(a);
        sched.cancel_frame(FrameHandle(99));
        assert_eq!(sched.cancelled_count(), 1);
        assert_eq!(sched.pending_len(), 0);
    }
}
