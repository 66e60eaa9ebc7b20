use crate::frame::Frame;
use crate::scheduler::{FrameHandle, FrameScheduler};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// A single continuously re-scheduled frame callback.
///
/// At most one frame is pending at any time. A tick only runs for the handle
/// that is currently pending, so a late or duplicated callback is ignored
/// instead of re-entering the loop. Once stopped the loop never restarts.
#[derive(Debug)]
pub struct RenderLoop<S> {
    scheduler: S,
    state: LoopState,
    pending: Option<FrameHandle>,
    frame: Frame,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(scheduler: S, dt_s: f64) -> Self {
        Self {
            scheduler,
            state: LoopState::Idle,
            pending: None,
            frame: Frame::new(0, dt_s),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Index of the next frame to run.
    pub fn frame_index(&self) -> u64 {
        self.frame.index
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Schedules the first frame. Returns `false` if the loop was already
    /// started or has been stopped.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Runs `render` for a fired frame and schedules the next one.
    ///
    /// Returns `false` without calling `render` when the loop is not running
    /// or `handle` is not the pending frame.
    pub fn tick(&mut self, handle: FrameHandle, render: impl FnOnce(Frame)) -> bool {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        let frame = self.frame;
        render(frame);

        self.frame = frame.next();
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Cancels the pending frame synchronously. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::{LoopState, RenderLoop};
    use crate::scheduler::{FrameHandle, ManualScheduler};

    fn fire_all(rl: &mut RenderLoop<ManualScheduler>, ticks: &mut Vec<u64>) {
        for handle in rl.scheduler_mut().take_pending() {
            rl.tick(handle, |frame| ticks.push(frame.index));
        }
    }

    #[test]
    fn reschedules_after_each_tick() {
        let mut rl = RenderLoop::new(ManualScheduler::new(), 1.0 / 60.0);
        assert!(rl.start());
        assert!(!rl.start());

        let mut ticks = Vec::new();
        fire_all(&mut rl, &mut ticks);
        fire_all(&mut rl, &mut ticks);
        fire_all(&mut rl, &mut ticks);

        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!(rl.scheduler().pending_len(), 1);
    }

    #[test]
    fn ignores_stale_and_duplicate_handles() {
        let mut rl = RenderLoop::new(ManualScheduler::new(), 1.0);
        rl.start();
        let first = rl.pending().expect("pending");

        let mut runs = 0;
        assert!(rl.tick(first, |_| runs += 1));
        assert!(!rl.tick(first, |_| runs += 1));
        assert!(!rl.tick(FrameHandle(1234), |_| runs += 1));
        assert_eq!(runs, 1);
    }

    #[test]
    fn stop_cancels_pending_and_blocks_further_ticks() {
        let mut rl = RenderLoop::new(ManualScheduler::new(), 1.0);
        rl.start();
        let pending = rl.pending().expect("pending");

        rl.stop();
        rl.stop();
        assert_eq!(rl.state(), LoopState::Stopped);
        assert_eq!(rl.scheduler().cancelled_count(), 1);
        assert_eq!(rl.scheduler().pending_len(), 0);

        let mut ran = false;
        assert!(!rl.tick(pending, |_| ran = true));
        assert!(!ran);
        assert!(!rl.start());
    }
}
