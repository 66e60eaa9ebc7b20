use std::rc::Rc;

use runtime::{FrameHandle, FrameScheduler};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

/// `requestAnimationFrame` scheduler.
///
/// A fired callback hands its handle to `dispatch`, which routes it back to
/// the session that owns the render loop.
pub struct RafScheduler {
    dispatch: Rc<dyn Fn(FrameHandle)>,
    next: u64,
    pending: Option<(FrameHandle, i32)>,
}

impl RafScheduler {
    pub fn new(dispatch: Rc<dyn Fn(FrameHandle)>) -> Self {
        Self {
            dispatch,
            next: 0,
            pending: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);

        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::once_into_js(move |_timestamp: f64| dispatch(handle));
        let raf = web_sys::window()
            .ok_or_else(|| "window missing".into())
            .and_then(|w| w.request_animation_frame(callback.unchecked_ref()));
        match raf {
            Ok(id) => self.pending = Some((handle, id)),
            Err(e) => {
                warn!(frame = handle.0, "requestAnimationFrame failed: {e:?}");
                self.pending = None;
            }
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let Some((pending, id)) = self.pending else {
            return;
        };
        if pending != handle {
            return;
        }
        self.pending = None;
        if let Some(window) = web_sys::window() {
            // Cancelling a callback that already fired is a no-op.
            let _ = window.cancel_animation_frame(id);
        }
    }
}
