/// Identifies one texture load.
///
/// Small and copyable so it can travel with an in-flight future and be
/// compared against the tracker when the future resolves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Request(pub u64);

/// Monotonic request counter: only the most recently issued request is
/// allowed to apply its result.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    current: Option<Request>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token, superseding whatever was current.
    pub fn issue(&mut self) -> Request {
        self.next += 1;
        let req = Request(self.next);
        self.current = Some(req);
        req
    }

    pub fn current(&self) -> Option<Request> {
        self.current
    }

    pub fn is_current(&self, req: Request) -> bool {
        self.current == Some(req)
    }

    /// Marks `req` as applied. Returns `false` for a stale token.
    pub fn complete(&mut self, req: Request) -> bool {
        if !self.is_current(req) {
            return false;
        }
        self.current = None;
        true
    }

    /// Drops the current token; every outstanding request becomes stale.
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{Request, RequestTracker};

    #[test]
    fn later_request_supersedes_earlier() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue();
        let b = tracker.issue();
        assert!(a < b);
        assert!(!tracker.is_current(a));
        assert!(!tracker.complete(a));
        assert!(tracker.complete(b));
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn completing_twice_is_stale() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue();
        assert!(tracker.complete(a));
        assert!(!tracker.complete(a));
    }

    #[test]
    fn invalidate_makes_everything_stale() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue();
        tracker.invalidate();
        assert!(!tracker.is_current(a));
        assert!(!tracker.complete(a));
        assert!(!tracker.is_current(Request(0)));
    }
}
