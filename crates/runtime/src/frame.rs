/// Index and timing of one render tick.
///
/// Time advances by a fixed step per tick rather than by wall clock, so a
/// sequence of fired callbacks always yields the same frame numbers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based, counted from the first tick after `start`.
    pub index: u64,
    pub dt_s: f64,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self { index, dt_s }
    }

    /// Seconds since the loop started, at the beginning of this frame.
    pub fn elapsed_s(&self) -> f64 {
        self.index as f64 * self.dt_s
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}
