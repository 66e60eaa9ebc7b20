use foundation::math::{Vec3, clamp, deg_to_rad};

pub const DEFAULT_DRAG_SENSITIVITY: f64 = 0.1;
pub const DEFAULT_LATITUDE_LIMIT: f64 = 85.0;

/// Viewing direction in degrees. Longitude is unbounded; latitude stays
/// within the controller's limit.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct OrientationState {
    pub longitude: f64,
    pub latitude: f64,
}

/// Turns touch drags into a look direction for a camera at the sphere
/// center.
#[derive(Debug, Clone)]
pub struct OrientationController {
    state: OrientationState,
    sensitivity: f64,
    latitude_limit: f64,
    drag_ref: Option<(f64, f64)>,
}

impl Default for OrientationController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_SENSITIVITY, DEFAULT_LATITUDE_LIMIT)
    }
}

impl OrientationController {
    pub fn new(sensitivity: f64, latitude_limit: f64) -> Self {
        Self {
            state: OrientationState::default(),
            sensitivity,
            latitude_limit: latitude_limit.abs(),
            drag_ref: None,
        }
    }

    pub fn state(&self) -> OrientationState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_ref.is_some()
    }

    pub fn on_drag_start(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.drag_ref = Some((x, y));
    }

    pub fn on_drag_move(&mut self, x: f64, y: f64) {
        let Some((ref_x, ref_y)) = self.drag_ref else {
            return;
        };
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        // Dragging right turns the view left.
        self.state.longitude -= (x - ref_x) * self.sensitivity;
        self.state.latitude = clamp(
            self.state.latitude + (y - ref_y) * self.sensitivity,
            -self.latitude_limit,
            self.latitude_limit,
        );
        self.drag_ref = Some((x, y));
    }

    pub fn on_drag_end(&mut self) {
        self.drag_ref = None;
    }

    pub fn reset(&mut self) {
        self.state = OrientationState::default();
        self.drag_ref = None;
    }

    /// Unit direction for the current orientation.
    pub fn to_look_at_vector(&self) -> Vec3 {
        let phi = deg_to_rad(90.0 - self.state.latitude);
        let theta = deg_to_rad(self.state.longitude);
        Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin())
    }
}
