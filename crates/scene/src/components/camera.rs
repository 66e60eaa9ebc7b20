use foundation::math::{
    Mat4, Vec3, deg_to_rad, mat4_look_at_rh, mat4_mul, mat4_perspective_rh_z0,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    target: Vec3,
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z.
    pub fn new(fov_y_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y_deg,
            aspect: aspect.max(1e-6),
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    pub fn set_aspect_from_size(&mut self, width: f64, height: f64) {
        self.aspect = if height <= 0.0 {
            1.0
        } else {
            (width / height).max(1e-6)
        };
    }

    /// Orients the camera towards `target` without moving it.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4_look_at_rh(self.position, self.target, Vec3::UP)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        mat4_perspective_rh_z0(deg_to_rad(self.fov_y_deg), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        mat4_mul(self.projection_matrix(), self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::PerspectiveCamera;
    use foundation::math::{Vec3, mat4_transform_point};

    #[test]
    fn aspect_tracks_surface_size() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        cam.set_aspect_from_size(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect_from_size(800.0, 0.0);
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn looked_at_point_projects_to_screen_center() {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 1000.0);
        let target = Vec3::new(1.0, 0.0, 0.0);
        cam.look_at(target);
        assert_eq!(cam.position, Vec3::ZERO);

        let clip = mat4_transform_point(cam.view_proj(), target.scale(400.0));
        let (x, y, z) = (clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]);
        assert!(x.abs() < 1e-4 && y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&z));
    }
}
