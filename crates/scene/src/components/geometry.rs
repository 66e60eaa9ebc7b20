use std::f64::consts::{PI, TAU};

/// UV sphere centred at the origin.
///
/// Vertices are laid out row by row from the north pole (`v = 0`) to the
/// south pole (`v = 1`); `u` runs once around the equator. UVs use image
/// orientation (top row at `v = 0`), so an equirectangular bitmap maps
/// directly without flipping.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereGeometry {
    pub radius: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    scale: [f64; 3],
}

impl SphereGeometry {
    pub fn new(radius: f64, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let stride = width_segments + 1;

        let vertex_count = (stride * (height_segments + 1)) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for iy in 0..=height_segments {
            let v = iy as f64 / height_segments as f64;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f64 / width_segments as f64;
                let phi = u * TAU;

                let x = -radius * phi.cos() * theta.sin();
                let y = radius * theta.cos();
                let z = radius * phi.sin() * theta.sin();
                positions.push([x as f32, y as f32, z as f32]);
                uvs.push([u as f32, v as f32]);
            }
        }

        // Pole rows collapse to a point, so only one triangle per quad is emitted there.
        let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * stride + ix + 1;
                let b = iy * stride + ix;
                let c = (iy + 1) * stride + ix;
                let d = (iy + 1) * stride + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            radius,
            width_segments,
            height_segments,
            positions,
            uvs,
            indices,
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Scales vertex positions in place. A negative factor on one axis mirrors
    /// the sphere, turning the front faces inward.
    pub fn scale(mut self, sx: f64, sy: f64, sz: f64) -> Self {
        for p in &mut self.positions {
            p[0] = (p[0] as f64 * sx) as f32;
            p[1] = (p[1] as f64 * sy) as f32;
            p[2] = (p[2] as f64 * sz) as f32;
        }
        self.scale = [self.scale[0] * sx, self.scale[1] * sy, self.scale[2] * sz];
        self
    }

    /// `true` when the accumulated scale mirrors the sphere an odd number of times.
    pub fn is_inverted(&self) -> bool {
        self.scale[0] * self.scale[1] * self.scale[2] < 0.0
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Edge list (pairs of indices) covering every triangle edge, for
    /// line-list wireframe rendering.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            lines.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::SphereGeometry;

    fn face_dot_centroid(g: &SphereGeometry, tri: usize) -> f32 {
        let i = &g.indices[tri * 3..tri * 3 + 3];
        let (a, b, c) = (
            g.positions[i[0] as usize],
            g.positions[i[1] as usize],
            g.positions[i[2] as usize],
        );
        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let n = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];
        let centroid = [
            (a[0] + b[0] + c[0]) / 3.0,
            (a[1] + b[1] + c[1]) / 3.0,
            (a[2] + b[2] + c[2]) / 3.0,
        ];
        n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2]
    }

    #[test]
    fn builds_expected_counts() {
        let g = SphereGeometry::new(500.0, 60, 40);
        assert_eq!(g.vertex_count(), 61 * 41);
        // Two triangles per quad except one fewer per pole row.
        assert_eq!(g.triangle_count(), 60 * 40 * 2 - 2 * 60);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }

    #[test]
    fn vertices_lie_on_radius() {
        let g = SphereGeometry::new(500.0, 16, 8);
        for p in &g.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 500.0).abs() < 0.05, "radius {r}");
        }
    }

    #[test]
    fn mirroring_turns_faces_inward() {
        let outward = SphereGeometry::new(1.0, 8, 6);
        let inward = SphereGeometry::new(1.0, 8, 6).scale(-1.0, 1.0, 1.0);
        assert!(!outward.is_inverted());
        assert!(inward.is_inverted());

        // A triangle from the middle band, away from the collapsed pole rows.
        let tri = outward.triangle_count() / 2;
        assert!(face_dot_centroid(&outward, tri) > 0.0);
        assert!(face_dot_centroid(&inward, tri) < 0.0);
    }

    #[test]
    fn wireframe_has_three_edges_per_triangle() {
        let g = SphereGeometry::new(1.0, 4, 3);
        assert_eq!(g.wireframe_indices().len(), g.triangle_count() * 6);
    }
}
