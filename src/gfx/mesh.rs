use std::{error::Error, fmt};

use glam::{Vec2, Vec3};

use super::Vertex;

/// CPU-side triangle mesh, indexed. Uploading is the model's job.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    SphereParams {
        segments: u32,
        ring_segments: u32,
        radius: f32,
    },
    CircleParams {
        vertex_count: u32,
        radius: f32,
    },
    QuadParams {
        half_extent: f32,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SphereParams {
                segments,
                ring_segments,
                radius,
            } => write!(
                f,
                "sphere needs segments >= 2, ring_segments >= 3, radius > 0 \
                 (got {segments}, {ring_segments}, {radius})"
            ),
            Self::CircleParams {
                vertex_count,
                radius,
            } => write!(
                f,
                "circle needs vertex_count >= 3, radius > 0 (got {vertex_count}, {radius})"
            ),
            Self::QuadParams { half_extent } => {
                write!(f, "quad needs half_extent > 0 (got {half_extent})")
            }
        }
    }
}

impl Error for MeshError {}

impl Mesh {
    /// UV-sphere centered on the origin, +Y up.
    ///
    /// `segments` latitude subdivisions from pole to pole, `ring_segments`
    /// longitude subdivisions per ring. Each pole is a single shared vertex
    /// and the last column of every ring wraps back to column 0, so no
    /// vertex is duplicated along the seam:
    /// `ring_segments * (segments - 1) + 2` vertices,
    /// `2 * ring_segments * (segments - 1)` triangles.
    pub fn uv_sphere(
        segments: u32,
        ring_segments: u32,
        radius: f32,
        color: Vec3,
    ) -> Result<Self, MeshError> {
        if segments < 2 || ring_segments < 3 || radius <= 0.0 {
            return Err(MeshError::SphereParams {
                segments,
                ring_segments,
                radius,
            });
        }

        let rings = (segments - 1) as usize;
        let mut vertices = Vec::with_capacity(ring_segments as usize * rings + 2);
        let mut indices = Vec::with_capacity(6 * ring_segments as usize * rings);

        let alpha_step = 180.0 / segments as f32;
        let beta_step = 360.0 / ring_segments as f32;

        for i in 0..=segments {
            let alpha = (i as f32 * alpha_step).to_radians();
            let y = radius * alpha.cos();
            let radius_sin_alpha = radius * alpha.sin();

            // Both poles collapse to a single shared vertex.
            let columns = if i == 0 || i == segments {
                1
            } else {
                ring_segments
            };
            for j in 0..columns {
                let beta = (j as f32 * beta_step).to_radians();
                let pos = Vec3::new(radius_sin_alpha * beta.sin(), y, radius_sin_alpha * beta.cos());
                let uv = Vec2::new(
                    j as f32 / ring_segments as f32,
                    i as f32 / segments as f32,
                );
                vertices.push(Vertex {
                    pos,
                    nrm: pos / radius,
                    clr: color,
                    uv,
                });
            }
        }

        // Ring r in 0..rings, column j in 0..ring_segments.
        let vertex = |r: u32, j: u32| 1 + r * ring_segments + j;
        let north = 0u32;
        let south = ring_segments * (segments - 1) + 1;

        for j in 0..ring_segments {
            let w = (j + 1) % ring_segments;
            indices.extend_from_slice(&[north, vertex(0, j), vertex(0, w)]);
        }
        for r in 0..segments - 2 {
            for j in 0..ring_segments {
                let w = (j + 1) % ring_segments;
                indices.extend_from_slice(&[vertex(r, j), vertex(r, w), vertex(r + 1, w)]);
                indices.extend_from_slice(&[vertex(r, j), vertex(r + 1, j), vertex(r + 1, w)]);
            }
        }
        let last = segments - 2;
        for j in 0..ring_segments {
            let w = (j + 1) % ring_segments;
            indices.extend_from_slice(&[south, vertex(last, j), vertex(last, w)]);
        }

        Ok(Self { vertices, indices })
    }

    /// Triangle fan in the XY plane: one center vertex plus `vertex_count`
    /// rim vertices, facing +Z.
    pub fn circle(vertex_count: u32, radius: f32, color: Vec3) -> Result<Self, MeshError> {
        if vertex_count < 3 || radius <= 0.0 {
            return Err(MeshError::CircleParams {
                vertex_count,
                radius,
            });
        }

        let mut vertices = Vec::with_capacity(vertex_count as usize + 1);
        let mut indices = Vec::with_capacity(3 * vertex_count as usize);

        let angle_step = 360.0 / vertex_count as f32;

        vertices.push(Vertex::new(Vec3::ZERO, Vec3::Z, color).with_uv(Vec2::splat(0.5)));

        for i in 0..vertex_count {
            let angle = (i as f32 * angle_step).to_radians();
            let (sin, cos) = angle.sin_cos();
            vertices.push(
                Vertex::new(Vec3::new(radius * cos, radius * sin, 0.0), Vec3::Z, color)
                    .with_uv(Vec2::new(0.5 + cos * 0.5, 0.5 + sin * 0.5)),
            );

            indices.extend_from_slice(&[0, i + 1, (i + 1) % vertex_count + 1]);
        }

        Ok(Self { vertices, indices })
    }

    /// Square in the XY plane, facing +Z, with corner UVs for texturing.
    pub fn quad(half_extent: f32, color: Vec3) -> Result<Self, MeshError> {
        if half_extent <= 0.0 {
            return Err(MeshError::QuadParams { half_extent });
        }

        let h = half_extent;
        let corners = [
            (Vec3::new(-h, -h, 0.0), Vec2::new(0.0, 0.0)),
            (Vec3::new(h, -h, 0.0), Vec2::new(1.0, 0.0)),
            (Vec3::new(h, h, 0.0), Vec2::new(1.0, 1.0)),
            (Vec3::new(-h, h, 0.0), Vec2::new(0.0, 1.0)),
        ];
        let vertices = corners
            .iter()
            .map(|&(pos, uv)| Vertex::new(pos, Vec3::Z, color).with_uv(uv))
            .collect();

        Ok(Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(segments: u32, ring_segments: u32) -> Mesh {
        Mesh::uv_sphere(segments, ring_segments, 1.0, Vec3::ONE).unwrap()
    }

    #[test]
    fn sphere_rejects_bad_params() {
        assert!(Mesh::uv_sphere(1, 8, 1.0, Vec3::ONE).is_err());
        assert!(Mesh::uv_sphere(8, 2, 1.0, Vec3::ONE).is_err());
        assert!(Mesh::uv_sphere(8, 8, 0.0, Vec3::ONE).is_err());
        assert!(Mesh::uv_sphere(8, 8, -1.0, Vec3::ONE).is_err());
    }

    #[test]
    fn sphere_counts_match_closed_form() {
        for (segments, ring_segments) in [(2, 3), (3, 4), (8, 8), (16, 32)] {
            let mesh = sphere(segments, ring_segments);
            assert_eq!(
                mesh.vertices.len() as u32,
                ring_segments * (segments - 1) + 2,
                "vertices for {segments}x{ring_segments}"
            );
            assert_eq!(
                mesh.indices.len() as u32,
                6 * ring_segments * (segments - 1),
                "indices for {segments}x{ring_segments}"
            );
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let mesh = sphere(8, 8);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn sphere_vertices_sit_on_the_sphere() {
        let radius = 0.5;
        let mesh = Mesh::uv_sphere(8, 8, radius, Vec3::ONE).unwrap();
        for v in &mesh.vertices {
            assert!((v.pos.length() - radius).abs() < 1e-5);
            assert!((v.nrm.length() - 1.0).abs() < 1e-5);
            // Outward normal: parallel to the position.
            assert!(v.nrm.dot(v.pos) > 0.0);
        }
    }

    #[test]
    fn sphere_poles_are_shared() {
        let segments = 6;
        let ring_segments = 8;
        let mesh = sphere(segments, ring_segments);
        let north = 0u32;
        let south = ring_segments * (segments - 1) + 1;

        assert!((mesh.vertices[north as usize].pos - Vec3::Y).length() < 1e-5);
        assert!((mesh.vertices[south as usize].pos - Vec3::NEG_Y).length() < 1e-5);

        // Each pole vertex is referenced by exactly one fan of cap triangles.
        let north_uses = mesh.indices.iter().filter(|&&i| i == north).count();
        let south_uses = mesh.indices.iter().filter(|&&i| i == south).count();
        assert_eq!(north_uses, ring_segments as usize);
        assert_eq!(south_uses, ring_segments as usize);
    }

    #[test]
    fn sphere_seam_wraps_without_duplicate_vertices() {
        let segments = 5;
        let ring_segments = 7;
        let mesh = sphere(segments, ring_segments);

        // No two vertices coincide, so the seam must reuse column 0.
        for (a, va) in mesh.vertices.iter().enumerate() {
            for vb in &mesh.vertices[a + 1..] {
                assert!((va.pos - vb.pos).length() > 1e-5);
            }
        }

        // The last column of the first ring closes back onto column 0.
        let last = ring_segments; // vertex(0, ring_segments - 1)
        let first = 1; // vertex(0, 0)
        let closes = mesh
            .indices
            .chunks(3)
            .any(|t| t.contains(&last) && t.contains(&first));
        assert!(closes, "no triangle spans the seam");
    }

    #[test]
    fn sphere_every_vertex_is_referenced() {
        let mesh = sphere(8, 8);
        let mut used = vec![false; mesh.vertices.len()];
        for &i in &mesh.indices {
            used[i as usize] = true;
        }
        assert!(used.iter().all(|&u| u));
    }

    #[test]
    fn sphere_triangles_are_not_degenerate() {
        let mesh = sphere(8, 8);
        for t in mesh.indices.chunks(3) {
            assert_ne!(t[0], t[1]);
            assert_ne!(t[1], t[2]);
            assert_ne!(t[0], t[2]);
        }
    }

    #[test]
    fn two_segment_sphere_is_a_bipyramid() {
        // segments == 2 has a single ring: caps only, no bands.
        let mesh = sphere(2, 3);
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn circle_rejects_bad_params() {
        assert!(Mesh::circle(2, 1.0, Vec3::ONE).is_err());
        assert!(Mesh::circle(8, 0.0, Vec3::ONE).is_err());
    }

    #[test]
    fn circle_fan_closes() {
        let n = 16;
        let mesh = Mesh::circle(n, 2.0, Vec3::ONE).unwrap();
        assert_eq!(mesh.vertices.len() as u32, n + 1);
        assert_eq!(mesh.triangle_count() as u32, n);

        // Every triangle starts at the center and the last one wraps to rim
        // vertex 1.
        for t in mesh.indices.chunks(3) {
            assert_eq!(t[0], 0);
        }
        let last = mesh.indices.chunks(3).last().unwrap();
        assert_eq!(last[2], 1);

        for v in &mesh.vertices[1..] {
            assert!((v.pos.truncate().length() - 2.0).abs() < 1e-5);
            assert_eq!(v.pos.z, 0.0);
        }
    }

    #[test]
    fn quad_has_corner_uvs() {
        let mesh = Mesh::quad(0.5, Vec3::ONE).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(Mesh::quad(0.0, Vec3::ONE).is_err());

        let uvs: Vec<Vec2> = mesh.vertices.iter().map(|v| v.uv).collect();
        assert!(uvs.contains(&Vec2::new(0.0, 0.0)));
        assert!(uvs.contains(&Vec2::new(1.0, 1.0)));
    }
}
