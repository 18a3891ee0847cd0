use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use eframe::glow;
use glam::{Vec2, Vec3};

/// Interleaved vertex layout shared by every sketch. Kept `Pod` so whole
/// vertex slices can be handed to the GL as bytes.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub pos: Vec3,
    pub nrm: Vec3,
    pub clr: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(pos: Vec3, nrm: Vec3, clr: Vec3) -> Self {
        Self {
            pos,
            nrm: nrm.normalize(),
            clr,
            uv: Vec2::ZERO,
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    /// Declares the attribute pointers (locations 0..=3) on the currently
    /// bound VAO/VBO. Every sketch goes through here so the layout cannot
    /// drift between programs.
    pub fn declare_attributes(gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            let stride = size_of::<Vertex>() as i32;

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, nrm) as _,
            );

            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                3,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, clr) as _,
            );

            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(
                3,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(Vertex, uv) as _,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        // The attribute pointers in `declare_attributes` depend on this.
        assert_eq!(size_of::<Vertex>(), 11 * size_of::<f32>());
        assert_eq!(offset_of!(Vertex, nrm), 3 * size_of::<f32>());
        assert_eq!(offset_of!(Vertex, clr), 6 * size_of::<f32>());
        assert_eq!(offset_of!(Vertex, uv), 9 * size_of::<f32>());
    }

    #[test]
    fn new_normalizes_the_normal() {
        let v = Vertex::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Vec3::ONE);
        assert!((v.nrm.length() - 1.0).abs() < 1e-6);
        assert_eq!(v.nrm, Vec3::Y);
    }

    #[test]
    fn vertices_cast_to_bytes() {
        let verts = [
            Vertex::new(Vec3::X, Vec3::Y, Vec3::ONE),
            Vertex::new(Vec3::Z, Vec3::Y, Vec3::ONE).with_uv(Vec2::ONE),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 2 * size_of::<Vertex>());
    }
}
