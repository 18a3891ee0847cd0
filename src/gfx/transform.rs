use eframe::glow;
use glam::{Mat4, Vec3};

use super::{shader::UniformValue, Shader};

/// The MVP chain for one model. Uniform names match the GLSL in the
/// sketches: `model`, `view`, `proj`.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub model: Mat4,
    pub view: Mat4,
    pub proj: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        }
    }
}

#[allow(dead_code)]
impl Transform {
    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }

    /// Rotates the model matrix in place around `axis`, like repeatedly
    /// holding an arrow key.
    pub fn rotate_model(&mut self, axis: Vec3, degrees: f32) {
        self.model *= Mat4::from_axis_angle(axis, degrees.to_radians());
    }

    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) {
        self.proj = Mat4::perspective_rh_gl(fov_y_degrees.to_radians(), aspect, near, far);
    }

    /// Uploads all three matrices. The program must already be in use.
    pub fn apply(&self, gl: &glow::Context, shader: &Shader) {
        shader.set_uniform(gl, "model", UniformValue::Mat4(&self.model));
        shader.set_uniform(gl, "view", UniformValue::Mat4(&self.view));
        shader.set_uniform(gl, "proj", UniformValue::Mat4(&self.proj));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.model, Mat4::IDENTITY);
        assert_eq!(t.view, Mat4::IDENTITY);
        assert_eq!(t.proj, Mat4::IDENTITY);
    }

    #[test]
    fn rotate_model_composes() {
        let mut t = Transform::default();
        t.rotate_model(Vec3::Y, 90.0);
        t.rotate_model(Vec3::Y, 90.0);
        // Two quarter turns about Y send +X to -X.
        let p = t.model * Vec4::X;
        assert!((p.truncate() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let mut t = Transform::default();
        t.set_perspective(45.0, 4.0 / 3.0, 0.1, 100.0);
        let p = t.proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((p.z / p.w + 1.0).abs() < 1e-4);
    }
}
