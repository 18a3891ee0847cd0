use std::{error::Error, fmt};

use eframe::glow;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Typed uniform upload. Matrices and vectors go by reference, scalars by
/// value.
#[allow(dead_code)]
pub enum UniformValue<'a> {
    Mat4(&'a Mat4),
    Vec4(&'a Vec4),
    Vec3(&'a Vec3),
    Vec2(&'a Vec2),
    F32(f32),
    U32(u32),
    I32(i32),
}

#[derive(Debug, Clone)]
pub enum ShaderError {
    Create(String),
    Compile { stage: &'static str, log: String },
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create(e) => write!(f, "could not create shader object: {e}"),
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed:\n{log}")
            }
            Self::Link(log) => write!(f, "shader program link failed:\n{log}"),
        }
    }
}

impl Error for ShaderError {}

/// A linked GL program. `Clone` is cheap (the handle is copied), ownership
/// of the GL object stays with whoever calls `destroy`.
#[derive(Debug, Clone)]
pub struct Shader(glow::Program);

impl Shader {
    /// Compiles and links vertex + fragment (+ optional geometry) sources.
    /// Compile and link failures carry the driver info log.
    pub fn from_src(
        gl: &glow::Context,
        vtx: &str,
        frag: &str,
        geom: Option<&str>,
    ) -> Result<Self, ShaderError> {
        use glow::HasContext as _;

        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            let mut stages = vec![
                (glow::VERTEX_SHADER, "vertex", vtx),
                (glow::FRAGMENT_SHADER, "fragment", frag),
            ];
            if let Some(geom) = geom {
                stages.push((glow::GEOMETRY_SHADER, "geometry", geom));
            }

            let mut shaders = Vec::with_capacity(stages.len());
            for (kind, stage, src) in stages {
                let shader = match gl.create_shader(kind) {
                    Ok(shader) => shader,
                    Err(e) => {
                        Self::cleanup(gl, program, &shaders);
                        return Err(ShaderError::Create(e));
                    }
                };
                gl.shader_source(shader, src);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    let log = gl.get_shader_info_log(shader);
                    gl.delete_shader(shader);
                    Self::cleanup(gl, program, &shaders);
                    return Err(ShaderError::Compile { stage, log });
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }

            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                Self::cleanup(gl, program, &shaders);
                return Err(ShaderError::Link(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            Ok(Self(program))
        }
    }

    fn cleanup(gl: &glow::Context, program: glow::Program, shaders: &[glow::Shader]) {
        unsafe {
            use glow::HasContext as _;

            for &shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            gl.delete_program(program);
        }
    }

    pub fn set_uniform(&self, gl: &glow::Context, name: &str, value: UniformValue) {
        unsafe {
            use glow::HasContext as _;

            let location = gl.get_uniform_location(self.0, name);
            match value {
                UniformValue::Mat4(value) => {
                    gl.uniform_matrix_4_f32_slice(location.as_ref(), false, &value.to_cols_array());
                }
                UniformValue::Vec4(value) => {
                    gl.uniform_4_f32_slice(location.as_ref(), &value.to_array());
                }
                UniformValue::Vec3(value) => {
                    gl.uniform_3_f32_slice(location.as_ref(), &value.to_array());
                }
                UniformValue::Vec2(value) => {
                    gl.uniform_2_f32_slice(location.as_ref(), &value.to_array());
                }
                UniformValue::F32(value) => {
                    gl.uniform_1_f32(location.as_ref(), value);
                }
                UniformValue::U32(value) => {
                    gl.uniform_1_u32(location.as_ref(), value);
                }
                UniformValue::I32(value) => {
                    gl.uniform_1_i32(location.as_ref(), value);
                }
            }
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.use_program(Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_program(self.0);
        }
    }
}
