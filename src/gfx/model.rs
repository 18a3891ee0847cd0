use eframe::glow;

use super::{Mesh, Model, Shader, Transform, Vertex};

/// A mesh plus its GL buffers and MVP chain. CPU data lives here, the GL
/// objects only exist between `setup_gl` and `destroy_gl`.
#[derive(Debug, Clone)]
pub struct MeshModel {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
    pub render: bool,

    vao: Option<glow::VertexArray>,
    vbo: Option<glow::Buffer>,
    ebo: Option<glow::Buffer>,
}

impl MeshModel {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::default(),
            render: true,
            vao: None,
            vbo: None,
            ebo: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

impl Model for MeshModel {
    fn setup_gl(&mut self, gl: &glow::Context) {
        // Do not setup twice!
        if self.vao.is_some() || self.vbo.is_some() || self.ebo.is_some() {
            panic!("Trying to setup GL twice");
        }

        unsafe {
            use glow::HasContext as _;

            match gl.create_vertex_array() {
                Ok(vao) => self.vao = Some(vao),
                Err(e) => panic!("{}", e),
            };
            match gl.create_buffer() {
                Ok(vbo) => self.vbo = Some(vbo),
                Err(e) => panic!("{}", e),
            };
            match gl.create_buffer() {
                Ok(ebo) => self.ebo = Some(ebo),
                Err(e) => panic!("{}", e),
            };

            gl.bind_vertex_array(self.vao);

            gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&self.mesh.vertices),
                glow::STATIC_DRAW,
            );
            Vertex::declare_attributes(gl);

            // The EBO binding is captured by the VAO.
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.ebo);
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&self.mesh.indices),
                glow::STATIC_DRAW,
            );

            gl.bind_vertex_array(None);
        }
    }

    fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let Some(vao) = self.vao {
                gl.delete_vertex_array(vao);
            }
            if let Some(vbo) = self.vbo {
                gl.delete_buffer(vbo);
            }
            if let Some(ebo) = self.ebo {
                gl.delete_buffer(ebo);
            }

            self.vao = None;
            self.vbo = None;
            self.ebo = None;
        }
    }

    fn update_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if self.vbo.is_some() {
                gl.bind_buffer(glow::ARRAY_BUFFER, self.vbo);
                gl.buffer_sub_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    0,
                    bytemuck::cast_slice(&self.mesh.vertices),
                );
            }
        }
    }

    fn draw(&mut self, gl: &glow::Context, shader: &Shader) {
        if !self.render || self.vao.is_none() {
            return;
        }

        shader.use_program(gl);
        self.transform.apply(gl, shader);

        unsafe {
            use glow::HasContext as _;

            gl.bind_vertex_array(self.vao);
            gl.draw_elements(
                glow::TRIANGLES,
                self.mesh.indices.len() as _,
                glow::UNSIGNED_INT,
                0,
            );
            gl.bind_vertex_array(None);
        }
    }
}
