pub mod camera;
pub mod mesh;
pub mod model;
pub mod shader;
pub mod texture;
pub mod transform;
pub mod vertex;

pub use mesh::Mesh;
pub use model::MeshModel;
pub use shader::Shader;
pub use texture::Texture;
pub use transform::Transform;
pub use vertex::Vertex;

use eframe::glow;

/// Anything that owns GL objects and can be drawn. `setup_gl` / `destroy_gl`
/// bracket the lifetime of the GPU-side state, `update_gl` pushes changed
/// CPU data back to the buffers.
pub trait Model {
    fn setup_gl(&mut self, gl: &glow::Context);
    fn destroy_gl(&mut self, gl: &glow::Context);
    fn update_gl(&mut self, gl: &glow::Context);

    fn draw(&mut self, gl: &glow::Context, shader: &Shader);
}
