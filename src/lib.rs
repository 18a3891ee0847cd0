//! Shared core for the sketches in `src/bin`: vertex layout, procedural
//! meshes, a shader wrapper, a free-fly camera, and a small model
//! abstraction over VAO/VBO/EBO handles.

pub mod gfx;
