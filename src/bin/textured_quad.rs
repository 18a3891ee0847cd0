#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! Sketch 04: texturing. A quad sampling a procedural checkerboard with
//! mipmaps and repeat wrapping; a slider tiles the UVs to show the wrap.

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::panel::Side;
use egui::Id;
use glam::{Mat4, Vec3};

use glow_sketches::gfx::{
    shader::UniformValue, texture, Mesh, MeshModel, Model, Shader, Texture,
};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

const VERT_SRC: &str = r#"
    #version 330 core
    layout (location = 0) in vec3 a_pos;
    layout (location = 1) in vec3 a_nrm;
    layout (location = 2) in vec3 a_clr;
    layout (location = 3) in vec2 a_uv;

    uniform mat4 model;
    uniform mat4 view;
    uniform mat4 proj;
    uniform float uv_tiles;

    out vec3 v_clr;
    out vec2 v_uv;

    void main() {
        v_clr = a_clr;
        v_uv = a_uv * uv_tiles;
        gl_Position = proj * view * model * vec4(a_pos, 1.0);
    }
"#;

const FRAG_SRC: &str = r#"
    #version 330 core
    in vec3 v_clr;
    in vec2 v_uv;
    out vec4 frag;

    uniform sampler2D checker;

    void main() {
        frag = texture(checker, v_uv) * vec4(v_clr, 1.0);
    }
"#;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WIDTH, HEIGHT]),
        multisampling: 2,
        depth_buffer: 24,

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        "Sketch 04: Textured Quad",
        options,
        Box::new(|cc| Ok(Box::new(TexturedQuadApp::new(cc)))),
    )
}

struct TexturedQuadApp {
    model: Arc<Mutex<MeshModel>>,
    texture: Arc<Mutex<Texture>>,
    shader: Shader,
    uv_tiles: f32,
}

impl TexturedQuadApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader =
            Shader::from_src(gl, VERT_SRC, FRAG_SRC, None).expect("Could not build quad shader");

        let pixels = texture::checkerboard(
            256,
            8,
            [235, 235, 235, 255],
            [40, 40, 60, 255],
        );
        let mut checker = Texture::from_rgba8(256, 256, pixels)
            .expect("Checkerboard pixels match their dimensions");
        checker.setup_gl(gl);

        let mesh = Mesh::quad(0.5, Vec3::ONE).expect("Quad parameters are valid");
        let mut model = MeshModel::new("quad", mesh);
        model.transform.view = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.5));
        model.setup_gl(gl);

        Self {
            model: Arc::new(Mutex::new(model)),
            texture: Arc::new(Mutex::new(checker)),
            shader,
            uv_tiles: 1.0,
        }
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        self.model
            .lock()
            .transform
            .set_perspective(45.0, size.x / size.y, 0.1, 100.0);

        let model = self.model.clone();
        let checker = self.texture.clone();
        let shader = self.shader.clone();
        let uv_tiles = self.uv_tiles;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let model = &mut model.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.clear_color(0.1, 0.1, 0.12, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                checker.lock().bind(gl, 0);
                shader.use_program(gl);
                shader.set_uniform(gl, "checker", UniformValue::I32(0));
                shader.set_uniform(gl, "uv_tiles", UniformValue::F32(uv_tiles));

                model.draw(gl, &shader);
            })),
        };
        ui.painter().add(callback);
    }
}

impl eframe::App for TexturedQuadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::SidePanel::new(Side::Left, Id::new("Controls")).show(ctx, |ui| {
            ui.add(egui::Slider::new(&mut self.uv_tiles, 1.0..=8.0).text("UV tiling"));
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                self.custom_painting(ui);
            });
        });
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shader.destroy(gl);
            self.model.lock().destroy_gl(gl);
            self.texture.lock().destroy_gl(gl);
        }
    }
}
