#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! Sketch 01: one triangle with interpolated corner colors.

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use glam::Vec3;

use glow_sketches::gfx::{Mesh, MeshModel, Model, Shader, Vertex};

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

    out vec3 v_clr;

    void main() {
        v_clr = a_clr;
        gl_Position = proj * view * model * vec4(a_pos, 1.0);
    }
"#;

const FRAG_SRC: &str = r#"
    #version 330 core
    in vec3 v_clr;
    out vec4 frag;

    void main() {
        frag = vec4(v_clr, 1.0);
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
        "Sketch 01: Triangle",
        options,
        Box::new(|cc| Ok(Box::new(TriangleApp::new(cc)))),
    )
}

struct TriangleApp {
    /// Behind an `Arc<Mutex<…>>` so we can pass it to [`egui::PaintCallback`] and paint later.
    model: Arc<Mutex<MeshModel>>,
    shader: Shader,
}

impl TriangleApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader = Shader::from_src(gl, VERT_SRC, FRAG_SRC, None)
            .expect("Could not build triangle shader");

        let mesh = Mesh {
            vertices: vec![
                Vertex::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::Z, Vec3::X),
                Vertex::new(Vec3::new(0.5, -0.5, 0.0), Vec3::Z, Vec3::Y),
                Vertex::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Z, Vec3::Z),
            ],
            indices: vec![0, 1, 2],
        };

        let mut model = MeshModel::new("triangle", mesh);
        model.setup_gl(gl);

        Self {
            model: Arc::new(Mutex::new(model)),
            shader,
        }
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        let model = self.model.clone();
        let shader = self.shader.clone();

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let model = &mut model.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.clear_color(0.2, 0.3, 0.3, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                model.draw(gl, &shader);
            })),
        };
        ui.painter().add(callback);
    }
}

impl eframe::App for TriangleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

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
        }
    }
}
