#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! Sketch 02: a procedural circle fan, spinning about its center.

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use glam::Vec3;

use glow_sketches::gfx::{Mesh, MeshModel, Model, Shader};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

const RIM_VERTICES: u32 = 48;
const SPIN_DEG_PER_SEC: f32 = 45.0;

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
    out vec2 v_uv;

    void main() {
        v_clr = a_clr;
        v_uv = a_uv;
        gl_Position = proj * view * model * vec4(a_pos, 1.0);
    }
"#;

const FRAG_SRC: &str = r#"
    #version 330 core
    in vec3 v_clr;
    in vec2 v_uv;
    out vec4 frag;

    void main() {
        // Shade toward the rim so the spin is visible.
        float rim = length(v_uv - vec2(0.5)) * 2.0;
        frag = vec4(mix(v_clr, v_clr * 0.2, rim * rim), 1.0);
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
        "Sketch 02: Circle",
        options,
        Box::new(|cc| Ok(Box::new(CircleApp::new(cc)))),
    )
}

struct CircleApp {
    model: Arc<Mutex<MeshModel>>,
    shader: Shader,
}

impl CircleApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader =
            Shader::from_src(gl, VERT_SRC, FRAG_SRC, None).expect("Could not build circle shader");

        let mesh = Mesh::circle(RIM_VERTICES, 0.5, Vec3::new(0.9, 0.6, 0.1))
            .expect("Circle parameters are valid");

        let mut model = MeshModel::new("circle", mesh);
        model.setup_gl(gl);

        Self {
            model: Arc::new(Mutex::new(model)),
            shader,
        }
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        let dt = ctx.input(|i| i.predicted_dt);
        {
            let mut model = self.model.lock();
            model
                .transform
                .rotate_model(Vec3::Z, SPIN_DEG_PER_SEC * dt);
            // Correct the aspect so the circle stays round.
            model
                .transform
                .set_perspective(45.0, size.x / size.y, 0.1, 100.0);
            model.transform.view = glam::Mat4::from_translation(Vec3::new(0.0, 0.0, -1.5));
        }

        let model = self.model.clone();
        let shader = self.shader.clone();

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

                model.draw(gl, &shader);
            })),
        };
        ui.painter().add(callback);
    }
}

impl eframe::App for CircleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::canvas(ui.style()).show(ui, |ui| {
                self.custom_painting(ui, ctx);
            });
        });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.shader.destroy(gl);
            self.model.lock().destroy_gl(gl);
        }
    }
}
