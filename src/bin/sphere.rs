#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! Sketch 03: the UV-sphere. Arrow keys rotate the model, Escape quits.
//! The side panel exposes the mesh resolution and a wireframe toggle.

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::panel::Side;
use egui::Id;
use glam::{Mat4, Vec3};

use glow_sketches::gfx::{Mesh, MeshModel, Model, Shader};

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

const ROTATE_DEG_PER_SEC: f32 = 30.0;

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
    out vec3 v_nrm;

    void main() {
        v_clr = a_clr;
        v_nrm = mat3(model) * a_nrm;
        gl_Position = proj * view * model * vec4(a_pos, 1.0);
    }
"#;

const FRAG_SRC: &str = r#"
    #version 330 core
    in vec3 v_clr;
    in vec3 v_nrm;
    out vec4 frag;

    void main() {
        vec3 light = normalize(vec3(0.4, 0.8, 0.6));
        float diffuse = max(dot(normalize(v_nrm), light), 0.0);
        frag = vec4(v_clr * (0.25 + 0.75 * diffuse), 1.0);
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
        "Sketch 03: UV-Sphere",
        options,
        Box::new(|cc| Ok(Box::new(SphereApp::new(cc)))),
    )
}

struct SphereApp {
    model: Arc<Mutex<MeshModel>>,
    shader: Shader,
    wireframe: bool,

    // Regenerating the mesh on slider release needs the current settings.
    segments: u32,
    ring_segments: u32,
}

impl SphereApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader =
            Shader::from_src(gl, VERT_SRC, FRAG_SRC, None).expect("Could not build sphere shader");

        let segments = 8;
        let ring_segments = 8;
        let mut model = MeshModel::new("sphere", Self::sphere_mesh(segments, ring_segments));
        model.transform.model = Mat4::from_scale(Vec3::splat(0.7));
        model.transform.view = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0));
        model.setup_gl(gl);

        Self {
            model: Arc::new(Mutex::new(model)),
            shader,
            wireframe: false,
            segments,
            ring_segments,
        }
    }

    fn sphere_mesh(segments: u32, ring_segments: u32) -> Mesh {
        Mesh::uv_sphere(segments, ring_segments, 0.5, Vec3::new(0.5, 0.1, 0.2))
            .expect("Sphere parameters are valid")
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let model = &mut self.model.lock();

        ctx.input(|i| {
            let degrees = ROTATE_DEG_PER_SEC * i.predicted_dt;

            if i.key_down(egui::Key::ArrowRight) {
                model.transform.rotate_model(Vec3::Y, degrees);
            }
            if i.key_down(egui::Key::ArrowLeft) {
                model.transform.rotate_model(Vec3::Y, -degrees);
            }
            if i.key_down(egui::Key::ArrowUp) {
                model.transform.rotate_model(Vec3::X, degrees);
            }
            if i.key_down(egui::Key::ArrowDown) {
                model.transform.rotate_model(Vec3::X, -degrees);
            }
        });
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (rect, _response) = ui.allocate_at_least(size, egui::Sense::hover());

        self.handle_input(ctx);
        self.model
            .lock()
            .transform
            .set_perspective(45.0, size.x / size.y, 0.1, 100.0);

        let model = self.model.clone();
        let shader = self.shader.clone();
        let wireframe = self.wireframe;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let model = &mut model.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.enable(glow::DEPTH_TEST);
                    if wireframe {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
                    } else {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    }
                    gl.clear_color(0.2, 0.3, 0.3, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                model.draw(gl, &shader);

                // Reset back to the normal setting
                unsafe {
                    use glow::HasContext as _;
                    gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                }
            })),
        };
        ui.painter().add(callback);
    }

    fn rebuild_mesh(&mut self, gl: &glow::Context) {
        let model = &mut self.model.lock();
        model.mesh = Self::sphere_mesh(self.segments, self.ring_segments);
        model.destroy_gl(gl);
        model.setup_gl(gl);
        log::debug!(
            "rebuilt sphere: {}x{} -> {} vertices",
            self.segments,
            self.ring_segments,
            model.mesh.vertices.len()
        );
    }
}

impl eframe::App for SphereApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::SidePanel::new(Side::Left, Id::new("Controls")).show(ctx, |ui| {
            ui.add(egui::Checkbox::new(&mut self.wireframe, "Wireframe"));

            let segments = ui.add(egui::Slider::new(&mut self.segments, 2..=64).text("Segments"));
            let rings = ui.add(
                egui::Slider::new(&mut self.ring_segments, 3..=64).text("Ring segments"),
            );
            if segments.changed() || rings.changed() {
                self.rebuild_mesh(frame.gl().unwrap());
            }

            let model = self.model.lock();
            ui.label(format!(
                "{} vertices / {} triangles",
                model.mesh.vertices.len(),
                model.mesh.triangle_count()
            ));
        });
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
