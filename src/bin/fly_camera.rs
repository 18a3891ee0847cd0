#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

//! Sketch 05: free-fly camera. WASD + Space/Shift to move, drag to look,
//! scroll to zoom, through a small field of spheres.

use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;
use egui::panel::Side;
use egui::{Id, Response};
use glam::{Mat4, Vec3};

use glow_sketches::gfx::{camera::Camera, Mesh, MeshModel, Model, Shader};

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;

const SCROLL_TO_ZOOM: f32 = 0.02;

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
        "Sketch 05: Fly Camera",
        options,
        Box::new(|cc| Ok(Box::new(FlyCameraApp::new(cc)))),
    )
}

struct FlyCameraApp {
    models: Arc<Mutex<Vec<MeshModel>>>,
    shader: Shader,
    camera: Camera,
    wireframe: bool,
}

impl FlyCameraApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .as_ref()
            .expect("You need to run eframe with the glow backend");

        let shader =
            Shader::from_src(gl, VERT_SRC, FRAG_SRC, None).expect("Could not build scene shader");

        // A 4x4 field of spheres with varied colors and sizes.
        let mut models = Vec::new();
        for ix in 0..4 {
            for iz in 0..4 {
                let radius = 0.3 + 0.1 * ((ix + iz) % 3) as f32;
                let color = Vec3::new(
                    0.3 + 0.2 * ix as f32 / 3.0,
                    0.2 + 0.6 * iz as f32 / 3.0,
                    0.8 - 0.5 * ix as f32 / 3.0,
                );
                let mesh = Mesh::uv_sphere(16, 24, radius, color)
                    .expect("Sphere parameters are valid");

                let mut model = MeshModel::new(format!("sphere_{ix}_{iz}"), mesh);
                model.transform.model = Mat4::from_translation(Vec3::new(
                    2.0 * ix as f32 - 3.0,
                    0.0,
                    -2.0 * iz as f32,
                ));
                model.setup_gl(gl);
                models.push(model);
            }
        }
        log::info!("scene ready: {} sphere models", models.len());

        Self {
            models: Arc::new(Mutex::new(models)),
            shader,
            camera: Camera::new().with_pos(Vec3::new(0.0, 1.0, 4.0)).with_speed(3.0),
            wireframe: false,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, response: &Response) {
        let cam = &mut self.camera;

        ctx.input(|i| {
            let amount = cam.speed() * i.predicted_dt;

            if i.key_down(egui::Key::W) {
                cam.move_forward(amount);
            }
            if i.key_down(egui::Key::S) {
                cam.move_backward(amount);
            }
            if i.key_down(egui::Key::A) {
                cam.move_left(amount);
            }
            if i.key_down(egui::Key::D) {
                cam.move_right(amount);
            }
            if i.key_down(egui::Key::Space) {
                cam.move_up(amount);
            }
            if i.modifiers.shift {
                cam.move_down(amount);
            }

            cam.zoom(i.raw_scroll_delta.y * SCROLL_TO_ZOOM);
        });

        cam.look(response.drag_motion().x, -response.drag_motion().y);
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_at_least(size, egui::Sense::drag());

        self.handle_input(ctx, &response);

        let view = self.camera.view_mtx();
        let proj = self.camera.projection_mtx(size.x / size.y, 0.1, 1000.0);
        {
            let mut models = self.models.lock();
            for model in models.iter_mut() {
                model.transform.view = view;
                model.transform.proj = proj;
            }
        }

        let models = self.models.clone();
        let shader = self.shader.clone();
        let wireframe = self.wireframe;

        let callback = egui::PaintCallback {
            rect,
            callback: std::sync::Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let models = &mut models.lock();
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    gl.enable(glow::DEPTH_TEST);
                    if wireframe {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::LINE);
                    } else {
                        gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                    }
                    gl.clear_color(0.05, 0.05, 0.08, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
                }

                for model in models.iter_mut() {
                    model.draw(gl, &shader);
                }

                // Reset back to the normal setting
                unsafe {
                    use glow::HasContext as _;
                    gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
                }
            })),
        };
        ui.painter().add(callback);
    }
}

impl eframe::App for FlyCameraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::SidePanel::new(Side::Left, Id::new("Controls")).show(ctx, |ui| {
            ui.add(egui::Slider::new(self.camera.speed_mut(), 0.5..=50.0).text("Camera speed"));
            ui.add(egui::Checkbox::new(&mut self.wireframe, "Wireframe"));
            ui.label(format!("FOV: {:.1}°", self.camera.fov_y()));

            let pos = self.camera.pos();
            ui.label(format!("Pos: {:.1} {:.1} {:.1}", pos.x, pos.y, pos.z));
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
            self.models
                .lock()
                .iter_mut()
                .for_each(|model| model.destroy_gl(gl));
        }
    }
}
