use glam::{Mat4, Vec3};

const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const DEFAULT_FOV: f32 = 45.0;
const MIN_FOV: f32 = 1.0;
const MAX_FOV: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;

/// Free-fly yaw/pitch camera. The view matrix is cached and recomputed
/// lazily when something moved.
#[derive(Debug, Clone)]
pub struct Camera {
    pos: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,

    speed: f32,
    sensitivity: f32,
    fov_y: f32,

    mtx: Mat4,
    dirty: bool,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Creation Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn new() -> Self {
        Self {
            pos: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,

            speed: DEFAULT_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
            fov_y: DEFAULT_FOV,

            mtx: Mat4::IDENTITY,
            dirty: true,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self.dirty = true;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self.dirty = true;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.dirty = true;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                    Movement                                                       //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn move_forward(&mut self, amount: f32) {
        self.pos += amount * self.front;
        self.dirty = true;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.pos -= amount * self.front;
        self.dirty = true;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.pos += self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.pos -= self.front.cross(self.up).normalize() * amount;
        self.dirty = true;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.pos.y += amount;
        self.dirty = true;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.pos.y -= amount;
        self.dirty = true;
    }

    /// Mouse-drag look, deltas in pixels. Pitch stays clamped so the view
    /// never flips over the poles.
    pub fn look(&mut self, drag_x: f32, drag_y: f32) {
        self.yaw += drag_x * self.sensitivity;
        self.pitch = (self.pitch + drag_y * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.dirty = true;
    }

    /// Scroll-wheel zoom: narrows the vertical FOV.
    pub fn zoom(&mut self, scroll: f32) {
        self.fov_y = (self.fov_y - scroll).clamp(MIN_FOV, MAX_FOV);
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                              Get / Set Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[allow(dead_code)]
impl Camera {
    pub fn view_mtx(&mut self) -> Mat4 {
        if self.dirty {
            self.calc_mtx();
        }

        self.mtx
    }

    pub fn projection_mtx(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), aspect, near, far)
    }

    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn speed_mut(&mut self) -> &mut f32 {
        &mut self.speed
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                               Internal Functions                                                  //
///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Camera {
    fn calc_mtx(&mut self) {
        self.front = Vec3::new(
            self.yaw.to_radians().cos() * self.pitch.to_radians().cos(),
            self.pitch.to_radians().sin(),
            self.yaw.to_radians().sin() * self.pitch.to_radians().cos(),
        )
        .normalize();

        self.mtx = Mat4::look_at_rh(self.pos, self.pos + self.front, self.up);

        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let mut cam = Camera::new();
        cam.view_mtx();
        assert!((cam.front() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_the_world_opposite_the_camera() {
        let mut cam = Camera::new().with_pos(Vec3::new(0.0, 0.0, 3.0));
        let view = cam.view_mtx();
        // A point at the camera position lands on the eye.
        let eye = view * Vec4::new(0.0, 0.0, 3.0, 1.0);
        assert!(eye.truncate().length() < 1e-5);
        // The origin ends up 3 units down -Z in view space.
        let origin = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin.truncate() - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::new();
        cam.look(0.0, 10_000.0);
        cam.view_mtx();
        assert!(cam.front().y <= (89.0f32.to_radians().sin() + 1e-5));

        let cam = Camera::new().with_pitch(-200.0);
        assert!((cam.pitch + PITCH_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = Camera::new();
        cam.zoom(100.0);
        assert_eq!(cam.fov_y(), MIN_FOV);
        cam.zoom(-100.0);
        assert_eq!(cam.fov_y(), MAX_FOV);
    }

    #[test]
    fn strafing_is_perpendicular_to_front() {
        let mut cam = Camera::new();
        cam.view_mtx();
        let before = cam.pos();
        cam.move_right(2.0);
        let delta = cam.pos() - before;
        assert!(delta.dot(cam.front()).abs() < 1e-5);
        assert!((delta.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn forward_then_backward_returns_home() {
        let mut cam = Camera::new().with_pos(Vec3::splat(1.0));
        cam.view_mtx();
        cam.move_forward(5.0);
        cam.move_backward(5.0);
        assert!((cam.pos() - Vec3::splat(1.0)).length() < 1e-5);
    }
}
