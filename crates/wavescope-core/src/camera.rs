//! Per-scene cameras and pointer-driven orbiting.

use glam::{Mat4, Vec3};

use crate::constants::*;
use crate::scene::SceneKind;

/// Right-handed perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Starting view for a scene.
    pub fn for_scene(kind: SceneKind) -> Self {
        let (eye, up, zfar) = match kind {
            // Straight down onto the turntable; Y cannot be up here.
            SceneKind::Bars => (Vec3::from(BARS_CAMERA_EYE), Vec3::NEG_Z, 1000.0),
            SceneKind::Fluid => (Vec3::from(FLUID_CAMERA_EYE), Vec3::Y, 1000.0),
            SceneKind::Ribbons => (Vec3::from(RIBBON_CAMERA_EYE), Vec3::Y, 100.0),
        };
        Self {
            eye,
            target: Vec3::ZERO,
            up,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar,
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Drag-to-orbit with inertia. Drags add angular velocity; every update
/// applies a fraction of it and lets the rest decay.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    yaw_velocity: f32,
    pitch_velocity: f32,
    damping_factor: f32,
    rotate_speed: f32,
    dragging: bool,
    last_pointer: Option<(f32, f32)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            dragging: false,
            last_pointer: None,
        }
    }
}

impl OrbitControls {
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last_pointer = Some((x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        if let Some((px, py)) = self.last_pointer {
            self.yaw_velocity -= (x - px) * self.rotate_speed;
            self.pitch_velocity -= (y - py) * self.rotate_speed;
        }
        self.last_pointer = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn stop(&mut self) {
        self.yaw_velocity = 0.0;
        self.pitch_velocity = 0.0;
        self.pointer_up();
    }

    /// Rotate the camera eye around its target by the damped velocity.
    pub fn update(&mut self, camera: &mut Camera) {
        let d = self.damping_factor;
        let yaw = self.yaw_velocity * d;
        let pitch = self.pitch_velocity * d;
        self.yaw_velocity *= 1.0 - d;
        self.pitch_velocity *= 1.0 - d;
        if yaw == 0.0 && pitch == 0.0 {
            return;
        }

        let offset = camera.eye - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        // Spherical coordinates around the camera's up axis.
        let up = camera.up.normalize();
        let height = offset.dot(up);
        let planar = offset - up * height;
        let mut polar = (height / radius).clamp(-1.0, 1.0).acos();
        let reference = if planar.length_squared() > 1e-8 {
            planar.normalize()
        } else {
            up.any_orthonormal_vector()
        };
        let side = up.cross(reference);

        polar = (polar + pitch).clamp(1e-3, std::f32::consts::PI - 1e-3);
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let dir = reference * cos_yaw + side * sin_yaw;
        camera.eye = camera.target + (up * polar.cos() + dir * polar.sin()) * radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_follow_scene() {
        assert_eq!(Camera::for_scene(SceneKind::Fluid).eye, Vec3::new(0.0, 50.0, 50.0));
        assert_eq!(Camera::for_scene(SceneKind::Ribbons).zfar, 100.0);
        let bars = Camera::for_scene(SceneKind::Bars);
        assert!(bars.view_matrix().is_finite());
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut camera = Camera::for_scene(SceneKind::Fluid);
        let before = camera.eye.distance(camera.target);
        let mut orbit = OrbitControls::default();
        orbit.pointer_down(0.0, 0.0);
        orbit.pointer_move(40.0, 10.0);
        orbit.pointer_up();
        let start = camera.eye;
        for _ in 0..30 {
            orbit.update(&mut camera);
        }
        assert!((camera.eye.distance(camera.target) - before).abs() < 1e-3);
        assert!(camera.eye.distance(start) > 0.01);
    }

    #[test]
    fn velocity_decays_after_release() {
        let mut camera = Camera::for_scene(SceneKind::Ribbons);
        let mut orbit = OrbitControls::default();
        orbit.pointer_down(0.0, 0.0);
        orbit.pointer_move(100.0, 0.0);
        orbit.pointer_up();
        for _ in 0..2000 {
            orbit.update(&mut camera);
        }
        let settled = camera.eye;
        orbit.update(&mut camera);
        assert!(camera.eye.distance(settled) < 1e-5);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut camera = Camera::for_scene(SceneKind::Fluid);
        let start = camera.eye;
        let mut orbit = OrbitControls::default();
        orbit.pointer_move(50.0, 50.0);
        orbit.update(&mut camera);
        assert_eq!(camera.eye, start);
    }
}
