//! Orbit camera for viewing the point cloud.

use glam::{Mat4, Vec3};

/// Closest the camera may zoom to the cloud.
pub const MIN_DISTANCE: f32 = 10.0;
/// Farthest the camera may pull back.
pub const MAX_DISTANCE: f32 = 80.0;

/// Orbit camera: yaw/pitch around a target at a clamped distance.
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl OrbitCamera {
    /// Start slightly elevated, pulled back far enough to frame every shape.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.36,
            distance: 42.0,
            target: Vec3::ZERO,
        }
    }

    /// Apply a mouse-drag delta in screen pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.5, 1.5);
    }

    /// Apply a scroll-wheel zoom delta.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 2.0).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Slow idle rotation, used while the viewer is not dragging.
    pub fn auto_rotate(&mut self, delta: f32) {
        self.yaw += delta * 0.3;
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// World-space right and up vectors, used to billboard the sprites.
    ///
    /// Pitch is clamped short of straight up/down, so the view direction is
    /// never parallel to the Y axis.
    pub fn right_up(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        let mut cam = OrbitCamera::new();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, MIN_DISTANCE);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::new();
        cam.orbit(0.0, 10_000.0);
        assert!(cam.pitch <= 1.5);
        cam.orbit(0.0, -20_000.0);
        assert!(cam.pitch >= -1.5);
    }

    #[test]
    fn test_position_respects_distance() {
        let cam = OrbitCamera::new();
        let pos = cam.position();
        assert!((pos.length() - cam.distance).abs() < 1e-3);
    }

    #[test]
    fn test_billboard_basis_orthonormal() {
        let mut cam = OrbitCamera::new();
        cam.orbit(123.0, -45.0);
        let (right, up) = cam.right_up();
        assert!((right.length() - 1.0).abs() < 1e-4);
        assert!((up.length() - 1.0).abs() < 1e-4);
        assert!(right.dot(up).abs() < 1e-4);
    }
}
