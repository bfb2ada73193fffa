use glam::{Mat4, Vec3};

/// Fixed scene camera. The arena is viewed from above, looking down -Z with
/// screen-up along world -Y.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 17.0),
            target: Vec3::ZERO,
            up: Vec3::NEG_Y,
            fov_y: 60f32.to_radians(),
            aspect: aspect_of(width, height),
            z_near: 0.01,
            z_far: 1000.0,
        }
    }

    /// Overhead camera at `height` above the origin.
    pub fn top_down(height: f32, fov_y_degrees: f32, width: u32, height_px: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, height),
            fov_y: fov_y_degrees.to_radians(),
            ..Self::new(width, height_px)
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = aspect_of(width, height);
    }

    pub fn set_look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

fn aspect_of(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_screen_center() {
        let cam = Camera::new(1280, 720);
        let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "origin must be inside the depth range");
    }

    #[test]
    fn test_zero_height_window_keeps_finite_aspect() {
        let mut cam = Camera::new(800, 600);
        cam.set_aspect(800, 0);
        assert!(cam.aspect.is_finite());
    }
}
