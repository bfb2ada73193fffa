use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Placement of a scene object. Rotation is stored as Euler angles in degrees
/// and composed as Rz * Ry * Rx.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self { position: Vec3::new(x, y, z), ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    pub fn orientation(&self) -> Quat {
        euler_degrees_to_quat(self.rotation)
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.position)
    }

    /// Inverse-transpose of the upper 3x3, padded back to a 4x4 for uniform upload.
    pub fn normal_matrix(&self) -> Mat4 {
        let m = Mat3::from_mat4(self.local_matrix());
        Mat4::from_mat3(m.inverse().transpose())
    }

    /// Translate along the object's own axes.
    pub fn move_local(&mut self, delta: Vec3) {
        self.position += self.orientation() * delta;
    }

    /// Apply a rotation (degrees) in the object's own frame.
    pub fn rotate_local(&mut self, delta_degrees: Vec3) {
        let q = (self.orientation() * euler_degrees_to_quat(delta_degrees)).normalize();
        let (z, y, x) = q.to_euler(EulerRot::ZYX);
        self.rotation = Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees());
    }

    /// Copy position and rotation, keeping this object's own scale.
    pub fn follow(&mut self, other: &Transform) {
        self.position = other.position;
        self.rotation = other.rotation;
    }
}

fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        degrees.z.to_radians(),
        degrees.y.to_radians(),
        degrees.x.to_radians(),
    )
}
