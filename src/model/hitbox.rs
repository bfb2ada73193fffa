use glam::Vec2;
use super::Transform;

/// Per-axis reach adjustment for one side of a collision test.
///
/// The effective extent on each axis is `extent * extent_scale + extent_offset`.
/// `NONE` leaves the box untouched and keeps the test symmetric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxBias {
    pub extent_scale: Vec2,
    pub extent_offset: Vec2,
}

impl Default for HitboxBias {
    fn default() -> Self {
        Self::NONE
    }
}

impl HitboxBias {
    pub const NONE: Self = Self { extent_scale: Vec2::ONE, extent_offset: Vec2::ZERO };

    pub const fn scaled(x: f32, y: f32) -> Self {
        Self { extent_scale: Vec2::new(x, y), extent_offset: Vec2::ZERO }
    }

    pub const fn reach(x: f32, y: f32) -> Self {
        Self { extent_scale: Vec2::ONE, extent_offset: Vec2::new(x, y) }
    }
}

/// Axis-aligned rectangle in the ground (x, y) plane: `origin` is the min
/// corner and `extent` is added to it. Depth is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub origin: Vec2,
    pub extent: Vec2,
}

impl Hitbox {
    pub fn new(origin: Vec2, extent: Vec2) -> Self {
        Self { origin, extent }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            origin: transform.position.truncate(),
            extent: transform.scale.truncate(),
        }
    }

    pub fn biased(self, bias: HitboxBias) -> Self {
        Self {
            origin: self.origin,
            extent: self.extent * bias.extent_scale + bias.extent_offset,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.extent
    }

    /// Inclusive overlap on both axes: touching edges count as a hit.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let overlap_x = self.max().x >= other.origin.x && other.max().x >= self.origin.x;
        let overlap_y = self.max().y >= other.origin.y && other.max().y >= self.origin.y;
        overlap_x && overlap_y
    }
}

/// Unbiased overlap of two transforms' implicit hitboxes.
pub fn aabb_overlap(a: &Transform, b: &Transform) -> bool {
    Hitbox::from_transform(a).overlaps(&Hitbox::from_transform(b))
}

/// Overlap test with an independent bias on each side.
pub fn aabb_overlap_biased(a: &Transform, a_bias: HitboxBias, b: &Transform, b_bias: HitboxBias) -> bool {
    Hitbox::from_transform(a)
        .biased(a_bias)
        .overlaps(&Hitbox::from_transform(b).biased(b_bias))
}
