// MODEL: scene data, placement and collision shapes
pub mod transform;
pub mod hitbox;
pub mod material;
pub mod camera;
pub mod scene;
pub mod arena;
pub mod breakout;
pub mod sandbox;

pub use transform::Transform;
pub use hitbox::{aabb_overlap, aabb_overlap_biased, Hitbox, HitboxBias};
pub use material::{Material, MaterialKey, MaterialLibrary, TextureKey};
pub use camera::Camera;
pub use scene::{build_draw_list, CameraRig, CardScene, DrawItem, MeshKind, PlayerSlot, SceneKind, SceneObject};
pub use arena::{ArenaScene, Duelist};
pub use breakout::{BreakoutScene, Brick, Contact, Outcome, WallMarker};
pub use sandbox::{Route, SandboxScene};
