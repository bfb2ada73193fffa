use glam::{Mat4, Vec3};

use super::{Hitbox, MaterialKey, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Menu,
    Sandbox,
    Arena,
    Pause,
    Breakout,
}

impl SceneKind {
    pub fn name(&self) -> &'static str {
        match self {
            SceneKind::Menu => "menu",
            SceneKind::Sandbox => "sandbox",
            SceneKind::Arena => "arena",
            SceneKind::Pause => "pause",
            SceneKind::Breakout => "breakout",
        }
    }

    /// Title cards are drawn straight to the screen.
    pub fn uses_post_processing(&self) -> bool {
        !matches!(self, SceneKind::Menu | SceneKind::Pause)
    }

    pub fn is_gameplay(&self) -> bool {
        matches!(self, SceneKind::Sandbox | SceneKind::Arena | SceneKind::Breakout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn other(&self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }
}

/// Procedural geometry shared by every scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKind {
    /// Unit box spanning [0,1] on every axis, so it draws exactly over its hitbox.
    Block,
    /// Unit square in the XY plane facing +Z.
    Quad,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub transform: Transform,
    pub mesh: MeshKind,
    pub material: MaterialKey,
    pub visible: bool,
    /// Replaces the material's blend mix for this object only.
    pub texture_mix: Option<f32>,
}

impl SceneObject {
    pub fn new(name: &'static str, mesh: MeshKind, material: MaterialKey, transform: Transform) -> Self {
        Self { name, transform, mesh, material, visible: true, texture_mix: None }
    }

    pub fn block(name: &'static str, material: MaterialKey, transform: Transform) -> Self {
        Self::new(name, MeshKind::Block, material, transform)
    }

    pub fn quad(name: &'static str, material: MaterialKey, transform: Transform) -> Self {
        Self::new(name, MeshKind::Quad, material, transform)
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_transform(&self.transform)
    }

    pub fn overlaps(&self, other: &SceneObject) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

/// One draw call worth of data, detached from the scene that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshKind,
    pub material: MaterialKey,
    pub model: Mat4,
    pub normal: Mat4,
    pub texture_mix: Option<f32>,
}

/// Collect visible objects, grouped by material then mesh so consecutive
/// draws share bindings.
pub fn build_draw_list<'a, I>(objects: I) -> Vec<DrawItem>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    let mut items: Vec<DrawItem> = objects
        .into_iter()
        .filter(|o| o.visible)
        .map(|o| DrawItem {
            mesh: o.mesh,
            material: o.material,
            model: o.transform.local_matrix(),
            normal: o.transform.normal_matrix(),
            texture_mix: o.texture_mix,
        })
        .collect();
    items.sort_by_key(|item| (item.material, item.mesh));
    items
}

/// Where the scene camera sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraRig {
    /// Overhead view with screen-up along world -Y.
    pub fn overhead(height: f32) -> Self {
        Self { eye: Vec3::new(0.0, 0.0, height), target: Vec3::ZERO, up: Vec3::NEG_Y }
    }
}

/// A full-screen title card (menu or pause) that can swap to the instructions.
pub struct CardScene {
    pub card: SceneObject,
    pub show_instructions: bool,
}

impl CardScene {
    fn with_material(name: &'static str, material: MaterialKey) -> Self {
        let transform = Transform::at(-14.0, -8.0, 2.0).with_scale(28.0, 16.0, 1.0);
        let mut scene = Self {
            card: SceneObject::quad(name, material, transform),
            show_instructions: false,
        };
        scene.set_instructions(false);
        scene
    }

    pub fn menu() -> Self {
        Self::with_material("menu card", MaterialKey::Menu)
    }

    pub fn pause() -> Self {
        Self::with_material("pause card", MaterialKey::Pause)
    }

    pub fn set_instructions(&mut self, show: bool) {
        self.show_instructions = show;
        self.card.texture_mix = Some(if show { 1.0 } else { 0.0 });
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_skips_hidden_and_groups_by_material() {
        let objects = vec![
            SceneObject::block("b", MaterialKey::Brick, Transform::IDENTITY),
            SceneObject::block("g", MaterialKey::Ground, Transform::IDENTITY),
            SceneObject::block("h", MaterialKey::Ground, Transform::IDENTITY).hidden(),
            SceneObject::quad("g2", MaterialKey::Ground, Transform::IDENTITY),
            SceneObject::block("b2", MaterialKey::Brick, Transform::IDENTITY),
        ];
        let list = build_draw_list(&objects);
        assert_eq!(list.len(), 4);
        let materials: Vec<_> = list.iter().map(|d| d.material).collect();
        assert_eq!(materials, vec![MaterialKey::Ground, MaterialKey::Ground, MaterialKey::Brick, MaterialKey::Brick]);
        assert_eq!(list[0].mesh, MeshKind::Block);
        assert_eq!(list[1].mesh, MeshKind::Quad);
    }

    #[test]
    fn test_card_instructions_toggle_blend_mix() {
        let mut menu = CardScene::menu();
        assert_eq!(menu.card.texture_mix, Some(0.0));
        menu.set_instructions(true);
        assert_eq!(menu.card.texture_mix, Some(1.0));
        let list = build_draw_list(menu.objects());
        assert_eq!(list[0].texture_mix, Some(1.0));
    }

    #[test]
    fn test_only_gameplay_scenes_use_post_processing() {
        assert!(!SceneKind::Menu.uses_post_processing());
        assert!(!SceneKind::Pause.uses_post_processing());
        assert!(SceneKind::Arena.uses_post_processing());
        assert!(SceneKind::Breakout.uses_post_processing());
    }
}
