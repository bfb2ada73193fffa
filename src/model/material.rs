use std::collections::HashMap;
use std::rc::Rc;

/// Procedurally generated textures; the view layer turns each key into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    White,
    Black,
    SpecularFull,
    SpecularSoft,
    Grass,
    Sand,
    Wood,
    Metal,
    Water,
    Brick,
    Yellow,
    Pink,
    Red,
    TitleCard,
    InstructionsCard,
    PauseCard,
}

impl TextureKey {
    pub const ALL: [TextureKey; 16] = [
        TextureKey::White,
        TextureKey::Black,
        TextureKey::SpecularFull,
        TextureKey::SpecularSoft,
        TextureKey::Grass,
        TextureKey::Sand,
        TextureKey::Wood,
        TextureKey::Metal,
        TextureKey::Water,
        TextureKey::Brick,
        TextureKey::Yellow,
        TextureKey::Pink,
        TextureKey::Red,
        TextureKey::TitleCard,
        TextureKey::InstructionsCard,
        TextureKey::PauseCard,
    ];
}

/// Two color textures blended by `texture_mix`, a specular map and shininess.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub albedo: TextureKey,
    pub albedo2: TextureKey,
    pub specular: TextureKey,
    pub shininess: f32,
    pub texture_mix: f32,
}

impl Material {
    pub fn new(albedo: TextureKey, specular: TextureKey, shininess: f32) -> Self {
        Self { albedo, albedo2: albedo, specular, shininess, texture_mix: 0.0 }
    }

    pub fn blended(albedo: TextureKey, albedo2: TextureKey, specular: TextureKey, shininess: f32, texture_mix: f32) -> Self {
        Self { albedo, albedo2, specular, shininess, texture_mix }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialKey {
    Ground,
    Sandpit,
    PlayerOne,
    PlayerTwo,
    WaterShot,
    Bottle,
    Fence,
    Playground,
    Table,
    Bench,
    RedBalloon,
    YellowBalloon,
    Menu,
    Pause,
    Paddle,
    Ball,
    Brick,
}

/// Shared, immutable materials looked up by key.
pub struct MaterialLibrary {
    materials: HashMap<MaterialKey, Rc<Material>>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        use MaterialKey as M;
        use TextureKey as T;

        let entries = [
            (M::Ground, Material::new(T::Grass, T::SpecularSoft, 4.0)),
            (M::Sandpit, Material::new(T::Sand, T::Black, 2.0)),
            (M::PlayerOne, Material::new(T::Yellow, T::SpecularFull, 16.0)),
            (M::PlayerTwo, Material::new(T::Pink, T::SpecularFull, 16.0)),
            (M::WaterShot, Material::new(T::Water, T::SpecularFull, 64.0)),
            (M::Bottle, Material::blended(T::Water, T::White, T::SpecularFull, 32.0, 0.3)),
            (M::Fence, Material::new(T::Wood, T::Black, 4.0)),
            (M::Playground, Material::new(T::Metal, T::SpecularFull, 32.0)),
            (M::Table, Material::new(T::Wood, T::SpecularSoft, 8.0)),
            (M::Bench, Material::blended(T::Wood, T::Metal, T::SpecularSoft, 8.0, 0.5)),
            (M::RedBalloon, Material::new(T::Red, T::SpecularFull, 64.0)),
            (M::YellowBalloon, Material::new(T::Yellow, T::SpecularFull, 64.0)),
            (M::Menu, Material::blended(T::TitleCard, T::InstructionsCard, T::Black, 1.0, 0.0)),
            (M::Pause, Material::blended(T::PauseCard, T::InstructionsCard, T::Black, 1.0, 0.0)),
            (M::Paddle, Material::new(T::Yellow, T::SpecularFull, 16.0)),
            (M::Ball, Material::new(T::Water, T::SpecularFull, 64.0)),
            (M::Brick, Material::new(T::Brick, T::SpecularSoft, 8.0)),
        ];

        Self {
            materials: entries.into_iter().map(|(key, m)| (key, Rc::new(m))).collect(),
        }
    }

    pub fn get(&self, key: MaterialKey) -> Option<Rc<Material>> {
        self.materials.get(&key).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MaterialKey, &Rc<Material>)> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_material() {
        let lib = MaterialLibrary::new();
        for key in [MaterialKey::Ground, MaterialKey::Menu, MaterialKey::Brick, MaterialKey::WaterShot] {
            assert!(lib.get(key).is_some(), "missing {:?}", key);
        }
        assert_eq!(lib.len(), 17);
    }

    #[test]
    fn test_materials_are_shared() {
        let lib = MaterialLibrary::new();
        let a = lib.get(MaterialKey::Ball).unwrap();
        let b = lib.get(MaterialKey::Ball).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }
}
