use super::{MaterialKey, PlayerSlot, SceneObject, Transform};

/// One contestant: their body, their water shot and their counters.
pub struct Duelist {
    pub slot: PlayerSlot,
    pub body: SceneObject,
    pub shot: SceneObject,
    pub shot_in_flight: bool,
    pub has_ammo: bool,
    pub score: u32,
}

impl Duelist {
    fn new(slot: PlayerSlot, name: &'static str, material: MaterialKey, x: f32, y: f32) -> Self {
        let body = SceneObject::block(
            name,
            material,
            Transform::at(x, y, 0.0).with_rotation(90.0, 0.0, 180.0),
        );
        let mut shot_transform = Transform::IDENTITY.with_scale(0.5, 0.5, 0.5);
        shot_transform.follow(&body.transform);
        let shot = SceneObject::block("water shot", MaterialKey::WaterShot, shot_transform).hidden();

        Self { slot, body, shot, shot_in_flight: false, has_ammo: true, score: 0 }
    }
}

/// The playground duel: fences around the edge, equipment as cover, bottles to refill.
pub struct ArenaScene {
    pub ground: SceneObject,
    pub walls: Vec<SceneObject>,
    pub bottles: Vec<SceneObject>,
    pub player_one: Duelist,
    pub player_two: Duelist,
    pub winner: Option<PlayerSlot>,
}

impl ArenaScene {
    pub fn new() -> Self {
        use MaterialKey as M;

        let wall = |name, material, x, y, sx, sy| SceneObject::block(name, material, Transform::at(x, y, 0.0).with_scale(sx, sy, 1.0));

        let walls = vec![
            wall("top fence", M::Fence, -15.0, -10.0, 30.0, 1.0),
            wall("bottom fence", M::Fence, -15.0, 10.0, 30.0, 1.0),
            wall("left fence", M::Fence, -14.0, -10.0, 1.0, 20.0),
            wall("right fence", M::Fence, 14.0, -10.0, 1.0, 20.0),
            wall("roundabout", M::Playground, 2.0, 2.0, 1.0, 1.0),
            wall("slide", M::Playground, 2.0, -2.0, 1.0, 1.0),
            wall("monkey bars east", M::Playground, -1.0, -2.5, 1.0, 1.0),
            wall("monkey bars west", M::Playground, -3.0, -2.5, 1.0, 1.0),
            wall("swing", M::Playground, -2.0, 1.0, 1.0, 1.0),
            wall("table north", M::Table, 9.0, -2.0, 1.0, 1.0),
            wall("table south", M::Table, 9.0, 2.0, 1.0, 1.0),
            wall("table west", M::Table, -9.0, 0.0, 1.0, 1.0),
            wall("bench south east", M::Bench, 2.0, 7.0, 1.0, 1.0),
            wall("bench north east", M::Bench, 2.0, -6.0, 1.0, 1.0),
            wall("bench south west", M::Bench, -2.0, 7.0, 1.0, 1.0),
            wall("bench north west", M::Bench, -2.5, -6.0, 1.0, 1.0),
        ];

        let bottle = |x, y| SceneObject::block("water bottle", M::Bottle, Transform::at(x, y, 0.0).with_scale(0.5, 0.5, 1.0));
        let bottles = vec![
            bottle(-5.0, -7.5),
            bottle(5.0, -7.5),
            bottle(-11.5, 4.0),
            bottle(11.5, 4.0),
        ];

        let ground = SceneObject::quad(
            "ground",
            M::Ground,
            Transform::at(-15.0, -10.0, -0.05).with_scale(30.0, 21.0, 1.0),
        );

        Self {
            ground,
            walls,
            bottles,
            player_one: Duelist::new(PlayerSlot::One, "player one", M::PlayerOne, 8.0, 6.0),
            player_two: Duelist::new(PlayerSlot::Two, "player two", M::PlayerTwo, -8.0, 6.0),
            winner: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn duelist(&self, slot: PlayerSlot) -> &Duelist {
        match slot {
            PlayerSlot::One => &self.player_one,
            PlayerSlot::Two => &self.player_two,
        }
    }

    pub fn duelist_mut(&mut self, slot: PlayerSlot) -> &mut Duelist {
        match slot {
            PlayerSlot::One => &mut self.player_one,
            PlayerSlot::Two => &mut self.player_two,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.ground)
            .chain(self.walls.iter())
            .chain(self.bottles.iter())
            .chain([
                &self.player_one.body,
                &self.player_one.shot,
                &self.player_two.body,
                &self.player_two.shot,
            ])
    }
}

impl Default for ArenaScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_start_clear_of_walls_and_pads() {
        let arena = ArenaScene::new();
        for duelist in [&arena.player_one, &arena.player_two] {
            for wall in &arena.walls {
                assert!(!duelist.body.overlaps(wall), "{} starts inside {}", duelist.body.name, wall.name);
            }
            assert!(duelist.has_ammo);
            assert!(!duelist.shot.visible);
        }
        assert!(!arena.player_one.body.overlaps(&arena.player_two.body));
    }

    #[test]
    fn test_bottles_sit_in_open_ground() {
        let arena = ArenaScene::new();
        for bottle in &arena.bottles {
            for wall in &arena.walls {
                assert!(!bottle.overlaps(wall), "bottle at {:?} touches {}", bottle.transform.position, wall.name);
            }
        }
    }
}
