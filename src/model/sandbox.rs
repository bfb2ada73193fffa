use glam::Vec3;

use super::{MaterialKey, SceneObject, Transform};

/// A closed loop of waypoints and how fast to travel it (segments per second).
#[derive(Debug, Clone)]
pub struct Route {
    pub waypoints: Vec<Vec3>,
    pub speed: f32,
}

/// Playground test scene: two free-roaming characters, some equipment to bump
/// into, balloons drifting on spline loops and a bottle bobbing back and forth.
pub struct SandboxScene {
    pub ground: SceneObject,
    pub characters: [SceneObject; 2],
    pub props: Vec<SceneObject>,
    pub red_balloon: SceneObject,
    pub yellow_balloon: SceneObject,
    pub floater: SceneObject,
}

impl SandboxScene {
    pub const BALLOON_SPEED: f32 = 2.0;
    pub const FLOAT_FROM: Vec3 = Vec3::new(-6.0, -7.0, 1.0);
    pub const FLOAT_TO: Vec3 = Vec3::new(6.0, -7.0, 1.0);
    pub const FLOAT_PERIOD: f32 = 1.0;

    pub fn new() -> Self {
        use MaterialKey as M;

        let standing = |x, y| Transform::at(x, y, 0.0).with_rotation(90.0, 0.0, 180.0);
        let prop = |name, material, x, y, sx, sy| SceneObject::block(name, material, Transform::at(x, y, 0.0).with_scale(sx, sy, 1.5));

        Self {
            ground: SceneObject::quad(
                "ground",
                M::Ground,
                Transform::at(-15.0, -10.0, -0.05).with_scale(30.0, 20.0, 1.0),
            ),
            characters: [
                SceneObject::block("dunce", M::PlayerOne, standing(0.0, 0.0)),
                SceneObject::block("duncet", M::PlayerTwo, standing(2.0, 0.0)),
            ],
            props: vec![
                prop("slide", M::Playground, 0.0, 5.0, 1.0, 3.0),
                prop("swing", M::Playground, -5.0, 0.0, 2.0, 1.0),
                prop("table", M::Table, 5.0, 0.0, 1.5, 1.5),
            ],
            red_balloon: SceneObject::block(
                "red balloon",
                M::RedBalloon,
                Transform::at(2.5, -10.0, 3.0).with_scale(0.5, 0.5, 0.5),
            ),
            yellow_balloon: SceneObject::block(
                "yellow balloon",
                M::YellowBalloon,
                Transform::at(-2.5, -10.0, 3.0).with_scale(0.5, 0.5, 0.5),
            ),
            floater: SceneObject::block(
                "floating bottle",
                M::Bottle,
                Transform::new(Self::FLOAT_FROM, Vec3::ZERO, Vec3::new(0.5, 0.5, 1.0)),
            ),
        }
    }

    pub fn red_route() -> Route {
        Route {
            waypoints: vec![
                Vec3::new(-2.5, -10.0, 3.0),
                Vec3::new(2.5, -10.0, 3.0),
                Vec3::new(2.5, -5.0, 3.0),
                Vec3::new(-2.5, -5.0, 3.0),
            ],
            speed: Self::BALLOON_SPEED,
        }
    }

    pub fn yellow_route() -> Route {
        Route {
            waypoints: vec![
                Vec3::new(2.5, -10.0, 3.0),
                Vec3::new(-2.5, -10.0, 3.0),
                Vec3::new(-2.5, -5.0, 3.0),
                Vec3::new(2.5, -5.0, 3.0),
            ],
            speed: Self::BALLOON_SPEED,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.ground)
            .chain(self.characters.iter())
            .chain(self.props.iter())
            .chain([&self.red_balloon, &self.yellow_balloon, &self.floater])
    }
}

impl Default for SandboxScene {
    fn default() -> Self {
        Self::new()
    }
}
