use glam::Vec3;

use super::{CameraRig, HitboxBias, MaterialKey, SceneObject, Transform};

/// Hand-tuned reach values for the breakout board. They are asymmetric on
/// purpose and kept as data so they can be reviewed without touching the
/// collision test.
pub mod tuning {
    use super::HitboxBias;

    /// Widens the ball when testing it against the paddle and bricks.
    pub const BALL_VS_TARGET: HitboxBias = HitboxBias::scaled(5.0, 1.0);
    /// Stretches the short side-wall markers up the whole board.
    pub const SIDE_WALL: HitboxBias = HitboxBias::reach(0.0, 20.0);
    /// Stretches the top wall and floor markers across the board.
    pub const TOP_AND_FLOOR: HitboxBias = HitboxBias::reach(20.0, 0.0);
}

/// Local-frame ball velocity, units per second.
pub const BALL_VELOCITY: Vec3 = Vec3::new(-8.0, -6.0, 0.0);
pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// What the ball is currently touching; responses fire only on a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Wall(usize),
    Floor,
    Paddle,
    Brick(usize),
}

pub struct Brick {
    pub object: SceneObject,
    pub norender: bool,
}

/// The obstacle a wall marker stands for, with the bias applied to it.
pub struct WallMarker {
    pub object: SceneObject,
    pub bias: HitboxBias,
}

pub struct BreakoutScene {
    pub ground: SceneObject,
    pub paddle: SceneObject,
    pub ball: SceneObject,
    pub walls: Vec<WallMarker>,
    pub floor: WallMarker,
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub lives: u32,
    pub outcome: Option<Outcome>,
    pub contact: Option<Contact>,
}

impl BreakoutScene {
    pub const PADDLE_START: Vec3 = Vec3::new(0.0, -8.0, 0.0);
    pub const BALL_START: Vec3 = Vec3::new(0.0, -5.0, 0.0);

    pub fn new() -> Self {
        use MaterialKey as M;

        let marker = |name, x, y, sx, sy, bias| WallMarker {
            object: SceneObject::block(name, M::Fence, Transform::at(x, y, 0.0).with_scale(sx, sy, 1.0)),
            bias,
        };

        let walls = vec![
            marker("left wall", -11.0, -9.0, 1.0, 1.5, tuning::SIDE_WALL),
            marker("top wall", -11.0, 12.5, 1.8, 1.5, tuning::TOP_AND_FLOOR),
            marker("right wall", 10.0, -9.0, 1.0, 1.5, tuning::SIDE_WALL),
        ];
        let floor = marker("floor", -11.0, -11.0, 1.8, 1.5, tuning::TOP_AND_FLOOR);

        let brick = |name, x, y| Brick {
            object: SceneObject::block(name, M::Brick, Transform::at(x, y, 0.0).with_scale(1.5, 0.75, 1.0)),
            norender: false,
        };
        let bricks = vec![
            brick("brick 1", -6.0, 9.0),
            brick("brick 2", -2.0, 9.0),
            brick("brick 3", 2.0, 9.0),
            brick("brick 4", 6.0, 9.0),
            brick("brick 5", -4.0, 6.0),
            brick("brick 6", 4.0, 6.0),
        ];

        Self {
            ground: SceneObject::quad(
                "board",
                M::Sandpit,
                Transform::at(-11.0, -11.0, -0.05).with_scale(22.0, 25.0, 1.0),
            ),
            paddle: SceneObject::block(
                "paddle",
                M::Paddle,
                Transform::new(Self::PADDLE_START, Vec3::ZERO, Vec3::new(3.0, 0.5, 1.0)),
            ),
            ball: SceneObject::block(
                "ball",
                M::Ball,
                Transform::new(Self::BALL_START, Vec3::ZERO, Vec3::splat(0.5)),
            ),
            walls,
            floor,
            bricks,
            score: 0,
            lives: STARTING_LIVES,
            outcome: None,
            contact: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Overhead view with +Y up the screen, centred on the board.
    pub fn camera_rig() -> CameraRig {
        CameraRig {
            eye: Vec3::new(0.0, 1.5, 25.0),
            target: Vec3::new(0.0, 1.5, 0.0),
            up: Vec3::Y,
        }
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| !b.norender).count()
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.ground)
            .chain(self.walls.iter().map(|w| &w.object))
            .chain(std::iter::once(&self.floor.object))
            .chain(self.bricks.iter().filter(|b| !b.norender).map(|b| &b.object))
            .chain([&self.paddle, &self.ball])
    }
}

impl Default for BreakoutScene {
    fn default() -> Self {
        Self::new()
    }
}
