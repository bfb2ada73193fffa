use super::collision::overlaps_any;
use super::input::{InputMapper, InputState, PlayerBindings};
use super::interpolation::{PingPong, SplinePath};
use crate::config::PlayerTuning;
use crate::model::{PlayerSlot, Route, SandboxScene};

/// Free roaming plus the scripted balloon and bottle motion.
pub struct SandboxRules {
    mapper: InputMapper,
    bindings: [PlayerBindings; 2],
    red_path: SplinePath,
    yellow_path: SplinePath,
    floater: PingPong,
}

impl SandboxRules {
    pub fn new(tuning: &PlayerTuning) -> Self {
        let path = |route: Route| SplinePath::new(route.waypoints, route.speed, true);
        Self {
            mapper: InputMapper::new(tuning),
            bindings: [PlayerBindings::player_one(), PlayerBindings::player_two()],
            red_path: path(SandboxScene::red_route()),
            yellow_path: path(SandboxScene::yellow_route()),
            floater: PingPong::new(SandboxScene::FLOAT_FROM, SandboxScene::FLOAT_TO, SandboxScene::FLOAT_PERIOD),
        }
    }

    pub fn update(&mut self, sandbox: &mut SandboxScene, input: &InputState, dt: f32) {
        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            let intent = self.mapper.intent(input, slot, &self.bindings[slot.index()]);
            let i = slot.index();
            self.mapper.apply(&intent, &mut sandbox.characters[i].transform, dt);

            let other = &sandbox.characters[slot.other().index()];
            let me = &sandbox.characters[i];
            if overlaps_any(me, &sandbox.props) || me.overlaps(other) {
                self.mapper.undo_advance(&intent, &mut sandbox.characters[i].transform, dt);
            }
        }

        sandbox.red_balloon.transform.position = self.red_path.advance(dt);
        sandbox.yellow_balloon.transform.position = self.yellow_path.advance(dt);
        sandbox.floater.transform.position = self.floater.advance(dt);
    }
}

impl Default for SandboxRules {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::GamepadSnapshot;
    use glam::Vec3;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_balloons_travel_their_loops() {
        let mut rules = SandboxRules::default();
        let mut sandbox = SandboxScene::new();
        // half a segment at two segments per second
        rules.update(&mut sandbox, &InputState::new(), 0.25);
        let red = sandbox.red_balloon.transform.position;
        assert!(red.x > -2.5 && red.x < 2.5, "between the first two waypoints: {:?}", red);
        assert_eq!(red.z, 3.0);

        // a full lap brings both back to their first waypoint
        rules.update(&mut sandbox, &InputState::new(), 1.75);
        let red = sandbox.red_balloon.transform.position;
        let yellow = sandbox.yellow_balloon.transform.position;
        assert!((red - Vec3::new(-2.5, -10.0, 3.0)).length() < 1e-4, "{:?}", red);
        assert!((yellow - Vec3::new(2.5, -10.0, 3.0)).length() < 1e-4, "{:?}", yellow);
    }

    #[test]
    fn test_floater_bounces_between_ends() {
        let mut rules = SandboxRules::default();
        let mut sandbox = SandboxScene::new();
        rules.update(&mut sandbox, &InputState::new(), 0.5);
        assert_eq!(sandbox.floater.transform.position, Vec3::new(0.0, -7.0, 1.0));
        rules.update(&mut sandbox, &InputState::new(), 0.5);
        assert_eq!(sandbox.floater.transform.position, SandboxScene::FLOAT_TO);
    }

    #[test]
    fn test_character_is_stopped_by_the_slide() {
        let mut rules = SandboxRules::default();
        let mut sandbox = SandboxScene::new();
        // dunce faces +Y; the slide starts at y = 5
        sandbox.characters[0].transform.position.y = 3.5;
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        rules.update(&mut sandbox, &input, 0.1);
        assert!((sandbox.characters[0].transform.position.y - 3.5).abs() < 1e-4);

        // open ground lets the other character walk
        let mut input = InputState::new();
        input.press(KeyCode::KeyK);
        let before = sandbox.characters[1].transform.position;
        rules.update(&mut sandbox, &input, 0.1);
        assert!(sandbox.characters[1].transform.position.y < before.y);
    }

    #[test]
    fn test_gamepad_character_is_stopped_by_the_slide() {
        let mut rules = SandboxRules::default();
        let mut sandbox = SandboxScene::new();
        sandbox.characters[0].transform.position.y = 3.5;
        let mut input = InputState::new();
        input.set_gamepad(
            PlayerSlot::One,
            Some(GamepadSnapshot { move_axis: 0.8, ..Default::default() }),
        );
        rules.update(&mut sandbox, &input, 0.1);
        assert!((sandbox.characters[0].transform.position.y - 3.5).abs() < 1e-4);

        // inside the dead zone nothing moves at all
        input.set_gamepad(PlayerSlot::One, Some(GamepadSnapshot { move_axis: 0.1, ..Default::default() }));
        sandbox.characters[0].transform.position.y = 0.0;
        rules.update(&mut sandbox, &input, 0.1);
        assert_eq!(sandbox.characters[0].transform.position.y, 0.0);
    }
}
