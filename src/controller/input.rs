//! Keyboard and gamepad state, and the mapping from it to player movement.
use std::collections::HashSet;

use glam::Vec3;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::PlayerTuning;
use crate::model::{PlayerSlot, Transform};

/// Pad state sampled once per frame. `move_axis` is positive when the stick is
/// pushed forward, `turn_axis` is positive to the right.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadSnapshot {
    pub move_axis: f32,
    pub turn_axis: f32,
    pub fire: bool,
}

pub struct InputState {
    keys_held: HashSet<KeyCode>,
    keys_held_last_frame: HashSet<KeyCode>,
    gamepads: [Option<GamepadSnapshot>; 2],
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_held_last_frame: HashSet::new(),
            gamepads: [None; 2],
        }
    }

    /// Returns true when the event was keyboard or focus input.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { state, physical_key: PhysicalKey::Code(code), .. },
                ..
            } => {
                match state {
                    ElementState::Pressed => self.press(*code),
                    ElementState::Released => self.release(*code),
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.clear_keys();
                true
            }
            _ => false,
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys_held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key) && !self.keys_held_last_frame.contains(&key)
    }

    pub fn set_gamepad(&mut self, slot: PlayerSlot, pad: Option<GamepadSnapshot>) {
        self.gamepads[slot.index()] = pad;
    }

    pub fn gamepad(&self, slot: PlayerSlot) -> Option<GamepadSnapshot> {
        self.gamepads[slot.index()]
    }

    pub fn clear_keys(&mut self) {
        self.keys_held.clear();
    }

    /// Call after the frame's update so the next frame can see fresh presses.
    pub fn end_frame(&mut self) {
        self.keys_held_last_frame.clone_from(&self.keys_held);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys driving one player.
#[derive(Debug, Clone, Copy)]
pub struct PlayerBindings {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub fire: KeyCode,
}

impl PlayerBindings {
    pub fn player_one() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            turn_left: KeyCode::KeyA,
            turn_right: KeyCode::KeyD,
            fire: KeyCode::KeyE,
        }
    }

    pub fn player_two() -> Self {
        Self {
            forward: KeyCode::KeyI,
            backward: KeyCode::KeyK,
            turn_left: KeyCode::KeyJ,
            turn_right: KeyCode::KeyL,
            fire: KeyCode::KeyO,
        }
    }

    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Self::player_one(),
            PlayerSlot::Two => Self::player_two(),
        }
    }
}

/// What a player asked for this frame. `advance` and `turn` are -1, 0 or 1
/// (both directions held cancel out); positive turn is counter-clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    pub advance: f32,
    pub turn: f32,
    pub fire: bool,
}

/// Turns held keys or a pad into movement deltas.
#[derive(Debug, Clone, Copy)]
pub struct InputMapper {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub dead_zone: f32,
}

impl InputMapper {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            turn_speed: tuning.turn_speed,
            dead_zone: tuning.dead_zone,
        }
    }

    /// A connected pad wins outright over the keyboard for this frame.
    pub fn intent(&self, input: &InputState, slot: PlayerSlot, bindings: &PlayerBindings) -> PlayerIntent {
        match input.gamepad(slot) {
            Some(pad) => self.gamepad_intent(&pad),
            None => Self::keyboard_intent(input, bindings),
        }
    }

    pub fn keyboard_intent(input: &InputState, bindings: &PlayerBindings) -> PlayerIntent {
        let axis = |positive: KeyCode, negative: KeyCode| {
            let mut value = 0.0;
            if input.is_key_down(positive) {
                value += 1.0;
            }
            if input.is_key_down(negative) {
                value -= 1.0;
            }
            value
        };

        PlayerIntent {
            advance: axis(bindings.forward, bindings.backward),
            turn: axis(bindings.turn_left, bindings.turn_right),
            fire: input.is_key_down(bindings.fire),
        }
    }

    pub fn gamepad_intent(&self, pad: &GamepadSnapshot) -> PlayerIntent {
        PlayerIntent {
            advance: self.digital(pad.move_axis),
            turn: -self.digital(pad.turn_axis),
            fire: pad.fire,
        }
    }

    fn digital(&self, value: f32) -> f32 {
        if value >= self.dead_zone {
            1.0
        } else if value <= -self.dead_zone {
            -1.0
        } else {
            0.0
        }
    }

    /// Turn around local Y, then move along local Z, scaled by `dt`.
    pub fn apply(&self, intent: &PlayerIntent, transform: &mut Transform, dt: f32) {
        if intent.turn != 0.0 {
            transform.rotate_local(Vec3::new(0.0, intent.turn * self.turn_speed * dt, 0.0));
        }
        if intent.advance != 0.0 {
            transform.move_local(Vec3::new(0.0, 0.0, intent.advance * self.move_speed * dt));
        }
    }

    /// Reverse the translation `apply` made this frame.
    pub fn undo_advance(&self, intent: &PlayerIntent, transform: &mut Transform, dt: f32) {
        if intent.advance != 0.0 {
            transform.move_local(Vec3::new(0.0, 0.0, -intent.advance * self.move_speed * dt));
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_moves_player_forward() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        let mapper = InputMapper::default();
        let intent = mapper.intent(&input, PlayerSlot::One, &PlayerBindings::player_one());
        assert_eq!(intent, PlayerIntent { advance: 1.0, turn: 0.0, fire: false });

        let mut t = Transform::at(8.0, 6.0, 0.0).with_rotation(90.0, 0.0, 180.0);
        mapper.apply(&intent, &mut t, 0.5);
        assert!((t.position.y - 10.0).abs() < 1e-4, "8 units/s for half a second: {:?}", t.position);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyI);
        input.press(KeyCode::KeyK);
        input.press(KeyCode::KeyJ);
        let intent = InputMapper::keyboard_intent(&input, &PlayerBindings::player_two());
        assert_eq!(intent.advance, 0.0);
        assert_eq!(intent.turn, 1.0);
    }

    #[test]
    fn test_players_do_not_share_keys() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::KeyE);
        let two = InputMapper::keyboard_intent(&input, &PlayerBindings::player_two());
        assert_eq!(two, PlayerIntent::default());
    }

    #[test]
    fn test_gamepad_takes_priority_over_keyboard() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::KeyE);
        input.set_gamepad(PlayerSlot::One, Some(GamepadSnapshot::default()));
        let mapper = InputMapper::default();
        let intent = mapper.intent(&input, PlayerSlot::One, &PlayerBindings::player_one());
        assert_eq!(intent, PlayerIntent::default(), "keyboard must be ignored while a pad is present");

        input.set_gamepad(PlayerSlot::One, None);
        let intent = mapper.intent(&input, PlayerSlot::One, &PlayerBindings::player_one());
        assert_eq!(intent.advance, 1.0);
        assert!(intent.fire);
    }

    #[test]
    fn test_gamepad_dead_zone() {
        let mapper = InputMapper::default();
        let soft = mapper.gamepad_intent(&GamepadSnapshot { move_axis: 0.19, turn_axis: -0.1, fire: false });
        assert_eq!(soft, PlayerIntent::default());

        let hard = mapper.gamepad_intent(&GamepadSnapshot { move_axis: -0.2, turn_axis: -0.9, fire: true });
        assert_eq!(hard.advance, -1.0);
        assert_eq!(hard.turn, 1.0, "stick left turns counter-clockwise");
        assert!(hard.fire);
    }

    #[test]
    fn test_undo_advance_restores_position_only() {
        let mapper = InputMapper::default();
        let intent = PlayerIntent { advance: 1.0, turn: 1.0, fire: false };
        let start = Transform::at(0.0, 0.0, 0.0).with_rotation(90.0, 0.0, 180.0);
        let mut t = start;
        mapper.apply(&intent, &mut t, 0.1);
        mapper.undo_advance(&intent, &mut t, 0.1);
        assert!(t.rotation != start.rotation, "the turn is kept");
        assert!((t.position - start.position).length() < 1e-4, "got {:?}", t.position);
    }

    #[test]
    fn test_just_pressed_lasts_one_frame() {
        let mut input = InputState::new();
        input.press(KeyCode::BracketRight);
        assert!(input.is_key_just_pressed(KeyCode::BracketRight));
        input.end_frame();
        assert!(!input.is_key_just_pressed(KeyCode::BracketRight));
        assert!(input.is_key_down(KeyCode::BracketRight));
    }
}
