use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};

use super::input::{GamepadSnapshot, InputState};
use crate::model::PlayerSlot;

/// Polls connected pads and hands the first two to player one and two.
pub struct GamepadPoller {
    gilrs: Option<Gilrs>,
}

impl GamepadPoller {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(gilrs::Error::NotImplemented(dummy)) => {
                tracing::warn!("gamepads are not supported on this platform, keyboard only");
                Some(dummy)
            }
            Err(e) => {
                tracing::warn!("gamepad backend unavailable ({e}), keyboard only");
                None
            }
        };
        Self { gilrs }
    }

    /// Drain pending pad events and write this frame's snapshots into `input`.
    pub fn poll(&mut self, input: &mut InputState) {
        let Some(gilrs) = self.gilrs.as_mut() else {
            input.set_gamepad(PlayerSlot::One, None);
            input.set_gamepad(PlayerSlot::Two, None);
            return;
        };

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => tracing::info!(?id, "gamepad connected"),
                EventType::Disconnected => tracing::info!(?id, "gamepad disconnected"),
                _ => {}
            }
        }

        let connected: Vec<GamepadId> = gilrs
            .gamepads()
            .filter(|(_, pad)| pad.is_connected())
            .map(|(id, _)| id)
            .take(2)
            .collect();

        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            let snapshot = connected.get(slot.index()).map(|&id| {
                let pad = gilrs.gamepad(id);
                GamepadSnapshot {
                    move_axis: pad.value(Axis::LeftStickY),
                    turn_axis: pad.value(Axis::RightStickX),
                    fire: pad.is_pressed(Button::South),
                }
            });
            input.set_gamepad(slot, snapshot);
        }
    }
}

impl Default for GamepadPoller {
    fn default() -> Self {
        Self::new()
    }
}
