// CONTROLLER: input, game rules and the per-frame update
pub mod input;
pub mod gamepad;
pub mod frame_clock;
pub mod interpolation;
pub mod collision;
pub mod duel;
pub mod breakout;
pub mod sandbox;
pub mod game;
pub mod frame_loop;

pub use input::{GamepadSnapshot, InputMapper, InputState, PlayerBindings, PlayerIntent};
pub use gamepad::GamepadPoller;
pub use frame_clock::{FpsSummary, FrameClock};
pub use interpolation::{catmull_rom, lerp, PingPong, SplinePath};
pub use duel::{DuelEvent, DuelRules};
pub use breakout::{BreakoutEvent, BreakoutRules};
pub use sandbox::SandboxRules;
pub use game::GameState;
pub use frame_loop::{FrameLoop, FramePlan, FrameUniform, ObjectUniform};
