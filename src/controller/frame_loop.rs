use winit::event::WindowEvent;
use winit::keyboard::KeyCode;

use super::frame_clock::{FpsSummary, FrameClock};
use super::game::GameState;
use super::gamepad::GamepadPoller;
use super::input::InputState;
use crate::config::{AppConfig, LightConfig};
use crate::model::{Camera, DrawItem, Material};
use crate::view::post::{BloomSettings, DOWNSCALE_STEP, THRESHOLD_STEP};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
    pub falloff: [f32; 4],
}

impl FrameUniform {
    pub fn new(camera: &Camera, light: &LightConfig) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            light_pos: light.position.extend(1.0).to_array(),
            light_color: light.color.extend(light.specular_strength).to_array(),
            ambient: light.ambient_color.extend(light.ambient_strength).to_array(),
            falloff: [light.linear_falloff, light.quadratic_falloff, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    /// x shininess, y texture mix
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn new(item: &DrawItem, material: &Material) -> Self {
        Self {
            model: item.model.to_cols_array_2d(),
            normal: item.normal.to_cols_array_2d(),
            params: [material.shininess, item.texture_mix.unwrap_or(material.texture_mix), 0.0, 0.0],
        }
    }
}

/// Everything the renderer needs for one frame.
pub struct FramePlan {
    pub frame: FrameUniform,
    pub draw_list: Vec<DrawItem>,
    pub post_processing: bool,
    pub bloom: BloomSettings,
}

/// Runtime bloom keys. Returns true when a setting changed.
pub fn adjust_bloom(input: &InputState, bloom: &mut BloomSettings) -> bool {
    let before = *bloom;
    if input.is_key_just_pressed(KeyCode::BracketRight) {
        bloom.adjust_passes(1);
    }
    if input.is_key_just_pressed(KeyCode::BracketLeft) {
        bloom.adjust_passes(-1);
    }
    if input.is_key_just_pressed(KeyCode::Equal) {
        bloom.adjust_threshold(THRESHOLD_STEP);
    }
    if input.is_key_just_pressed(KeyCode::Minus) {
        bloom.adjust_threshold(-THRESHOLD_STEP);
    }
    if input.is_key_just_pressed(KeyCode::Period) {
        bloom.adjust_downscale(DOWNSCALE_STEP);
    }
    if input.is_key_just_pressed(KeyCode::Comma) {
        bloom.adjust_downscale(-DOWNSCALE_STEP);
    }
    if input.is_key_just_pressed(KeyCode::KeyP) {
        bloom.toggle();
    }
    *bloom != before
}

/// Per-frame update: clock, input, game state, then the data to draw.
pub struct FrameLoop {
    pub clock: FrameClock,
    pub input: InputState,
    pub game: GameState,
    pub bloom: BloomSettings,
    pub camera: Camera,
    light: LightConfig,
    gamepads: GamepadPoller,
}

impl FrameLoop {
    pub fn new(config: &AppConfig, width: u32, height: u32) -> Self {
        Self {
            clock: FrameClock::new(config.max_frame_delta),
            input: InputState::new(),
            game: GameState::new(config),
            bloom: config.bloom,
            camera: Camera::top_down(config.camera_height, config.camera_fov_y_degrees, width, height),
            light: config.light,
            gamepads: GamepadPoller::new(),
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.input.handle_window_event(event)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect(width, height);
    }

    pub fn step(&mut self) -> FramePlan {
        let dt = self.clock.tick();
        self.report_frame_times();
        self.gamepads.poll(&mut self.input);

        if adjust_bloom(&self.input, &mut self.bloom) {
            let b = &self.bloom;
            tracing::info!(enabled = b.enabled, passes = b.passes, threshold = b.threshold, downscale = b.downscale, "bloom settings");
        }
        self.game.update(&self.input, dt);
        self.input.end_frame();

        let rig = self.game.camera_rig();
        self.camera.eye = rig.eye;
        self.camera.up = rig.up;
        self.camera.set_look_at(rig.target);

        FramePlan {
            frame: FrameUniform::new(&self.camera, &self.light),
            draw_list: self.game.draw_list(),
            post_processing: self.game.scene().uses_post_processing(),
            bloom: self.bloom,
        }
    }

    /// Logs the recent frame-rate spread once per second.
    fn report_frame_times(&self) -> Option<FpsSummary> {
        if !self.clock.fps_refreshed() {
            return None;
        }
        let summary = self.clock.fps_summary()?;
        tracing::debug!(
            elapsed = self.clock.elapsed_seconds(),
            fps = self.clock.fps(),
            min = summary.min,
            max = summary.max,
            avg = summary.average,
            "frame times"
        );
        Some(summary)
    }

    /// Window title with the current counters and frame rate.
    pub fn title(&self, base: &str) -> String {
        format!("{base} | {} | {:.0} fps", self.game.status(), self.clock.fps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_fit_shader_layout() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 144);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 144);
        assert!(std::mem::size_of::<ObjectUniform>() as u64 <= crate::view::render::OBJECT_STRIDE);
    }

    #[test]
    fn test_bloom_keys_step_once_per_press() {
        let mut bloom = BloomSettings::default();
        let mut input = InputState::new();
        input.press(KeyCode::BracketRight);
        input.press(KeyCode::Equal);
        assert!(adjust_bloom(&input, &mut bloom));
        assert_eq!(bloom.passes, 1);
        assert!((bloom.threshold - 0.06).abs() < 1e-6);

        // held, not pressed again
        input.end_frame();
        assert!(!adjust_bloom(&input, &mut bloom));
        assert_eq!(bloom.passes, 1);
    }

    #[test]
    fn test_toggle_and_downscale_keys() {
        let mut bloom = BloomSettings::default();
        let mut input = InputState::new();
        input.press(KeyCode::KeyP);
        input.press(KeyCode::Comma);
        adjust_bloom(&input, &mut bloom);
        assert!(!bloom.enabled);
        assert_eq!(bloom.downscale, 1.5);
    }

    #[test]
    fn test_object_uniform_prefers_item_mix() {
        let material = Material::blended(
            crate::model::TextureKey::TitleCard,
            crate::model::TextureKey::InstructionsCard,
            crate::model::TextureKey::Black,
            1.0,
            0.0,
        );
        let item = DrawItem {
            mesh: crate::model::MeshKind::Quad,
            material: crate::model::MaterialKey::Menu,
            model: glam::Mat4::IDENTITY,
            normal: glam::Mat4::IDENTITY,
            texture_mix: Some(1.0),
        };
        assert_eq!(ObjectUniform::new(&item, &material).params[1], 1.0);
        let plain = DrawItem { texture_mix: None, ..item };
        assert_eq!(ObjectUniform::new(&plain, &material).params[1], 0.0);
    }

    #[test]
    fn test_frame_times_reported_on_fps_refresh_only() {
        let mut frame_loop = FrameLoop::new(&AppConfig::default(), 800, 600);
        let mut reports = Vec::new();
        for _ in 0..70 {
            frame_loop.clock.advance(std::time::Duration::from_millis(16));
            if let Some(summary) = frame_loop.report_frame_times() {
                reports.push(summary);
            }
        }
        assert_eq!(reports.len(), 1);
        assert!((reports[0].average - 62.5).abs() < 0.5, "got {:?}", reports[0]);
    }
}
