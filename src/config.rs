use glam::Vec3;

use crate::view::post::BloomSettings;

/// Compiled-in settings. Nothing here is read from disk or the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub clear_color: [f64; 3],
    /// Longest frame step handed to the simulation, in seconds.
    pub max_frame_delta: f32,
    pub camera_height: f32,
    pub camera_fov_y_degrees: f32,
    pub light: LightConfig,
    pub bloom: BloomSettings,
    pub tuning: PlayerTuning,
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    pub position: Vec3,
    pub color: Vec3,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
    pub specular_strength: f32,
    pub linear_falloff: f32,
    pub quadratic_falloff: f32,
}

/// Gameplay speeds and rules.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    pub move_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
    pub shot_speed: f32,
    pub dead_zone: f32,
    pub hits_to_win: u32,
    pub paddle_speed: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "Birthday Splash Bash".to_string(),
                width: 1280,
                height: 720,
            },
            clear_color: [0.08, 0.17, 0.31],
            max_frame_delta: 1.0,
            camera_height: 17.0,
            camera_fov_y_degrees: 60.0,
            light: LightConfig::default(),
            bloom: BloomSettings::default(),
            tuning: PlayerTuning::default(),
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 12.0),
            color: Vec3::ONE,
            ambient_color: Vec3::ONE,
            ambient_strength: 0.35,
            specular_strength: 1.0,
            linear_falloff: 0.02,
            quadratic_falloff: 0.002,
        }
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 8.0,
            turn_speed: 225.0,
            shot_speed: 10.0,
            dead_zone: 0.2,
            hits_to_win: 3,
            paddle_speed: 9.0,
        }
    }
}
