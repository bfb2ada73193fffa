use winit::keyboard::KeyCode;

use super::breakout::{BreakoutEvent, BreakoutRules};
use super::duel::DuelRules;
use super::input::InputState;
use super::sandbox::SandboxRules;
use crate::config::AppConfig;
use crate::model::{
    build_draw_list, ArenaScene, BreakoutScene, CameraRig, CardScene, DrawItem, Outcome, PlayerSlot, SandboxScene,
    SceneKind,
};

/// Owns every scene and decides which one runs this frame.
pub struct GameState {
    scene: SceneKind,
    pub menu: CardScene,
    pub pause: CardScene,
    pub arena: ArenaScene,
    pub breakout: BreakoutScene,
    pub sandbox: SandboxScene,
    duel: DuelRules,
    breakout_rules: BreakoutRules,
    sandbox_rules: SandboxRules,
    overhead: CameraRig,
}

impl GameState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scene: SceneKind::Menu,
            menu: CardScene::menu(),
            pause: CardScene::pause(),
            arena: ArenaScene::new(),
            breakout: BreakoutScene::new(),
            sandbox: SandboxScene::new(),
            duel: DuelRules::new(&config.tuning),
            breakout_rules: BreakoutRules::new(&config.tuning),
            sandbox_rules: SandboxRules::new(&config.tuning),
            overhead: CameraRig::overhead(config.camera_height),
        }
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    /// Scene keys first, then one simulation step of whatever scene is active.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        if let Some(next) = self.scene_input(input) {
            self.switch_to(next);
        }

        match self.scene {
            SceneKind::Arena => {
                if self.arena.winner.is_some() && input.is_key_down(KeyCode::Enter) {
                    tracing::info!("arena restarted");
                    self.arena.reset();
                }
                // DuelRules logs its own events; the title reads the counters
                self.duel.update(&mut self.arena, input, dt);
            }
            SceneKind::Breakout => {
                if self.breakout.outcome.is_some() && input.is_key_down(KeyCode::Enter) {
                    tracing::info!("breakout restarted");
                    self.breakout.reset();
                }
                let events = self.breakout_rules.update(&mut self.breakout, input, dt);
                for event in events {
                    if let BreakoutEvent::Finished(outcome) = event {
                        tracing::info!(?outcome, score = self.breakout.score, "breakout finished");
                    }
                }
            }
            SceneKind::Sandbox => self.sandbox_rules.update(&mut self.sandbox, input, dt),
            SceneKind::Menu | SceneKind::Pause => {}
        }
    }

    /// Held keys are polled every frame, so a key still down after a switch
    /// keeps asking for the same scene.
    fn scene_input(&mut self, input: &InputState) -> Option<SceneKind> {
        let down = |key| input.is_key_down(key);
        match self.scene {
            SceneKind::Menu | SceneKind::Pause => {
                let card = if self.scene == SceneKind::Menu { &mut self.menu } else { &mut self.pause };
                if down(KeyCode::Space) {
                    card.set_instructions(true);
                }
                if down(KeyCode::Backspace) {
                    card.set_instructions(false);
                }

                if down(KeyCode::Enter) {
                    Some(SceneKind::Arena)
                } else if down(KeyCode::Backquote) {
                    Some(SceneKind::Sandbox)
                } else if down(KeyCode::KeyB) {
                    Some(SceneKind::Breakout)
                } else {
                    None
                }
            }
            scene => (scene.is_gameplay() && down(KeyCode::Escape)).then_some(SceneKind::Pause),
        }
    }

    pub fn switch_to(&mut self, next: SceneKind) {
        if next == self.scene {
            return;
        }
        if self.scene == SceneKind::Pause && next == SceneKind::Arena {
            self.pause.set_instructions(false);
        }
        tracing::info!(from = self.scene.name(), to = next.name(), "scene change");
        self.scene = next;
    }

    pub fn draw_list(&self) -> Vec<DrawItem> {
        match self.scene {
            SceneKind::Menu => build_draw_list(self.menu.objects()),
            SceneKind::Pause => build_draw_list(self.pause.objects()),
            SceneKind::Arena => build_draw_list(self.arena.objects()),
            SceneKind::Breakout => build_draw_list(self.breakout.objects()),
            SceneKind::Sandbox => build_draw_list(self.sandbox.objects()),
        }
    }

    pub fn camera_rig(&self) -> CameraRig {
        match self.scene {
            SceneKind::Breakout => BreakoutScene::camera_rig(),
            _ => self.overhead,
        }
    }

    /// Short counters line for the window title.
    pub fn status(&self) -> String {
        match self.scene {
            SceneKind::Menu => "Enter to play, Space for instructions".to_string(),
            SceneKind::Pause => "Paused".to_string(),
            SceneKind::Sandbox => "Sandbox".to_string(),
            SceneKind::Arena => {
                let one = &self.arena.player_one;
                let two = &self.arena.player_two;
                match self.arena.winner {
                    Some(PlayerSlot::One) => "Player one wins! Enter to restart".to_string(),
                    Some(PlayerSlot::Two) => "Player two wins! Enter to restart".to_string(),
                    None => format!(
                        "P1 {}{}  P2 {}{}",
                        one.score,
                        if one.has_ammo { "" } else { " (empty)" },
                        two.score,
                        if two.has_ammo { "" } else { " (empty)" },
                    ),
                }
            }
            SceneKind::Breakout => match self.breakout.outcome {
                Some(Outcome::Won) => format!("You win with {}! Enter to restart", self.breakout.score),
                Some(Outcome::Lost) => "Game over. Enter to restart".to_string(),
                None => format!("Score {}  Lives {}", self.breakout.score, self.breakout.lives),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::new(&AppConfig::default())
    }

    fn step(game: &mut GameState, keys: &[KeyCode]) {
        let mut input = InputState::new();
        for key in keys {
            input.press(*key);
        }
        game.update(&input, 0.016);
    }

    #[test]
    fn test_starts_on_menu_without_post_processing() {
        let g = game();
        assert_eq!(g.scene(), SceneKind::Menu);
        assert!(!g.scene().uses_post_processing());
        assert_eq!(g.draw_list().len(), 1);
    }

    #[test]
    fn test_menu_routes_to_every_scene() {
        for (key, expected) in [
            (KeyCode::Enter, SceneKind::Arena),
            (KeyCode::Backquote, SceneKind::Sandbox),
            (KeyCode::KeyB, SceneKind::Breakout),
        ] {
            let mut g = game();
            step(&mut g, &[key]);
            assert_eq!(g.scene(), expected, "{:?}", key);
        }
    }

    #[test]
    fn test_escape_pauses_and_enter_resumes_arena() {
        let mut g = game();
        step(&mut g, &[KeyCode::KeyB]);
        step(&mut g, &[KeyCode::Escape]);
        assert_eq!(g.scene(), SceneKind::Pause);

        step(&mut g, &[KeyCode::Space]);
        assert!(g.pause.show_instructions);
        step(&mut g, &[KeyCode::Enter]);
        assert_eq!(g.scene(), SceneKind::Arena);
        assert!(!g.pause.show_instructions, "resuming hides the instructions");
    }

    #[test]
    fn test_menu_instructions_toggle() {
        let mut g = game();
        step(&mut g, &[KeyCode::Space]);
        assert_eq!(g.menu.card.texture_mix, Some(1.0));
        step(&mut g, &[KeyCode::Backspace]);
        assert_eq!(g.menu.card.texture_mix, Some(0.0));
        assert_eq!(g.scene(), SceneKind::Menu);
    }

    #[test]
    fn test_enter_restarts_a_finished_match() {
        let mut g = game();
        step(&mut g, &[KeyCode::Enter]);
        g.arena.winner = Some(PlayerSlot::Two);
        g.arena.player_two.score = 3;
        assert!(g.status().contains("Player two wins"));
        step(&mut g, &[KeyCode::Enter]);
        assert_eq!(g.arena.winner, None);
        assert_eq!(g.arena.player_two.score, 0);
    }

    #[test]
    fn test_breakout_uses_its_own_camera() {
        let mut g = game();
        assert_eq!(g.camera_rig().up, glam::Vec3::NEG_Y);
        step(&mut g, &[KeyCode::KeyB]);
        assert_eq!(g.camera_rig(), BreakoutScene::camera_rig());
        assert!(g.status().starts_with("Score 0  Lives 3"));
    }
}
