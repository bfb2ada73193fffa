use glam::Vec3;

use super::collision::overlaps_any;
use super::input::{InputMapper, InputState, PlayerBindings, PlayerIntent};
use crate::config::PlayerTuning;
use crate::model::{ArenaScene, Duelist, PlayerSlot};

/// Something worth logging or showing that happened during one arena step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelEvent {
    Fired(PlayerSlot),
    Splashed { shooter: PlayerSlot, score: u32 },
    Missed(PlayerSlot),
    Reloaded(PlayerSlot),
    Won(PlayerSlot),
}

/// Movement, shooting and scoring rules for the arena.
pub struct DuelRules {
    pub mapper: InputMapper,
    pub shot_speed: f32,
    pub hits_to_win: u32,
    bindings: [PlayerBindings; 2],
}

impl DuelRules {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            mapper: InputMapper::new(tuning),
            shot_speed: tuning.shot_speed,
            hits_to_win: tuning.hits_to_win,
            bindings: [PlayerBindings::player_one(), PlayerBindings::player_two()],
        }
    }

    /// One frame: read intents, move, resolve shots, then push players out of walls.
    pub fn update(&self, arena: &mut ArenaScene, input: &InputState, dt: f32) -> Vec<DuelEvent> {
        let mut events = Vec::new();
        if arena.winner.is_some() {
            return events;
        }

        let intents = [PlayerSlot::One, PlayerSlot::Two]
            .map(|slot| self.mapper.intent(input, slot, &self.bindings[slot.index()]));

        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            let intent = intents[slot.index()];
            let duelist = arena.duelist_mut(slot);
            self.mapper.apply(&intent, &mut duelist.body.transform, dt);
            if let Some(event) = self.step_shot(duelist, &intent, dt) {
                events.push(event);
            }
        }

        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            events.extend(self.resolve_shot(arena, slot));
        }

        for slot in [PlayerSlot::One, PlayerSlot::Two] {
            self.push_back(arena, slot, &intents[slot.index()], dt);
            if let Some(event) = Self::try_reload(arena, slot) {
                events.push(event);
            }
        }

        for event in &events {
            tracing::debug!(?event, "arena");
        }
        events
    }

    /// Latch the shot on fire, then fly it or keep it at the player's side.
    fn step_shot(&self, duelist: &mut Duelist, intent: &PlayerIntent, dt: f32) -> Option<DuelEvent> {
        let mut fired = None;
        if intent.fire && duelist.has_ammo && !duelist.shot_in_flight {
            duelist.shot_in_flight = true;
            duelist.has_ammo = false;
            duelist.shot.transform.follow(&duelist.body.transform);
            fired = Some(DuelEvent::Fired(duelist.slot));
        }

        if duelist.shot_in_flight {
            duelist.shot.transform.move_local(Vec3::new(0.0, 0.0, self.shot_speed * dt));
        } else {
            duelist.shot.transform.follow(&duelist.body.transform);
        }
        duelist.shot.visible = duelist.shot_in_flight;
        fired
    }

    fn resolve_shot(&self, arena: &mut ArenaScene, shooter: PlayerSlot) -> Option<DuelEvent> {
        let target_body = arena.duelist(shooter.other()).body.clone();
        let walls_hit = overlaps_any(&arena.duelist(shooter).shot, &arena.walls);

        let duelist = arena.duelist_mut(shooter);
        if !duelist.shot_in_flight {
            return None;
        }

        if duelist.shot.overlaps(&target_body) {
            duelist.shot_in_flight = false;
            duelist.shot.visible = false;
            duelist.score += 1;
            let score = duelist.score;
            if score >= self.hits_to_win {
                arena.winner = Some(shooter);
                tracing::info!(?shooter, score, "match won");
                return Some(DuelEvent::Won(shooter));
            }
            return Some(DuelEvent::Splashed { shooter, score });
        }

        if walls_hit {
            duelist.shot_in_flight = false;
            duelist.shot.visible = false;
            return Some(DuelEvent::Missed(shooter));
        }
        None
    }

    fn push_back(&self, arena: &mut ArenaScene, slot: PlayerSlot, intent: &PlayerIntent, dt: f32) {
        let other = arena.duelist(slot.other()).body.clone();
        let blocked = {
            let body = &arena.duelist(slot).body;
            overlaps_any(body, &arena.walls) || body.overlaps(&other)
        };
        if blocked {
            self.mapper.undo_advance(intent, &mut arena.duelist_mut(slot).body.transform, dt);
        }
    }

    fn try_reload(arena: &mut ArenaScene, slot: PlayerSlot) -> Option<DuelEvent> {
        let on_bottle = overlaps_any(&arena.duelist(slot).body, &arena.bottles);
        let duelist = arena.duelist_mut(slot);
        if on_bottle && !duelist.has_ammo && !duelist.shot_in_flight {
            duelist.has_ammo = true;
            return Some(DuelEvent::Reloaded(slot));
        }
        None
    }
}

impl Default for DuelRules {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::GamepadSnapshot;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_idle_shot_follows_player() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        rules.update(&mut arena, &input, 0.1);
        let p = &arena.player_one;
        assert_eq!(p.shot.transform.position, p.body.transform.position);
        assert!(!p.shot.visible);
    }

    #[test]
    fn test_fire_consumes_ammo_and_flies_forward() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        let mut input = InputState::new();
        input.press(KeyCode::KeyE);
        let events = rules.update(&mut arena, &input, 0.1);
        assert!(events.contains(&DuelEvent::Fired(PlayerSlot::One)));
        assert!(arena.player_one.shot_in_flight);
        assert!(!arena.player_one.has_ammo);
        let start_y = arena.player_one.body.transform.position.y;
        assert!(arena.player_one.shot.transform.position.y > start_y, "shot leaves along the facing direction");

        // Holding fire without ammo does not relaunch
        input.release(KeyCode::KeyE);
        for _ in 0..20 {
            rules.update(&mut arena, &input, 0.05);
        }
        assert!(!arena.player_one.shot_in_flight, "shot stops at the bottom fence");
        input.press(KeyCode::KeyE);
        let events = rules.update(&mut arena, &input, 0.05);
        assert!(!events.contains(&DuelEvent::Fired(PlayerSlot::One)));
    }

    #[test]
    fn test_player_is_pushed_back_from_fence() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        // Facing +Y, one step short of the bottom fence at y = 10
        arena.player_one.body.transform.position.y = 8.5;
        let mut input = InputState::new();
        input.press(KeyCode::KeyW);
        rules.update(&mut arena, &input, 0.1);
        assert!((arena.player_one.body.transform.position.y - 8.5).abs() < 1e-4);
    }

    #[test]
    fn test_three_splashes_win() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        // Put player two right in front of player one
        arena.player_two.body.transform.position = Vec3::new(8.0, 8.2, 0.0);
        let mut input = InputState::new();

        for round in 1..=3 {
            arena.player_one.has_ammo = true;
            input.press(KeyCode::KeyE);
            let mut splashed = false;
            for _ in 0..10 {
                let events = rules.update(&mut arena, &input, 0.05);
                if events.iter().any(|e| matches!(e, DuelEvent::Splashed { .. } | DuelEvent::Won(_))) {
                    splashed = true;
                    break;
                }
            }
            input.release(KeyCode::KeyE);
            assert!(splashed, "round {round} should land");
            assert_eq!(arena.player_one.score, round);
        }
        assert_eq!(arena.winner, Some(PlayerSlot::One));

        // Frozen once decided
        let before = arena.player_one.body.transform;
        input.press(KeyCode::KeyW);
        assert!(rules.update(&mut arena, &input, 0.1).is_empty());
        assert_eq!(arena.player_one.body.transform, before);
    }

    #[test]
    fn test_bottle_reloads_empty_gun() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        arena.player_one.has_ammo = false;
        let bottle = arena.bottles[1].transform.position;
        arena.player_one.body.transform.position = bottle;
        let events = rules.update(&mut arena, &InputState::new(), 0.016);
        assert!(events.contains(&DuelEvent::Reloaded(PlayerSlot::One)));
        assert!(arena.player_one.has_ammo);
    }

    #[test]
    fn test_gamepad_player_is_pushed_back_from_fence() {
        let rules = DuelRules::default();
        let mut arena = ArenaScene::new();
        arena.player_one.body.transform.position.y = 8.5;
        let mut input = InputState::new();
        // a connected pad replaces the keyboard, so the held S is ignored
        input.press(KeyCode::KeyS);
        input.set_gamepad(
            PlayerSlot::One,
            Some(GamepadSnapshot { move_axis: 1.0, ..Default::default() }),
        );
        rules.update(&mut arena, &input, 0.1);
        assert!((arena.player_one.body.transform.position.y - 8.5).abs() < 1e-4);

        input.set_gamepad(PlayerSlot::One, Some(GamepadSnapshot { move_axis: -1.0, ..Default::default() }));
        rules.update(&mut arena, &input, 0.1);
        assert!(arena.player_one.body.transform.position.y < 8.5, "backing away from the fence is allowed");
    }
}
