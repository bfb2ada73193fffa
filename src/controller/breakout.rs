use winit::keyboard::KeyCode;

use super::collision::{contact_normal, quarter_turn_away};
use super::input::InputState;
use crate::config::PlayerTuning;
use crate::model::breakout::{tuning, BALL_VELOCITY};
use glam::Vec3;

use crate::model::{aabb_overlap_biased, BreakoutScene, Contact, Hitbox, HitboxBias, Outcome, Transform, WallMarker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakoutEvent {
    Bounced(Contact),
    BrickCleared { index: usize, score: u32 },
    LifeLost { lives: u32 },
    Finished(Outcome),
}

/// Paddle control, ball flight and the score/lives counters.
pub struct BreakoutRules {
    pub paddle_speed: f32,
    pub paddle_min_x: f32,
    pub paddle_max_x: f32,
}

impl BreakoutRules {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self { paddle_speed: tuning.paddle_speed, paddle_min_x: -10.0, paddle_max_x: 7.0 }
    }

    pub fn update(&self, board: &mut BreakoutScene, input: &InputState, dt: f32) -> Vec<BreakoutEvent> {
        let mut events = Vec::new();
        if board.outcome.is_some() {
            return events;
        }

        self.move_paddle(board, input, dt);
        board.ball.transform.move_local(BALL_VELOCITY * dt);

        let touching = Self::find_contact(board);
        if touching != board.contact {
            if let Some(contact) = touching {
                Self::respond(board, contact, &mut events);
            }
        }
        // a floor reset moves the ball away, so nothing is touched any more
        board.contact = if events.iter().any(|e| matches!(e, BreakoutEvent::LifeLost { .. })) {
            None
        } else {
            touching
        };

        for event in &events {
            tracing::debug!(?event, "breakout");
        }
        events
    }

    fn move_paddle(&self, board: &mut BreakoutScene, input: &InputState, dt: f32) {
        let mut direction = 0.0;
        if input.is_key_down(KeyCode::KeyA) || input.is_key_down(KeyCode::ArrowLeft) {
            direction -= 1.0;
        }
        if input.is_key_down(KeyCode::KeyD) || input.is_key_down(KeyCode::ArrowRight) {
            direction += 1.0;
        }
        let paddle = &mut board.paddle.transform.position;
        paddle.x = (paddle.x + direction * self.paddle_speed * dt).clamp(self.paddle_min_x, self.paddle_max_x);
    }

    fn find_contact(board: &BreakoutScene) -> Option<Contact> {
        let ball = &board.ball.transform;
        let hits_marker = |marker: &WallMarker| {
            aabb_overlap_biased(&marker.object.transform, marker.bias, ball, HitboxBias::NONE)
        };
        let hits_target = |target: &Transform| {
            aabb_overlap_biased(target, HitboxBias::NONE, ball, tuning::BALL_VS_TARGET)
        };

        if hits_marker(&board.floor) {
            return Some(Contact::Floor);
        }
        if let Some(i) = board.walls.iter().position(|w| hits_marker(w)) {
            return Some(Contact::Wall(i));
        }
        if hits_target(&board.paddle.transform) {
            return Some(Contact::Paddle);
        }
        board
            .bricks
            .iter()
            .position(|b| !b.norender && hits_target(&b.object.transform))
            .map(Contact::Brick)
    }

    fn respond(board: &mut BreakoutScene, contact: Contact, events: &mut Vec<BreakoutEvent>) {
        match contact {
            Contact::Floor => {
                board.lives = board.lives.saturating_sub(1);
                board.ball.transform.position = BreakoutScene::BALL_START;
                board.ball.transform.rotation = Vec3::ZERO;
                board.paddle.transform.position = BreakoutScene::PADDLE_START;
                events.push(BreakoutEvent::LifeLost { lives: board.lives });
                if board.lives == 0 {
                    board.outcome = Some(Outcome::Lost);
                    events.push(BreakoutEvent::Finished(Outcome::Lost));
                }
            }
            Contact::Wall(i) => {
                let obstacle = marker_box(&board.walls[i].object.transform, board.walls[i].bias);
                bounce(board, &board.ball.hitbox(), &obstacle);
                events.push(BreakoutEvent::Bounced(contact));
            }
            Contact::Paddle => {
                let wide_ball = board.ball.hitbox().biased(tuning::BALL_VS_TARGET);
                bounce(board, &wide_ball, &board.paddle.hitbox());
                events.push(BreakoutEvent::Bounced(contact));
            }
            Contact::Brick(i) => {
                let wide_ball = board.ball.hitbox().biased(tuning::BALL_VS_TARGET);
                let obstacle = board.bricks[i].object.hitbox();
                bounce(board, &wide_ball, &obstacle);

                let brick = &mut board.bricks[i];
                brick.norender = true;
                brick.object.visible = false;
                brick.object.transform.position.y += 100.0;
                board.score += 1;
                events.push(BreakoutEvent::BrickCleared { index: i, score: board.score });

                if board.bricks_left() == 0 {
                    board.outcome = Some(Outcome::Won);
                    events.push(BreakoutEvent::Finished(Outcome::Won));
                }
            }
        }
    }
}

impl Default for BreakoutRules {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}

fn marker_box(transform: &Transform, bias: HitboxBias) -> Hitbox {
    Hitbox::from_transform(transform).biased(bias)
}

/// Quarter-turn the ball so it heads away from `obstacle`.
fn bounce(board: &mut BreakoutScene, ball: &Hitbox, obstacle: &Hitbox) {
    let normal = contact_normal(ball, obstacle);
    let heading = (board.ball.transform.orientation() * BALL_VELOCITY).truncate();
    let turn = quarter_turn_away(heading, normal);
    board.ball.transform.rotate_local(Vec3::new(0.0, 0.0, turn));
}
