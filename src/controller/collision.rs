use glam::Vec2;

use crate::model::{Hitbox, SceneObject};

/// First obstacle whose hitbox overlaps `subject`.
pub fn first_overlap<'a, I>(subject: &Hitbox, obstacles: I) -> Option<&'a SceneObject>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    obstacles.into_iter().find(|o| subject.overlaps(&o.hitbox()))
}

pub fn overlaps_any<'a, I>(subject: &SceneObject, obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    first_overlap(&subject.hitbox(), obstacles).is_some()
}

/// Unit axis pointing from `obstacle` towards `mover`, along whichever axis
/// the two boxes overlap least.
pub fn contact_normal(mover: &Hitbox, obstacle: &Hitbox) -> Vec2 {
    let depth_x = mover.max().x.min(obstacle.max().x) - mover.origin.x.max(obstacle.origin.x);
    let depth_y = mover.max().y.min(obstacle.max().y) - mover.origin.y.max(obstacle.origin.y);
    let delta = (mover.origin + mover.extent * 0.5) - (obstacle.origin + obstacle.extent * 0.5);

    if depth_x < depth_y {
        Vec2::new(if delta.x >= 0.0 { 1.0 } else { -1.0 }, 0.0)
    } else {
        Vec2::new(0.0, if delta.y >= 0.0 { 1.0 } else { -1.0 })
    }
}

/// Quarter turn (degrees about Z) that points `heading` most along `normal`.
pub fn quarter_turn_away(heading: Vec2, normal: Vec2) -> f32 {
    let left = heading.perp();
    let right = -left;
    if left.dot(normal) >= right.dot(normal) {
        90.0
    } else {
        -90.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaterialKey, Transform};

    #[test]
    fn test_first_overlap_reports_the_wall() {
        let walls = vec![
            SceneObject::block("a", MaterialKey::Fence, Transform::at(10.0, 0.0, 0.0)),
            SceneObject::block("b", MaterialKey::Fence, Transform::at(0.0, 5.0, 0.0)),
        ];
        let player = SceneObject::block("p", MaterialKey::PlayerOne, Transform::at(0.0, 4.5, 0.0));
        let hit = first_overlap(&player.hitbox(), &walls).map(|w| w.name);
        assert_eq!(hit, Some("b"));
        assert!(overlaps_any(&player, &walls));
    }

    #[test]
    fn test_contact_normal_uses_shallowest_axis() {
        let wall = Hitbox::new(Vec2::new(-11.0, -9.0), Vec2::new(1.0, 21.5));
        let ball = Hitbox::new(Vec2::new(-10.1, 3.0), Vec2::new(0.5, 0.5));
        assert_eq!(contact_normal(&ball, &wall), Vec2::X);

        let ceiling = Hitbox::new(Vec2::new(-11.0, 12.5), Vec2::new(21.8, 1.5));
        let ball = Hitbox::new(Vec2::new(2.0, 12.2), Vec2::new(0.5, 0.5));
        assert_eq!(contact_normal(&ball, &ceiling), Vec2::NEG_Y);
    }

    #[test]
    fn test_quarter_turn_sends_heading_away() {
        // heading down-left into a wall on the left
        let heading = Vec2::new(-8.0, -6.0);
        let turn = quarter_turn_away(heading, Vec2::X);
        let rotated = Vec2::from_angle(turn.to_radians()).rotate(heading);
        assert!(rotated.x > 0.0, "got {:?}", rotated);

        // same heading into a floor below
        let turn = quarter_turn_away(heading, Vec2::Y);
        let rotated = Vec2::from_angle(turn.to_radians()).rotate(heading);
        assert!(rotated.y > 0.0, "got {:?}", rotated);
    }
}
