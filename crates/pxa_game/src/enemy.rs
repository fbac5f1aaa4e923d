use crate::assets::ImageCatalog;
use crate::character::{Character, FrameSet};
use crate::config::Tuning;
use crate::entity::Body;

const FRAMES: [&str; 2] = ["enemy_1", "enemy_2"];

/// Walks back and forth between two x-bounds. No gravity, no platforms.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub character: Character,
    pub left_bound: f32,
    pub right_bound: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(
        x: f32,
        y: f32,
        left_bound: f32,
        right_bound: f32,
        tuning: &Tuning,
        catalog: &dyn ImageCatalog,
    ) -> Self {
        let body = Body::new(x, y, FRAMES[0], catalog);
        let mut character = Character::new(
            body,
            FrameSet::new(&FRAMES, &FRAMES),
            tuning.animation_cadence,
            false,
        );
        character.moving = true;
        Self {
            character,
            left_bound: left_bound.min(right_bound),
            right_bound: left_bound.max(right_bound),
            speed: tuning.enemy_speed,
        }
    }

    pub fn body(&self) -> &Body {
        &self.character.body
    }

    /// Replace the patrol speed, keeping the current heading.
    pub fn set_speed(&mut self, magnitude: f32) {
        let magnitude = magnitude.abs();
        self.speed = if self.character.facing_right {
            magnitude
        } else {
            -magnitude
        };
    }

    pub fn update(&mut self, tuning: &Tuning) {
        let x = &mut self.character.body.pos.x;
        *x += self.speed;

        let magnitude = tuning.enemy_speed.abs();
        if *x > self.right_bound {
            self.speed = -magnitude;
            self.character.facing_right = false;
        } else if *x < self.left_bound {
            self.speed = magnitude;
            self.character.facing_right = true;
        }

        self.character.animate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceholderCatalog;

    fn patroller(x: f32, left: f32, right: f32) -> Enemy {
        Enemy::new(x, 420.0, left, right, &Tuning::default(), &PlaceholderCatalog)
    }

    #[test]
    fn stays_within_bounds_plus_one_step() {
        let tuning = Tuning::default();
        let mut enemy = patroller(300.0, 280.0, 320.0);
        for _ in 0..1000 {
            enemy.update(&tuning);
            let x = enemy.body().pos.x;
            assert!(
                x >= 280.0 - tuning.enemy_speed && x <= 320.0 + tuning.enemy_speed,
                "enemy escaped patrol range: x={x}"
            );
        }
    }

    #[test]
    fn flips_after_crossing_right_bound() {
        let tuning = Tuning::default();
        let mut enemy = patroller(318.0, 280.0, 320.0);
        enemy.update(&tuning);
        assert_eq!(enemy.body().pos.x, 320.0);
        assert!(enemy.speed > 0.0, "exactly on the bound is not past it");
        enemy.update(&tuning);
        assert_eq!(enemy.body().pos.x, 322.0);
        assert_eq!(enemy.speed, -2.0);
        enemy.update(&tuning);
        assert_eq!(enemy.body().pos.x, 320.0);
    }

    #[test]
    fn flips_after_crossing_left_bound() {
        let tuning = Tuning::default();
        let mut enemy = patroller(281.0, 280.0, 320.0);
        enemy.speed = -2.0;
        enemy.update(&tuning);
        assert_eq!(enemy.speed, 2.0);
        assert_eq!(enemy.body().pos.x, 279.0);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let enemy = patroller(500.0, 600.0, 400.0);
        assert_eq!(enemy.left_bound, 400.0);
        assert_eq!(enemy.right_bound, 600.0);
    }

    #[test]
    fn never_uses_mirrored_frames() {
        let tuning = Tuning::default();
        let mut enemy = patroller(318.0, 280.0, 320.0);
        for _ in 0..40 {
            enemy.update(&tuning);
            assert!(enemy.body().asset == "enemy_1" || enemy.body().asset == "enemy_2");
        }
        assert!(enemy.character.moving);
    }
}
