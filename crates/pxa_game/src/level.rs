//! The hardcoded level and the per-step simulation over it.

use crate::assets::ImageCatalog;
use crate::config::Tuning;
use crate::enemy::Enemy;
use crate::entity::{Body, Entity};
use crate::player::{Controls, Player, PLAYER_SPAWN};

const PLATFORM_ASSET: &str = "block";

const PLATFORMS: [(f32, f32); 6] = [
    (400.0, 580.0),
    (100.0, 580.0),
    (700.0, 580.0),
    (300.0, 450.0),
    (500.0, 350.0),
    (100.0, 250.0),
];

const FLOOR_Y: f32 = 580.0;
const FLOOR_STEP: usize = 50;
const FLOOR_END: usize = 850;

/// (x, y, left bound, right bound)
const ENEMIES: [(f32, f32, f32, f32); 2] = [
    (300.0, 420.0, 280.0, 320.0),
    (500.0, 550.0, 400.0, 600.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStep {
    pub alive: bool,
    pub jumped: bool,
    /// Index of the first enemy the player touched this step.
    pub hit_enemy: Option<usize>,
}

impl WorldStep {
    pub fn player_died(&self) -> bool {
        !self.alive || self.hit_enemy.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub platforms: Vec<Body>,
    pub enemies: Vec<Enemy>,
    pub player: Player,
}

pub fn build_world(tuning: &Tuning, catalog: &dyn ImageCatalog) -> World {
    let mut platforms: Vec<Body> = PLATFORMS
        .iter()
        .map(|&(x, y)| Body::new(x, y, PLATFORM_ASSET, catalog))
        .collect();
    platforms.extend(
        (0..FLOOR_END)
            .step_by(FLOOR_STEP)
            .map(|x| Body::new(x as f32, FLOOR_Y, PLATFORM_ASSET, catalog)),
    );

    let enemies = ENEMIES
        .iter()
        .map(|&(x, y, left, right)| Enemy::new(x, y, left, right, tuning, catalog))
        .collect();

    World {
        platforms,
        enemies,
        player: Player::new(PLAYER_SPAWN, tuning, catalog),
    }
}

impl World {
    pub fn step(&mut self, controls: Controls, tuning: &Tuning) -> WorldStep {
        let player_step = self.player.update(controls, &self.platforms, tuning);

        let mut hit_enemy = None;
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.update(tuning);
            if hit_enemy.is_none() && self.player.body().overlaps(enemy.body()) {
                hit_enemy = Some(index);
            }
        }

        WorldStep {
            alive: player_step.alive,
            jumped: player_step.jumped,
            hit_enemy,
        }
    }

    /// Everything in draw order: platforms, enemies, then the player.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.platforms
            .iter()
            .map(Entity::Platform)
            .chain(self.enemies.iter().map(Entity::Enemy))
            .chain(std::iter::once(Entity::Player(&self.player)))
    }

    /// Push tuning changes that live inside entities rather than being read
    /// every step.
    pub fn apply_tuning(&mut self, tuning: &Tuning) {
        self.player.character.set_cadence(tuning.animation_cadence);
        for enemy in &mut self.enemies {
            enemy.character.set_cadence(tuning.animation_cadence);
            enemy.set_speed(tuning.enemy_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PlaceholderCatalog;
    use glam::Vec2;

    fn world() -> World {
        build_world(&Tuning::default(), &PlaceholderCatalog)
    }

    #[test]
    fn layout_matches_the_shipped_level() {
        let world = world();
        assert_eq!(world.platforms.len(), 6 + 17);
        assert_eq!(world.enemies.len(), 2);
        assert_eq!(world.player.body().pos, PLAYER_SPAWN);
        assert_eq!(world.platforms[0].pos, Vec2::new(400.0, 580.0));
        assert_eq!(world.platforms.last().map(|b| b.pos.x), Some(800.0));
        assert_eq!(world.enemies[1].left_bound, 400.0);
        assert_eq!(world.enemies[1].right_bound, 600.0);
    }

    #[test]
    fn entities_follow_draw_order() {
        let world = world();
        let kinds: Vec<&str> = world.entities().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), world.platforms.len() + world.enemies.len() + 1);
        assert!(kinds[..world.platforms.len()].iter().all(|k| *k == "platform"));
        assert_eq!(kinds[world.platforms.len()], "enemy");
        assert_eq!(kinds.last(), Some(&"player"));
    }

    #[test]
    fn idle_player_settles_without_dying() {
        let mut world = world();
        let tuning = Tuning::default();
        for _ in 0..120 {
            let step = world.step(Controls::default(), &tuning);
            assert!(!step.player_died(), "player died while standing still");
        }
        assert!(world.player.on_ground);
        assert_eq!(world.player.vy, 0.0);
        assert_eq!(world.player.body().rect().bottom(), 555.0);
    }

    #[test]
    fn touching_an_enemy_is_reported() {
        let mut world = world();
        let tuning = Tuning::default();
        let target = world.enemies[1].body().pos;
        world.player.body_mut().pos = target;
        let step = world.step(Controls::default(), &tuning);
        assert_eq!(step.hit_enemy, Some(1));
        assert!(step.player_died());
    }

    #[test]
    fn apply_tuning_keeps_patrol_direction() {
        let mut world = world();
        let tuning = Tuning::default();
        // Walk the first enemy past its right bound so it turns around.
        while world.enemies[0].speed > 0.0 {
            world.enemies[0].update(&tuning);
        }
        let faster = Tuning {
            enemy_speed: 3.0,
            animation_cadence: 4,
            ..Tuning::default()
        };
        world.apply_tuning(&faster);
        assert_eq!(world.enemies[0].speed, -3.0);
        assert_eq!(world.enemies[1].speed, 3.0);
    }

    #[test]
    fn direction_survives_reload_through_zero_speed() {
        let mut world = world();
        let tuning = Tuning::default();
        while world.enemies[0].speed > 0.0 {
            world.enemies[0].update(&tuning);
        }

        let stopped = Tuning {
            enemy_speed: 0.0,
            ..Tuning::default()
        };
        world.apply_tuning(&stopped);
        assert_eq!(world.enemies[0].speed, 0.0);
        assert_eq!(world.enemies[1].speed, 0.0);

        world.apply_tuning(&tuning);
        assert_eq!(world.enemies[0].speed, -tuning.enemy_speed);
        assert_eq!(world.enemies[1].speed, tuning.enemy_speed);
        assert!(!world.enemies[0].character.facing_right);
    }
}
