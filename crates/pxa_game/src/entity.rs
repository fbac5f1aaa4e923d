//! The shared drawable record and the tagged view over everything in a level.

use glam::Vec2;
use pxa_core::geometry::Rect;

use crate::assets::ImageCatalog;
use crate::enemy::Enemy;
use crate::player::Player;

/// A positioned, sized, drawable object. `pos` is the sprite center; the size
/// comes from the image it was created with and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub asset: String,
}

impl Body {
    pub fn new(x: f32, y: f32, asset: &str, catalog: &dyn ImageCatalog) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: catalog.image_size(asset),
            asset: asset.to_string(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().intersects(&other.rect())
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left + self.size.x * 0.5;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.size.x * 0.5;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top + self.size.y * 0.5;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom - self.size.y * 0.5;
    }
}

/// Borrowed view of one level object, tagged by what drives it.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Platform(&'a Body),
    Enemy(&'a Enemy),
    Player(&'a Player),
}

impl<'a> Entity<'a> {
    pub fn body(&self) -> &'a Body {
        match *self {
            Entity::Platform(body) => body,
            Entity::Enemy(enemy) => &enemy.character.body,
            Entity::Player(player) => &player.character.body,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Platform(_) => "platform",
            Entity::Enemy(_) => "enemy",
            Entity::Player(_) => "player",
        }
    }
}
