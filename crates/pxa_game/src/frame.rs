use glam::Vec2;
use pxa_core::geometry::Rect;
use pxa_overlay::TextLabel;
use pxa_render::{QuadSpec, SpriteBatch};

use pxa_game::assets::AssetStore;
use pxa_game::draw::{DrawTarget, Rgba};

/// Texture key for images that have no file on disk. A 1x1 white texel,
/// tinted per sprite.
pub const WHITE_TEXTURE: &str = "__white";

/// Collects one frame of draw commands: sprites into the GPU batch, text into
/// labels for the overlay.
pub struct SceneFrame<'a> {
    assets: &'a AssetStore,
    batch: &'a mut SpriteBatch,
    labels: &'a mut Vec<TextLabel>,
}

impl<'a> SceneFrame<'a> {
    pub fn new(
        assets: &'a AssetStore,
        batch: &'a mut SpriteBatch,
        labels: &'a mut Vec<TextLabel>,
    ) -> Self {
        Self {
            assets,
            batch,
            labels,
        }
    }
}

impl DrawTarget for SceneFrame<'_> {
    fn clear(&mut self) {
        self.batch.clear();
        self.labels.clear();
    }

    fn draw_sprite(&mut self, asset: &str, rect: Rect) {
        let texture_key = if self.assets.has_image(asset) {
            asset
        } else {
            WHITE_TEXTURE
        };
        self.batch.add_quad(QuadSpec {
            texture_key,
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
            color: self.assets.tint_for(asset),
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Rgba) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            center: (center.x, center.y),
            size,
            color,
        });
    }
}
