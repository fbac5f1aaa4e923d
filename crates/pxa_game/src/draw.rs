//! The surface the game draws onto. The core only issues commands; whatever
//! implements [`DrawTarget`] owns pixels, textures and fonts.

use glam::Vec2;
use pxa_core::geometry::Rect;

/// Straight (non-premultiplied) RGBA.
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const YELLOW: Rgba = [255, 255, 0, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

pub trait DrawTarget {
    fn clear(&mut self);

    /// Draw the named image stretched over `rect` (screen space).
    fn draw_sprite(&mut self, asset: &str, rect: Rect);

    /// Draw `text` centered on `center` at `size` pixels tall.
    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Rgba);
}
