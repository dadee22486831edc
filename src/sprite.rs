//! Sprite entity and its draw operation.
//!
//! A sprite is plain data: world placement, atlas frame selection, draw
//! order, and a per-frame screen-space cache the batch refreshes during
//! update. Game logic mutates the input fields between frames; the batch
//! owns the outputs.

use glam::Vec2;

use crate::gfx::{Quad, RenderBackend};
use crate::texture::TextureId;

/// Partial screen-transform update returned by a [`TransformFn`].
///
/// Fields left `None` keep the sprite's previously cached screen-space
/// values; `rotation` is a delta added on top of the sprite's own rotation
/// rather than an absolute angle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScreenTransform {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
}

/// Per-sprite hook that supplies screen-space placement during update.
///
/// When configured, the batch calls it for every sprite every frame instead
/// of deriving the screen position from `position + offset`.
pub type TransformFn = Box<dyn FnMut(&Sprite) -> ScreenTransform>;

/// A single renderable entity owned by a sprite batch.
///
/// `position`, `offset`, `size`, `frame`, `z`, `rotation`, the flip flags
/// and `visible` are inputs mutated by game logic. `on_screen`,
/// `screen_position` and `screen_rotation` are overwritten by every batch
/// update and carry no meaning before the first one.
#[derive(Clone, Debug)]
pub struct Sprite {
    /// World-space anchor.
    pub position: Vec2,
    /// Render extent in world units.
    pub size: Vec2,
    /// Local offset added to `position` when no transform hook supplies the
    /// screen position directly.
    pub offset: Vec2,
    /// Atlas cell size in pixels. Must stay non-zero on both axes; the
    /// draw-time scale divides by it.
    pub frame_size: Vec2,
    /// Atlas cell coordinates; the source viewport starts at
    /// `frame * frame_size`.
    pub frame: Vec2,
    /// Primary draw-order key, ascending.
    pub z: f32,
    /// Rotation in radians, applied about the frame center.
    pub rotation: f32,
    /// Whether game logic wants the sprite considered at all.
    pub visible: bool,
    /// Verdict of the last cull. Written for every sprite, passing or not.
    pub on_screen: bool,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Identity used for batching order; stored verbatim, never validated.
    pub texture: TextureId,
    /// Screen-space anchor cached by the last update.
    pub screen_position: Vec2,
    /// Screen-space rotation cached by the last update.
    pub screen_rotation: f32,
}

impl Sprite {
    /// A fresh sprite for `texture`: visible, at the origin, with a 1x1
    /// atlas frame.
    pub fn new(texture: TextureId) -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            offset: Vec2::ZERO,
            frame_size: Vec2::ONE,
            frame: Vec2::ZERO,
            z: 0.0,
            rotation: 0.0,
            visible: true,
            on_screen: false,
            flip_x: false,
            flip_y: false,
            texture,
            screen_position: Vec2::ZERO,
            screen_rotation: 0.0,
        }
    }

    /// Issue one draw call for this sprite.
    ///
    /// `quad` is the batch's shared scratch region; its viewport is pointed
    /// at this sprite's atlas frame before submission. With `screen_space`
    /// the cached screen transform places the sprite, otherwise raw world
    /// placement (`position + offset`, `rotation`) does.
    pub fn draw(&self, gfx: &mut dyn RenderBackend, quad: &mut Quad, screen_space: bool) {
        let (position, rotation) = if screen_space {
            (self.screen_position, self.screen_rotation)
        } else {
            (self.position + self.offset, self.rotation)
        };

        quad.set_viewport(
            self.frame.x * self.frame_size.x,
            self.frame.y * self.frame_size.y,
            self.frame_size.x,
            self.frame_size.y,
        );

        let flip_x = if self.flip_x { -1.0 } else { 1.0 };
        let flip_y = if self.flip_y { -1.0 } else { 1.0 };
        let scale = Vec2::new(
            flip_x * self.size.x / self.frame_size.x,
            flip_y * self.size.y / self.frame_size.y,
        );
        let origin = self.frame_size * 0.5;

        gfx.draw_quad(self.texture, quad, position, rotation, scale, origin, Vec2::ZERO);
    }
}
