//! Camera culling capability.
//!
//! The batch only needs one question answered per sprite: is this box worth
//! drawing? Projection math stays in the host; anything that can answer the
//! question implements [`Camera`]. [`ViewRect`] is the plain rectangle
//! version for hosts without a camera abstraction of their own.

use glam::Vec2;

/// Visibility test the batch consults while culling.
///
/// `position` is the sprite's anchor and `size` its extent; implementations
/// decide whether the axis-aligned box spanning `position` to
/// `position + size` intersects the viewport.
pub trait Camera {
    fn aabb_on_screen(&self, position: Vec2, size: Vec2) -> bool;
}

/// Axis-aligned view rectangle in the same space as the sprites it culls.
///
/// Touching counts as visible, so a sprite sitting exactly on the view edge
/// still draws.
#[derive(Clone, Copy, Debug)]
pub struct ViewRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ViewRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// View rectangle from its top-left corner and size.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }
}

impl Camera for ViewRect {
    fn aabb_on_screen(&self, position: Vec2, size: Vec2) -> bool {
        let min = position;
        let max = position + size;
        !(max.x < self.min.x || min.x > self.max.x || max.y < self.min.y || min.y > self.max.y)
    }
}
