//! Render backend seam.
//!
//! The batch never talks to a graphics API directly; it drives the
//! [`RenderBackend`] trait the host implements on top of whatever renderer
//! it uses. The only shared state is a [`Quad`] atlas region the batch owns
//! and reconfigures per sprite.

use glam::Vec2;

use crate::texture::TextureId;

/// Opaque handle identifying a shader program owned by the host's renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white, the neutral tint for textured draws.
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Rectangular sub-region of a texture atlas, in atlas pixel space.
///
/// The batch owns a single quad and points it at a different atlas frame
/// for every sprite it submits; it never carries state across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Quad {
    /// Point the quad at a different atlas sub-region.
    pub fn set_viewport(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
    }
}

/// Draw primitive implemented by the host's graphics layer.
///
/// `draw_quad` rasterizes the quad's sub-region of `texture` at `position`,
/// rotated by `rotation` radians about `origin` (in frame pixels), scaled
/// per axis (negative scale mirrors), with `shear` skew factors. Failures
/// such as a destroyed texture are the implementation's to surface; the
/// batch performs no validation before submitting.
pub trait RenderBackend {
    /// Set the tint applied to subsequent draws.
    fn set_color(&mut self, color: Color);

    /// Bind a shader for subsequent draws, or `None` for the default
    /// pipeline.
    fn set_shader(&mut self, shader: Option<ShaderId>);

    /// Submit one textured quad.
    fn draw_quad(
        &mut self,
        texture: TextureId,
        quad: &Quad,
        position: Vec2,
        rotation: f32,
        scale: Vec2,
        origin: Vec2,
        shear: Vec2,
    );
}
