//! 2D sprite batching and culling layer.
//!
//! Owns a flat list of renderable sprites, resolves their screen-space
//! transforms once per frame, culls them against a camera viewport, sorts
//! the visible set by depth then texture so shared textures draw
//! back-to-back, and issues one draw call per sprite through an abstract
//! render backend. Update and draw register as two prioritized tasks in a
//! host frame scheduler.
//!
//! Submodules overview:
//! - [`sprite`] – the sprite entity, its defaults, and the per-sprite draw operation
//! - [`texture`] – opaque texture handles and first-seen ordering ranks
//! - [`batch`] – the sprite system: update pipeline, draw pass, scheduler binding
//! - [`camera`] – culling capability and a plain view-rectangle implementation
//! - [`gfx`] – render backend seam: quad viewport, color, shader handles
//! - [`scheduler`] – host frame-scheduler seam: phases, tasks, frame context
//! - [`overlay`] – debug overlay seam for live watch strings

pub mod batch;
pub mod camera;
pub mod gfx;
pub mod overlay;
pub mod scheduler;
pub mod sprite;
pub mod texture;
