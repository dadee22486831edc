//! The sprite system: per-frame update pipeline and draw pass.
//!
//! [`SpriteBatch`] owns a flat sprite list. Once per frame its update task
//! resolves screen transforms, culls against the active camera, sorts the
//! survivors by depth then texture rank, and refreshes the counters; the
//! draw task then walks the sorted render list issuing one quad per sprite
//! through the host's [`RenderBackend`].

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::camera::Camera;
use crate::gfx::{Color, Quad, RenderBackend, ShaderId};
use crate::overlay::DebugOverlay;
use crate::scheduler::{FrameScheduler, Phase};
use crate::sprite::{Sprite, TransformFn};
use crate::texture::{TextureId, TextureOrderRegistry};

slotmap::new_key_type! {
    /// Handle to a sprite owned by a [`SpriteBatch`].
    ///
    /// Keys are generational: after the sprite is removed the key goes
    /// permanently stale and accessors return `None` instead of aliasing a
    /// later sprite.
    pub struct SpriteKey;
}

/// Where the culling camera comes from.
#[derive(Clone, Default)]
pub enum CameraSource {
    /// Never cull; visibility alone decides the render list.
    #[default]
    Disabled,
    /// Use whatever default camera the host scheduler exposes each frame.
    HostDefault,
    /// Always cull with this camera, regardless of the host.
    Fixed(Rc<dyn Camera>),
}

/// Construction-time options for a [`SpriteBatch`].
pub struct BatchConfig {
    /// Optional hook supplying screen-space placement per sprite. Without
    /// one, screen position is `position + offset` and screen rotation is
    /// the sprite's own rotation, copied every frame.
    pub transform: Option<TransformFn>,
    /// Culling camera selection.
    pub camera: CameraSource,
    /// Cull using the resolved screen transform rather than raw position.
    pub cull_in_screen_space: bool,
    /// Draw using the resolved screen transform rather than raw position.
    pub draw_in_screen_space: bool,
    /// Shader bound for the whole draw pass, or `None` for the default
    /// pipeline.
    pub shader: Option<ShaderId>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            transform: None,
            camera: CameraSource::default(),
            cull_in_screen_space: true,
            draw_in_screen_space: true,
            shader: None,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the screen-transform hook.
    pub fn with_transform(mut self, transform: TransformFn) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Builder: set the culling camera source.
    pub fn with_camera(mut self, camera: CameraSource) -> Self {
        self.camera = camera;
        self
    }

    /// Builder: choose the space the cull test runs in.
    pub fn with_cull_in_screen_space(mut self, on: bool) -> Self {
        self.cull_in_screen_space = on;
        self
    }

    /// Builder: choose the space the draw pass places sprites in.
    pub fn with_draw_in_screen_space(mut self, on: bool) -> Self {
        self.draw_in_screen_space = on;
        self
    }

    /// Builder: bind `shader` for the draw pass.
    pub fn with_shader(mut self, shader: ShaderId) -> Self {
        self.shader = Some(shader);
        self
    }
}

/// Per-frame counters, refreshed at the end of every update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Sprites owned by the batch, visible or not.
    pub sprites: usize,
    /// Sprites that survived the cull this frame.
    pub rendered: usize,
}

/// Owns the sprite list and drives the per-frame pipeline.
pub struct SpriteBatch {
    sprites: SlotMap<SpriteKey, Sprite>,
    /// Insertion order; the sort's tie-break of last resort.
    order: Vec<SpriteKey>,
    /// Filtered, sorted output of the last update, consumed by draw.
    render_list: Vec<SpriteKey>,
    texture_order: TextureOrderRegistry,
    stats: BatchStats,
    /// Scratch atlas region reconfigured per sprite during the draw pass.
    quad: Quad,
    config: BatchConfig,
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}

impl SpriteBatch {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            sprites: SlotMap::with_key(),
            order: Vec::new(),
            render_list: Vec::new(),
            texture_order: TextureOrderRegistry::new(),
            stats: BatchStats::default(),
            quad: Quad::default(),
            config,
        }
    }

    /// Create a sprite for `texture` and append it to the owned list.
    ///
    /// Always allocates fresh state; removed sprites are never pooled. The
    /// returned key is the sole handle for later mutation and removal.
    pub fn add(&mut self, texture: TextureId) -> SpriteKey {
        let key = self.sprites.insert(Sprite::new(texture));
        self.order.push(key);
        key
    }

    /// Remove the sprite behind `key`. Stale or foreign keys are a silent
    /// no-op.
    pub fn remove(&mut self, key: SpriteKey) {
        if self.sprites.remove(key).is_some() {
            self.order.retain(|&k| k != key);
        }
    }

    /// Borrow a sprite. `None` once the key went stale.
    pub fn sprite(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(key)
    }

    /// Mutably borrow a sprite. `None` once the key went stale.
    pub fn sprite_mut(&mut self, key: SpriteKey) -> Option<&mut Sprite> {
        self.sprites.get_mut(key)
    }

    /// Number of sprites owned, visible or not.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = SpriteKey> + '_ {
        self.order.iter().copied()
    }

    /// Counters from the last update.
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Render-list keys from the last update, in draw order.
    pub fn render_list(&self) -> &[SpriteKey] {
        &self.render_list
    }

    /// Run the per-frame pipeline: transform resolution, cull, sort,
    /// counters.
    ///
    /// `host_camera` is the scheduler's default camera; it is consulted
    /// only when the batch was configured with [`CameraSource::HostDefault`].
    pub fn update(&mut self, host_camera: Option<&dyn Camera>) {
        // 1. Resolve screen transforms.
        if let Some(transform) = self.config.transform.as_mut() {
            for &key in &self.order {
                let Some(sprite) = self.sprites.get_mut(key) else {
                    continue;
                };
                let patch = transform(sprite);
                // Partial update: components the hook left out keep the
                // values cached by the previous frame.
                if let Some(x) = patch.x {
                    sprite.screen_position.x = x;
                }
                if let Some(y) = patch.y {
                    sprite.screen_position.y = y;
                }
                if let Some(delta) = patch.rotation {
                    sprite.screen_rotation = sprite.rotation + delta;
                }
            }
        } else {
            for &key in &self.order {
                let Some(sprite) = self.sprites.get_mut(key) else {
                    continue;
                };
                sprite.screen_position = sprite.position + sprite.offset;
                sprite.screen_rotation = sprite.rotation;
            }
        }

        // 2. Cull. Every sprite gets a fresh on_screen verdict, not only
        // the ones entering the render list.
        let camera: Option<&dyn Camera> = match &self.config.camera {
            CameraSource::Disabled => None,
            CameraSource::HostDefault => host_camera,
            CameraSource::Fixed(camera) => Some(camera.as_ref()),
        };
        let cull_in_screen_space = self.config.cull_in_screen_space;
        self.render_list.clear();
        for &key in &self.order {
            let Some(sprite) = self.sprites.get_mut(key) else {
                continue;
            };
            let in_view = match camera {
                Some(camera) => {
                    let anchor = if cull_in_screen_space {
                        sprite.screen_position
                    } else {
                        sprite.position
                    };
                    camera.aabb_on_screen(anchor, sprite.size)
                }
                None => true,
            };
            let on_screen = sprite.visible && in_view;
            sprite.on_screen = on_screen;
            if on_screen {
                self.render_list.push(key);
            }
        }

        // 3. Sort: depth first, texture rank second so sprites sharing a
        // texture are contiguous within a layer. Ranks are assigned in
        // render-list (insertion) order before the comparator runs, and
        // Vec::sort_by is stable, so insertion order settles the rest.
        for &key in &self.render_list {
            self.texture_order.rank(self.sprites[key].texture);
        }
        let sprites = &self.sprites;
        let ranks = &self.texture_order;
        self.render_list.sort_by(|&a, &b| {
            let (sa, sb) = (&sprites[a], &sprites[b]);
            sa.z.total_cmp(&sb.z).then_with(|| {
                let ra = ranks.rank_of(sa.texture).unwrap_or(u32::MAX);
                let rb = ranks.rank_of(sb.texture).unwrap_or(u32::MAX);
                ra.cmp(&rb)
            })
        });

        // 4. Counters.
        self.stats = BatchStats {
            sprites: self.order.len(),
            rendered: self.render_list.len(),
        };
    }

    /// Draw the current render list through `gfx`.
    ///
    /// Sets the opaque-white tint, binds the configured shader, then
    /// submits one quad per render-list entry. The single scratch quad is
    /// reconfigured per sprite; nothing allocates per call. Sprites removed
    /// since the last update are skipped.
    pub fn draw(&mut self, gfx: &mut dyn RenderBackend) {
        gfx.set_color(Color::WHITE);
        gfx.set_shader(self.config.shader);
        for &key in &self.render_list {
            if let Some(sprite) = self.sprites.get(key) {
                sprite.draw(gfx, &mut self.quad, self.config.draw_in_screen_space);
            }
        }
    }

    /// Register the update and draw tasks with the host scheduler.
    ///
    /// Update lands at `base_priority + 1000` in the update phase, so
    /// game-logic tasks registered around the base priority have mutated
    /// sprite fields before the batch reads them; draw lands at
    /// `base_priority` in the draw phase.
    pub fn register(
        batch: &Rc<RefCell<SpriteBatch>>,
        scheduler: &mut dyn FrameScheduler,
        base_priority: i32,
    ) {
        log::debug!(
            "registering sprite batch tasks: update at {}, draw at {}",
            base_priority + 1000,
            base_priority
        );

        let update_batch = Rc::clone(batch);
        scheduler.add_task(
            Phase::Update,
            base_priority + 1000,
            Box::new(move |ctx| {
                update_batch.borrow_mut().update(ctx.default_camera);
            }),
        );

        let draw_batch = Rc::clone(batch);
        scheduler.add_task(
            Phase::Draw,
            base_priority,
            Box::new(move |ctx| {
                draw_batch.borrow_mut().draw(ctx.gfx);
            }),
        );
    }

    /// Expose `"<N>s, <M>r"` (owned, rendered) as a named overlay watch.
    ///
    /// The watch holds a weak handle; once the batch is dropped it formats
    /// to an empty string instead of keeping the batch alive.
    pub fn add_watch(
        batch: &Rc<RefCell<SpriteBatch>>,
        name: &str,
        overlay: &mut dyn DebugOverlay,
    ) {
        log::debug!("adding sprite batch watch {:?}", name);
        let watched = Rc::downgrade(batch);
        overlay.add_watch(
            name,
            Box::new(move || match watched.upgrade() {
                Some(batch) => {
                    let stats = batch.borrow().stats;
                    format!("{}s, {}r", stats.sprites, stats.rendered)
                }
                None => String::new(),
            }),
        );
    }
}
