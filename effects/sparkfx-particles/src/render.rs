//! Hand-off between emitters and a rendering backend
//!
//! The emitter never issues draw calls. Once per frame it hands a
//! [`SpriteBatch`] to a [`RenderBackend`], which owns the GPU resources and
//! decides how to upload and draw the sprites.

use crate::sprite::PointSprite;

/// Blending mode for particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Alpha blending (src * alpha + dst * (1-alpha))
    #[default]
    AlphaBlend,
    /// Additive blending (src * alpha + dst)
    Additive,
}

impl BlendMode {
    /// Convert from the configuration's additive flag
    pub fn from_additive(additive: bool) -> Self {
        if additive {
            BlendMode::Additive
        } else {
            BlendMode::AlphaBlend
        }
    }
}

/// Rendering hints passed through from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHints<'a> {
    /// Blend mode to draw with
    pub blend: BlendMode,
    /// Whether sprites should be textured
    pub use_texture: bool,
    /// Texture name, if the configuration names one
    pub texture: Option<&'a str>,
}

/// Opaque identifier of a backend vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// The sprites of one emitter for one frame
#[derive(Debug, Clone, Copy)]
pub struct SpriteBatch<'a> {
    /// Live sprites in pool order
    pub sprites: &'a [PointSprite],
    /// How the sprites should be drawn
    pub hints: RenderHints<'a>,
}

impl SpriteBatch<'_> {
    /// Number of sprites to draw
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite data as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.sprites)
    }
}

/// Trait implemented by rendering backends
pub trait RenderBackend {
    /// Allocate a vertex buffer able to hold `capacity` sprites
    fn create_buffer(&mut self, capacity: usize) -> BufferHandle;

    /// Upload and draw a batch using a buffer from [`RenderBackend::create_buffer`]
    fn draw_sprites(&mut self, buffer: BufferHandle, batch: &SpriteBatch<'_>);
}
