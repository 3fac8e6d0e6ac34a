//! Renderer-ready point sprite records

use bytemuck::{Pod, Zeroable};

use crate::particle::Particle;

/// Location, size and color of one point sprite
///
/// Laid out as seven tightly packed `f32`s (28 bytes) so a slice of sprites
/// can be uploaded to a vertex buffer as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointSprite {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Point size
    pub size: f32,
    /// Color (RGBA)
    pub color: [f32; 4],
}

impl PointSprite {
    /// Size of one record in bytes
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}

impl From<&Particle> for PointSprite {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            size: p.size,
            color: p.color.to_array(),
        }
    }
}

/// Capacity-bound vertex data rebuilt from the live particle prefix
#[derive(Debug, Clone)]
pub struct SpriteBuffer {
    sprites: Box<[PointSprite]>,
    len: usize,
}

impl SpriteBuffer {
    /// Allocate a buffer for `capacity` sprites
    pub fn new(capacity: usize) -> Self {
        Self {
            sprites: vec![PointSprite::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Rewrite the buffer from live particles, in pool order
    ///
    /// Particles beyond the buffer capacity are ignored.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        let len = particles.len().min(self.sprites.len());
        for (sprite, particle) in self.sprites[..len].iter_mut().zip(particles) {
            *sprite = PointSprite::from(particle);
        }
        self.len = len;
    }

    /// Drop sprites beyond `len`
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Number of valid sprites
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of sprites
    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    /// Valid sprites
    pub fn as_slice(&self) -> &[PointSprite] {
        &self.sprites[..self.len]
    }

    /// Valid sprites as raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    /// Size of the whole buffer in bytes
    pub fn byte_capacity(&self) -> usize {
        self.sprites.len() * PointSprite::STRIDE
    }
}
