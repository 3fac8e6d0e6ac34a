//! Render backend that only counts what it is asked to draw

use sparkfx_particles::{BufferHandle, RenderBackend, SpriteBatch};

/// Headless [`RenderBackend`] collecting draw statistics
#[derive(Debug, Default)]
pub struct StatsBackend {
    buffers: Vec<usize>,
    /// Number of `draw_sprites` calls
    pub draw_calls: u64,
    /// Sprites drawn over all calls
    pub sprites_drawn: u64,
    /// Bytes of sprite data handed over
    pub bytes_uploaded: u64,
    /// Largest batch seen
    pub largest_batch: usize,
}

impl StatsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers created
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Capacity, in sprites, of a created buffer
    pub fn buffer_capacity(&self, handle: BufferHandle) -> Option<usize> {
        self.buffers.get(handle.0 as usize).copied()
    }
}

impl RenderBackend for StatsBackend {
    fn create_buffer(&mut self, capacity: usize) -> BufferHandle {
        log::debug!("Creating sprite buffer for {capacity} sprites");
        self.buffers.push(capacity);
        BufferHandle((self.buffers.len() - 1) as u32)
    }

    fn draw_sprites(&mut self, buffer: BufferHandle, batch: &SpriteBatch<'_>) {
        debug_assert!(
            self.buffer_capacity(buffer)
                .is_some_and(|capacity| batch.len() <= capacity),
            "batch does not fit its buffer"
        );
        self.draw_calls += 1;
        self.sprites_drawn += batch.len() as u64;
        self.bytes_uploaded += batch.as_bytes().len() as u64;
        self.largest_batch = self.largest_batch.max(batch.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkfx_particles::{BlendMode, PointSprite, RenderHints};

    #[test]
    fn test_counts_draws() {
        let mut backend = StatsBackend::new();
        let handle = backend.create_buffer(4);
        assert_eq!(handle, BufferHandle(0));
        assert_eq!(backend.buffer_capacity(handle), Some(4));

        let sprites = [PointSprite::default(); 3];
        let batch = SpriteBatch {
            sprites: &sprites,
            hints: RenderHints {
                blend: BlendMode::Additive,
                use_texture: false,
                texture: None,
            },
        };
        backend.draw_sprites(handle, &batch);
        backend.draw_sprites(handle, &batch);

        assert_eq!(backend.buffer_count(), 1);
        assert_eq!(backend.draw_calls, 2);
        assert_eq!(backend.sprites_drawn, 6);
        assert_eq!(backend.bytes_uploaded, 6 * PointSprite::STRIDE as u64);
        assert_eq!(backend.largest_batch, 3);
    }
}
