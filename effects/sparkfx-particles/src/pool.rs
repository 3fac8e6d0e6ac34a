//! Fixed-capacity particle storage
//!
//! The pool is allocated once and never resized. Live particles always occupy
//! the prefix `0..len()`; retiring a particle moves the last live particle
//! into its slot, so retirement is O(1) and iteration stays contiguous.

use crate::particle::Particle;

/// Fixed-capacity particle pool with a live-count cursor
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Box<[Particle]>,
    live: usize,
}

impl ParticlePool {
    /// Allocate a pool with room for `capacity` particles
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity].into_boxed_slice(),
            live: 0,
        }
    }

    /// Maximum number of live particles
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if no particle is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check if every slot is in use
    pub fn is_full(&self) -> bool {
        self.live == self.slots.len()
    }

    /// The live prefix
    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.live]
    }

    /// Mutable access to the live prefix
    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.live]
    }

    /// Place a particle in the next unused slot
    ///
    /// Returns `false` without storing anything when the pool is full.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.live] = particle;
        self.live += 1;
        true
    }

    /// Retire the live particle at `index`, moving the last live particle into its slot
    pub fn retire(&mut self, index: usize) {
        debug_assert!(index < self.live, "retiring a slot outside the live prefix");
        if index >= self.live {
            return;
        }
        self.live -= 1;
        self.slots.swap(index, self.live);
    }

    /// Visit every live particle, retiring those for which `keep` returns `false`
    ///
    /// Each particle is visited exactly once. Unlike `Vec::retain_mut` this does
    /// not preserve order: a retired slot is refilled from the end of the live
    /// prefix. Returns the number of retired particles.
    pub fn retain_mut<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&mut Particle) -> bool,
    {
        let before = self.live;
        let mut index = 0;
        while index < self.live {
            if keep(&mut self.slots[index]) {
                index += 1;
            } else {
                self.retire(index);
            }
        }
        before - self.live
    }

    /// Shrink the live prefix to at most `len` particles
    pub fn truncate(&mut self, len: usize) {
        self.live = self.live.min(len);
    }

    /// Retire every particle
    pub fn clear(&mut self) {
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(ttl: f32) -> Particle {
        Particle {
            time_to_live: ttl,
            ..Default::default()
        }
    }

    #[test]
    fn test_pool_capacity() {
        let mut pool = ParticlePool::new(2);
        assert!(pool.is_empty());
        assert!(pool.spawn(particle(1.0)));
        assert!(pool.spawn(particle(2.0)));
        assert!(pool.is_full());

        // Full pools drop new particles
        assert!(!pool.spawn(particle(3.0)));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_retire_swaps_with_last() {
        let mut pool = ParticlePool::new(4);
        for ttl in [1.0, 2.0, 3.0, 4.0] {
            pool.spawn(particle(ttl));
        }

        pool.retire(1);
        let ttls: Vec<f32> = pool.live().iter().map(|p| p.time_to_live).collect();
        assert_eq!(ttls, vec![1.0, 4.0, 3.0]);

        // Retiring the last live slot just moves the cursor
        pool.retire(2);
        let ttls: Vec<f32> = pool.live().iter().map(|p| p.time_to_live).collect();
        assert_eq!(ttls, vec![1.0, 4.0]);
    }

    #[test]
    fn test_retain_visits_swapped_particles() {
        let mut pool = ParticlePool::new(5);
        for ttl in [1.0, 0.0, 3.0, 0.0, 5.0] {
            pool.spawn(particle(ttl));
        }

        let mut visited = 0;
        let retired = pool.retain_mut(|p| {
            visited += 1;
            p.time_to_live > 0.0
        });

        assert_eq!(visited, 5);
        assert_eq!(retired, 2);
        let mut ttls: Vec<f32> = pool.live().iter().map(|p| p.time_to_live).collect();
        ttls.sort_by(f32::total_cmp);
        assert_eq!(ttls, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_truncate_only_shrinks() {
        let mut pool = ParticlePool::new(4);
        pool.spawn(particle(1.0));
        pool.spawn(particle(1.0));

        pool.truncate(10);
        assert_eq!(pool.len(), 2);

        pool.truncate(1);
        assert_eq!(pool.len(), 1);

        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), 4);
    }
}
