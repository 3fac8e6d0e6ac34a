//! Particle emitter runtime state

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparkfx_config::{AssetResolver, ConfigError, EmitterConfig};

use crate::SIMULATION_EPSILON;
use crate::particle::{Particle, Retirement};
use crate::pool::ParticlePool;
use crate::render::{BlendMode, BufferHandle, RenderBackend, RenderHints, SpriteBatch};
use crate::sampling;
use crate::sprite::{PointSprite, SpriteBuffer};
use crate::timestep::substeps;

/// Running totals kept by an emitter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Particles placed in the pool
    pub spawned: u64,
    /// Scheduled spawns dropped because the pool was full
    pub dropped: u64,
    /// Particles retired because their lifetime ran out
    pub expired: u64,
    /// Radial particles retired at the minimum radius
    pub collapsed: u64,
}

/// Runtime particle emitter
///
/// Owns a fixed pool of `max_particles` particles and the sprite buffer built
/// from them. The host calls [`ParticleEmitter::update`] once per frame and
/// [`ParticleEmitter::render`] afterwards.
///
/// The random number generator is injected so tests and tools can run
/// reproducible simulations; [`ParticleEmitter::new`] seeds one from the OS.
#[derive(Debug, Clone)]
pub struct ParticleEmitter<R = StdRng> {
    config: EmitterConfig,
    pool: ParticlePool,
    sprites: SpriteBuffer,
    rng: R,
    source_position: Vec2,
    active: bool,
    duration: Option<f32>,
    elapsed_time: f32,
    /// Fractional particles to emit (accumulated seconds)
    emit_counter: f32,
    buffer: Option<BufferHandle>,
    stats: EmitterStats,
}

impl ParticleEmitter<StdRng> {
    /// Create an emitter seeded from operating system entropy
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create an emitter with a reproducible random sequence
    pub fn seeded(config: EmitterConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Read a named configuration once and build an emitter from it
    pub fn from_source<A: AssetResolver + ?Sized>(
        resolver: &A,
        name: &str,
        tag: &str,
    ) -> Result<Self, ConfigError> {
        EmitterConfig::load(resolver, name, tag).map(Self::new)
    }
}

impl<R: Rng> ParticleEmitter<R> {
    /// Create an emitter using the given random number generator
    pub fn with_rng(config: EmitterConfig, rng: R) -> Self {
        let capacity = config.max_particles();
        log::debug!(
            "Creating emitter: {} particles, {:.2}/s, {} motion",
            capacity,
            config.emission_rate(),
            config.motion().name()
        );

        Self {
            pool: ParticlePool::new(capacity),
            sprites: SpriteBuffer::new(capacity),
            rng,
            source_position: config.source_position().base,
            active: true,
            duration: config.duration(),
            elapsed_time: 0.0,
            emit_counter: 0.0,
            buffer: None,
            stats: EmitterStats::default(),
            config,
        }
    }

    /// Spawn one particle now
    ///
    /// Does nothing and returns `false` when the pool is full.
    pub fn spawn_particle(&mut self) -> bool {
        if self.pool.is_full() {
            return false;
        }
        let particle = sampling::spawn_particle(&self.config, self.source_position, &mut self.rng);
        self.pool.spawn(particle);
        self.stats.spawned += 1;
        true
    }

    /// Advance the simulation by one frame
    ///
    /// Large deltas are split into clamped sub-steps (see
    /// [`substeps`](crate::timestep::substeps)); the sprite buffer reflects
    /// the state after the last sub-step.
    pub fn update(&mut self, delta_time: f32) {
        for step in substeps(delta_time) {
            self.step(step);
        }
    }

    fn step(&mut self, dt: f32) {
        if self.active {
            if self.config.emission_rate() > 0.0 {
                self.emit(dt);
            }
            self.advance_clock(dt);
        }

        let motion = *self.config.motion();
        let source_position = self.source_position;
        let stats = &mut self.stats;
        self.pool.retain_mut(|particle| {
            match particle.advance(dt, &motion, source_position) {
                None => true,
                Some(Retirement::Expired) => {
                    stats.expired += 1;
                    false
                }
                Some(Retirement::Collapsed) => {
                    stats.collapsed += 1;
                    false
                }
            }
        });

        self.sprites.rebuild(self.pool.live());
    }

    fn emit(&mut self, dt: f32) {
        let interval = 1.0 / self.config.emission_rate();
        if !interval.is_finite() {
            return;
        }
        let tolerance = interval * SIMULATION_EPSILON;

        self.emit_counter += dt;
        while self.emit_counter + tolerance >= interval {
            if !self.spawn_particle() {
                // Emission pressure is dropped, never queued
                let pending = ((self.emit_counter + tolerance) / interval).floor();
                self.stats.dropped += pending as u64;
                self.emit_counter = (self.emit_counter - pending * interval).max(0.0);
                log::trace!("Emitter pool full, dropped {pending} scheduled particles");
                break;
            }
            self.emit_counter -= interval;
        }
    }

    fn advance_clock(&mut self, dt: f32) {
        self.elapsed_time += dt;
        if let Some(duration) = self.duration
            && self.elapsed_time > duration
        {
            log::debug!("Emitter duration of {duration}s elapsed");
            self.stop_particle_emitter();
        }
    }

    /// Stop emitting; live particles keep aging until they expire
    ///
    /// Resets the emission clock, so re-activating the emitter plays its
    /// full duration again. Calling this repeatedly has no further effect.
    pub fn stop_particle_emitter(&mut self) {
        if self.active {
            log::trace!(
                "Stopping emitter with {} live particles",
                self.pool.len()
            );
        }
        self.active = false;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
    }

    /// Draw the current sprites through a rendering backend
    ///
    /// The backend buffer is created on the first call and reused afterwards.
    /// Returns `false` when there was nothing to draw.
    pub fn render<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) -> bool {
        let capacity = self.sprites.capacity();
        let buffer = *self
            .buffer
            .get_or_insert_with(|| backend.create_buffer(capacity));

        if self.sprites.is_empty() {
            return false;
        }

        let batch = SpriteBatch {
            sprites: self.sprites.as_slice(),
            hints: self.render_hints(),
        };
        backend.draw_sprites(buffer, &batch);
        true
    }

    /// Rendering hints from the configuration
    pub fn render_hints(&self) -> RenderHints<'_> {
        RenderHints {
            blend: BlendMode::from_additive(self.config.blend_additive()),
            use_texture: self.config.use_texture(),
            texture: self.config.texture(),
        }
    }

    /// Whether new particles are being emitted
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start or pause emission
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Inactive with no live particles left
    pub fn is_finished(&self) -> bool {
        !self.active && self.pool.is_empty()
    }

    /// Number of live particles
    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    /// Drop live particles beyond `count`
    ///
    /// The count can only shrink; new particles come from emission.
    pub fn set_particle_count(&mut self, count: usize) {
        self.pool.truncate(count);
        self.sprites.truncate(count);
    }

    /// Pool capacity
    pub fn max_particles(&self) -> usize {
        self.pool.capacity()
    }

    /// Seconds of emission before the emitter stops, `None` for unlimited
    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Change how long the emitter stays active
    pub fn set_duration(&mut self, duration: Option<f32>) {
        self.duration = duration;
    }

    /// Seconds spent emitting since the emitter was last started
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Point new particles are spawned around
    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// Move the emitter; radial particles orbit the new position immediately
    pub fn set_source_position(&mut self, position: Vec2) {
        self.source_position = position;
    }

    /// Live particles in pool order
    pub fn particles(&self) -> &[Particle] {
        self.pool.live()
    }

    /// Sprites built by the last update
    pub fn sprites(&self) -> &[PointSprite] {
        self.sprites.as_slice()
    }

    /// The sprite buffer built by the last update
    pub fn sprite_buffer(&self) -> &SpriteBuffer {
        &self.sprites
    }

    /// Backend buffer handle, once [`ParticleEmitter::render`] has run
    pub fn buffer_handle(&self) -> Option<BufferHandle> {
        self.buffer
    }

    /// Configuration this emitter was built from
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Running totals
    pub fn stats(&self) -> EmitterStats {
        self.stats
    }
}
