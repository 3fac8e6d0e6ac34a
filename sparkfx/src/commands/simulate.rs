//! Headless emitter simulation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use glam::Vec2;
use serde::Serialize;
use std::path::PathBuf;

use sparkfx_config::EmitterConfig;
use sparkfx_particles::{ParticleEmitter, PointSprite, substeps};

use crate::utils::{StatsBackend, add_property_row, create_progress_bar, create_table, format_bytes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON report
    Json,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the emitter configuration (.json, .yaml or .yml)
    pub config: PathBuf,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 300)]
    pub frames: u32,

    /// Frames per second; each frame advances the emitter by 1/fps seconds
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop emitting after this many frames
    #[arg(long, value_name = "FRAMES")]
    pub stop_after: Option<u32>,

    /// Override the source position
    #[arg(long, value_name = "X,Y", value_parser = parse_position, allow_hyphen_values = true)]
    pub source: Option<Vec2>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

fn parse_position(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("invalid X '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("invalid Y '{y}': {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("position '{s}' is not finite"));
    }
    Ok(Vec2::new(x, y))
}

/// What a simulation run did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub frames: u32,
    pub simulated_seconds: f32,
    pub max_particles: usize,
    pub peak_particles: usize,
    pub final_particles: usize,
    pub spawned: u64,
    pub dropped: u64,
    pub expired: u64,
    pub collapsed: u64,
    pub draw_calls: u64,
    pub sprites_drawn: u64,
    pub bytes_uploaded: u64,
    pub largest_batch: usize,
    pub buffers_created: usize,
    pub buffer_bytes: usize,
    pub active: bool,
    pub finished: bool,
}

/// Drive an emitter frame by frame against a [`StatsBackend`]
pub fn run(
    emitter: &mut ParticleEmitter,
    frames: u32,
    fps: f32,
    stop_after: Option<u32>,
    mut on_frame: impl FnMut(u32),
) -> SimulationReport {
    let delta_time = 1.0 / fps;
    let mut backend = StatsBackend::new();
    let mut peak_particles = 0;

    for frame in 0..frames {
        if stop_after == Some(frame) {
            log::info!("Stopping emitter at frame {frame}");
            emitter.stop_particle_emitter();
        }
        emitter.update(delta_time);
        emitter.render(&mut backend);
        peak_particles = peak_particles.max(emitter.particle_count());
        on_frame(frame);
    }

    let stats = emitter.stats();
    SimulationReport {
        frames,
        // Long frames are clamped, so count what the emitter actually ran
        simulated_seconds: frames as f32 * substeps(delta_time).sum::<f32>(),
        max_particles: emitter.max_particles(),
        peak_particles,
        final_particles: emitter.particle_count(),
        spawned: stats.spawned,
        dropped: stats.dropped,
        expired: stats.expired,
        collapsed: stats.collapsed,
        draw_calls: backend.draw_calls,
        sprites_drawn: backend.sprites_drawn,
        bytes_uploaded: backend.bytes_uploaded,
        largest_batch: backend.largest_batch,
        buffers_created: backend.buffer_count(),
        buffer_bytes: emitter.sprite_buffer().byte_capacity(),
        active: emitter.is_active(),
        finished: emitter.is_finished(),
    }
}

pub fn execute(args: SimulateArgs, quiet: bool) -> Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be a positive number, got {}", args.fps);
    }

    let config = EmitterConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load emitter from {}", args.config.display()))?;

    let mut emitter = match args.seed {
        Some(seed) => ParticleEmitter::seeded(config, seed),
        None => ParticleEmitter::new(config),
    };
    if let Some(position) = args.source {
        emitter.set_source_position(position);
    }

    let pb = create_progress_bar(
        u64::from(args.frames),
        "Simulating",
        quiet || args.format == OutputFormat::Json,
    );
    let report = run(&mut emitter, args.frames, args.fps, args.stop_after, |_| {
        pb.inc(1);
    });
    pb.finish_and_clear();

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize simulation report")?;
            println!("{json}");
        }
        OutputFormat::Table => print_report(&args.config, &report),
    }

    Ok(())
}

fn print_report(path: &std::path::Path, report: &SimulationReport) {
    println!(
        "Simulated {}: {} frames ({:.2}s)",
        path.display(),
        report.frames,
        report.simulated_seconds
    );
    println!();

    let mut table = create_table(&["Metric", "Value"]);
    add_property_row(&mut table, "Max particles", report.max_particles);
    add_property_row(&mut table, "Peak particles", report.peak_particles);
    add_property_row(&mut table, "Final particles", report.final_particles);
    add_property_row(&mut table, "Spawned", report.spawned);
    add_property_row(&mut table, "Dropped (pool full)", report.dropped);
    add_property_row(&mut table, "Expired", report.expired);
    add_property_row(&mut table, "Collapsed", report.collapsed);
    add_property_row(&mut table, "Draw calls", report.draw_calls);
    add_property_row(&mut table, "Sprites drawn", report.sprites_drawn);
    add_property_row(&mut table, "Largest batch", report.largest_batch);
    add_property_row(&mut table, "Uploaded", format_bytes(report.bytes_uploaded));
    add_property_row(&mut table, "Buffers created", report.buffers_created);
    add_property_row(
        &mut table,
        "Sprite buffer",
        format!(
            "{} ({} bytes per sprite)",
            format_bytes(report.buffer_bytes as u64),
            PointSprite::STRIDE
        ),
    );
    add_property_row(&mut table, "Still emitting", report.active);
    add_property_row(&mut table, "Finished", report.finished);
    table.printstd();
}
