//! Emitter configuration inspection

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use sparkfx_config::{EmitterConfig, MotionModel};
use sparkfx_particles::PointSprite;

use crate::utils::{
    add_property_row, create_table, format_bytes, format_color, format_duration, format_jittered,
    format_vec2,
};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the emitter configuration (.json, .yaml or .yml)
    pub config: PathBuf,

    /// Show detailed information
    #[arg(short, long)]
    pub detailed: bool,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let config = EmitterConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load emitter from {}", args.config.display()))?;

    println!("Emitter: {}", args.config.display());
    println!();

    let mut table = create_table(&["Property", "Value"]);

    let source = config.source_position();
    add_property_row(&mut table, "Source position", format_vec2(source.base));
    add_property_row(&mut table, "Source variance", format_vec2(source.variance));
    add_property_row(&mut table, "Angle", format_jittered(config.angle(), "°"));
    add_property_row(&mut table, "Speed", format_jittered(config.speed(), "/s"));
    add_property_row(&mut table, "Motion", config.motion().name());

    match config.motion() {
        MotionModel::Linear { gravity } => {
            add_property_row(&mut table, "Gravity", format_vec2(*gravity));
        }
        MotionModel::Radial(radial) => {
            add_property_row(&mut table, "Max radius", format_jittered(radial.max_radius, ""));
            add_property_row(&mut table, "Min radius", format!("{:.2}", radial.min_radius));
            let radius_speed = if radial.radius_speed > 0.0 {
                format!("{:.2}/s", radial.radius_speed)
            } else {
                "reach min radius at expiry".to_string()
            };
            add_property_row(&mut table, "Radius speed", radius_speed);
            add_property_row(
                &mut table,
                "Rotation",
                format_jittered(radial.rotate_per_second, "°/s"),
            );
        }
    }

    add_property_row(&mut table, "Lifespan", format_jittered(config.lifespan(), "s"));
    add_property_row(&mut table, "Start color", format_color(config.start_color().base));
    add_property_row(&mut table, "Finish color", format_color(config.finish_color().base));
    add_property_row(&mut table, "Start size", format_jittered(config.start_size(), ""));
    add_property_row(&mut table, "Finish size", format_jittered(config.finish_size(), ""));
    add_property_row(&mut table, "Max particles", config.max_particles());
    add_property_row(
        &mut table,
        "Emission rate",
        format!("{:.2}/s", config.emission_rate()),
    );
    add_property_row(&mut table, "Duration", format_duration(config.duration()));
    add_property_row(
        &mut table,
        "Blending",
        if config.blend_additive() {
            "additive"
        } else {
            "alpha"
        },
    );
    add_property_row(
        &mut table,
        "Texture",
        match (config.use_texture(), config.texture()) {
            (true, Some(name)) => name.to_string(),
            (true, None) => "enabled".to_string(),
            (false, _) => "none".to_string(),
        },
    );
    add_property_row(
        &mut table,
        "Sprite buffer",
        format_bytes((config.max_particles() * PointSprite::STRIDE) as u64),
    );

    table.printstd();

    if args.detailed {
        println!("\n=== Detailed Information ===");
        println!(
            "Start color variance:  {}",
            format_color(config.start_color().variance)
        );
        println!(
            "Finish color variance: {}",
            format_color(config.finish_color().variance)
        );
        println!("{config:#?}");
    }

    Ok(())
}
