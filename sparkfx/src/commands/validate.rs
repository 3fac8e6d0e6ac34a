//! Emitter configuration validation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use sparkfx_config::EmitterConfig;

use crate::utils::create_progress_bar;

#[derive(Args)]
pub struct ValidateArgs {
    /// Emitter files or glob patterns (e.g. "effects/**/*.json")
    #[arg(required = true)]
    pub patterns: Vec<String>,
}

/// Expand glob patterns; a pattern matching nothing is kept as a literal path
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let before = files.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern: {pattern}"))? {
            let path = entry.with_context(|| format!("Failed to read a match of {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}

pub fn execute(args: ValidateArgs, quiet: bool) -> Result<()> {
    let files = expand_patterns(&args.patterns)?;
    log::info!("Validating {} emitter files", files.len());

    let pb = create_progress_bar(files.len() as u64, "Validating", quiet || files.len() < 2);
    let mut failed = 0usize;

    for path in &files {
        match EmitterConfig::from_path(path) {
            Ok(config) => pb.suspend(|| {
                println!(
                    "{} {} ({} motion, {} particles)",
                    style("✓").green(),
                    style(path.display()).cyan(),
                    config.motion().name(),
                    config.max_particles()
                );
            }),
            Err(err) => {
                failed += 1;
                pb.suspend(|| {
                    println!(
                        "{} {}: {}",
                        style("✗").red(),
                        style(path.display()).cyan(),
                        err
                    );
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        anyhow::bail!("{} of {} emitter files failed validation", failed, files.len());
    }

    println!("All {} emitter files are valid", files.len());
    Ok(())
}
