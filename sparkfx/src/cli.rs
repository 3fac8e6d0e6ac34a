//! Root CLI structure for sparkfx

use clap::{Parser, Subcommand};

use crate::commands::{info::InfoArgs, simulate::SimulateArgs, validate::ValidateArgs};

#[derive(Parser)]
#[command(name = "sparkfx")]
#[command(about = "Command-line tools for sparkfx particle emitters", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Error,
            (false, 0) => log::LevelFilter::Warn,
            (false, 1) => log::LevelFilter::Info,
            (false, 2) => log::LevelFilter::Debug,
            (false, _) => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about an emitter configuration
    Info(InfoArgs),

    /// Validate one or more emitter configurations
    Validate(ValidateArgs),

    /// Run an emitter headlessly and report what it did
    Simulate(SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::parse_from(["sparkfx", "-vv", "info", "fire.json"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);

        let cli = Cli::parse_from(["sparkfx", "info", "fire.json", "--quiet"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Error);
    }
}
