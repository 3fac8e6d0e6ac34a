//! sparkfx command-line library
//!
//! Command implementations behind the `sparkfx` binary, exposed so they can be
//! driven from tests and other tools.

pub mod cli;
pub mod commands;
pub mod utils;
