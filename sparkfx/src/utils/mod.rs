//! Shared utilities for the sparkfx CLI

pub mod backend;
pub mod format;
pub mod progress;
pub mod table;

pub use backend::*;
pub use format::*;
pub use progress::*;
pub use table::*;
