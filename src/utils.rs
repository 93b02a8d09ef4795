//! Miscellaneous utility functions for the bridge.
//!
//! This module holds:
//! - [cli]: argument parsing and help for the `wvb` binary
//! - [helpers]: config clamping, home directory lookup and project root resolution
//! - [logging]: the stderr `tracing` subscriber

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{expand_home_path, get_home, resolve_project_root};
