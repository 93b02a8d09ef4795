//! Configuration module for the bridge.
//!
//! Loads `webview-bridge.toml` through [load::Config] and exposes the processed settings:
//! - [search]: search caps and extra ignored names
//! - [general]: editor, browser and log filter
//!
//! The command catalog (`[[commands]]`) lives directly on [Config].

pub mod general;
pub mod load;
pub mod search;

pub use general::General;
pub use load::{CONFIG_ENV, Config};
pub use search::InternalSearch;
pub(crate) use search::Search;
