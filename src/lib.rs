//! Library crate for webview-bridge.
//!
//! The bridge serves an embedded chat web view: it searches and lists project files for the
//! @-mention picker, serves slash commands, opens files and links, and moves focus into the
//! browser. Results are delivered as JavaScript callbacks from the host's UI thread.
//!
//! The `wvb` binary (`src/main.rs`) drives the bridge over stdio. Hosts embedding the bridge
//! implement [app::Host] and [app::ProjectContext] and call [app::BridgeState::tick]
//! regularly.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use error::{BridgeError, BridgeResult};
