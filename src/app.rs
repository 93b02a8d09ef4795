//! Bridge layer between the web view and its host.
//!
//! - [host]: the traits a host implements plus the ready-made stdio host.
//! - [handlers]: message handlers that turn web view messages into work.
//! - [commands]: slash-command filtering and the fallback catalog.
//! - [state]: [BridgeState], the object the host drives from its UI thread.

pub mod commands;
pub mod handlers;
pub mod host;
pub mod state;

pub use handlers::{FileHandler, FocusHandler, HandlerContext, MessageHandler};
pub use host::{
    CommandSource, ConfiguredCommands, FixedProject, Host, ProjectContext, SlashCommand,
    StdioHost,
};
pub use state::{BridgeSettings, BridgeState};
