//! Slash-command list shaping.
//!
//! Takes whatever the [CommandSource](crate::app::host::CommandSource) returned, forces every
//! label to start with `/` and filters by the query. When the source fails, or answers with
//! nothing at all, the fixed [FALLBACK_COMMANDS] are served instead.

use crate::app::host::{ProjectContext, SlashCommand};
use crate::core::protocol::CommandItem;
use crate::error::BridgeResult;
use crate::utils::get_home;

use once_cell::sync::Lazy;

use std::path::PathBuf;

/// Local commands served when the real command source is unavailable or empty.
pub static FALLBACK_COMMANDS: Lazy<Vec<SlashCommand>> = Lazy::new(|| {
    vec![
        SlashCommand::new("/help", "Show help information"),
        SlashCommand::new("/clear", "Clear the conversation"),
        SlashCommand::new("/new", "Start a new session"),
        SlashCommand::new("/history", "View session history"),
        SlashCommand::new("/model", "Switch model"),
        SlashCommand::new("/settings", "Open settings"),
        SlashCommand::new("/compact", "Compact the conversation context"),
    ]
});

/// Working directory handed to the command source: the session's, else the project root,
/// else the user's home directory.
pub fn command_cwd(project: &dyn ProjectContext) -> PathBuf {
    project
        .session_cwd()
        .or_else(|| project.base_path())
        .or_else(get_home)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Turns an upstream answer into the list the front end shows.
///
/// A failed upstream and an empty upstream both fall back to [FALLBACK_COMMANDS]. An upstream
/// that had commands, none of which match the query, yields an empty list.
pub fn resolve_commands(upstream: BridgeResult<Vec<SlashCommand>>, query: &str) -> Vec<CommandItem> {
    match upstream {
        Ok(commands) if !commands.is_empty() => {
            let items = filter_commands(&commands, query);
            tracing::info!(
                shown = items.len(),
                total = commands.len(),
                "Resolved slash commands"
            );
            items
        }
        Ok(_) => {
            tracing::info!("Command source returned no commands, using local fallback");
            filter_commands(&FALLBACK_COMMANDS, query)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get commands, using local fallback");
            filter_commands(&FALLBACK_COMMANDS, query)
        }
    }
}

/// Labels every command with a leading `/` and keeps those whose label or description
/// contains the query, ignoring case.
pub fn filter_commands(commands: &[SlashCommand], query: &str) -> Vec<CommandItem> {
    let query = query.to_lowercase();
    commands
        .iter()
        .filter_map(|cmd| {
            let label = if cmd.name.starts_with('/') {
                cmd.name.clone()
            } else {
                format!("/{}", cmd.name)
            };
            let keep = query.is_empty()
                || label.to_lowercase().contains(&query)
                || cmd.description.to_lowercase().contains(&query);
            keep.then(|| CommandItem {
                label,
                description: cmd.description.clone(),
            })
        })
        .collect()
}
