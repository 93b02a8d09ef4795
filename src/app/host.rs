//! Seams to the host application.
//!
//! The bridge never talks to the browser, the editor or the command backend directly. It
//! goes through these traits so a host (an IDE plugin, the stdio driver, a test) can plug
//! in its own implementation:
//! - [Host]: the embedded browser and editor, only ever called from the UI tick.
//! - [ProjectContext]: where the project root and the session working directory live.
//! - [CommandSource]: the slash-command catalog, queried from a worker thread.

use crate::config::Config;
use crate::core::proc;
use crate::error::BridgeResult;

use serde::{Deserialize, Serialize};

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A slash command as reported by a [CommandSource]. The name may lack the leading `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl SlashCommand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// UI-side services of the host. Called on the UI thread only.
pub trait Host {
    /// Runs a JavaScript snippet in the embedded browser.
    fn execute_javascript(&mut self, script: &str);

    /// Opens a file that is known to exist in the host editor.
    fn open_file(&mut self, path: &Path) -> BridgeResult<()>;

    /// Hands a URL to the external browser.
    fn open_browser(&mut self, url: &str) -> BridgeResult<()>;

    /// Moves input focus to the embedded browser. Returns false when there is no browser
    /// component to focus.
    fn focus_browser(&mut self) -> bool;

    /// True once the host has torn down the browser.
    fn is_disposed(&self) -> bool {
        false
    }
}

/// Where requests get their project root from. Never from the request payload.
pub trait ProjectContext {
    fn base_path(&self) -> Option<PathBuf>;

    /// Working directory of the active session, if one is running.
    fn session_cwd(&self) -> Option<PathBuf> {
        None
    }
}

/// Supplier of the slash-command catalog.
pub trait CommandSource: Send + Sync {
    fn fetch_commands(&self, cwd: &Path) -> BridgeResult<Vec<SlashCommand>>;
}

/// A project rooted at a fixed directory.
#[derive(Debug, Clone)]
pub struct FixedProject {
    root: Option<PathBuf>,
    session_cwd: Option<PathBuf>,
}

impl FixedProject {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            session_cwd: None,
        }
    }

    /// A context without an open project.
    pub fn empty() -> Self {
        Self {
            root: None,
            session_cwd: None,
        }
    }

    pub fn with_session_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.session_cwd = Some(cwd.into());
        self
    }
}

impl ProjectContext for FixedProject {
    fn base_path(&self) -> Option<PathBuf> {
        self.root
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn session_cwd(&self) -> Option<PathBuf> {
        self.session_cwd
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Command catalog read from the `[[commands]]` tables of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredCommands {
    commands: Vec<SlashCommand>,
}

impl ConfiguredCommands {
    pub fn new(commands: Vec<SlashCommand>) -> Self {
        Self { commands }
    }
}

impl CommandSource for ConfiguredCommands {
    fn fetch_commands(&self, _cwd: &Path) -> BridgeResult<Vec<SlashCommand>> {
        Ok(self.commands.clone())
    }
}

/// Host used by the `wvb` binary.
///
/// JavaScript goes to the writer one snippet per line. Files open in the configured editor
/// and URLs in the configured or platform browser.
pub struct StdioHost<W: Write> {
    out: W,
    editor: Option<String>,
    browser: Option<String>,
}

impl StdioHost<io::Stdout> {
    pub fn stdout(config: &Config) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> StdioHost<W> {
    pub fn new(out: W, config: &Config) -> Self {
        Self {
            out,
            editor: config.general().editor().map(str::to_owned),
            browser: config.general().browser().map(str::to_owned),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Host for StdioHost<W> {
    fn execute_javascript(&mut self, script: &str) {
        if let Err(e) = writeln!(self.out, "{script}").and_then(|_| self.out.flush()) {
            tracing::error!(error = %e, "Failed to write script to output");
        }
    }

    fn open_file(&mut self, path: &Path) -> BridgeResult<()> {
        match self.editor.as_deref() {
            Some(editor) => proc::open_in_editor(editor, path),
            None => proc::open_url(&path.to_string_lossy(), self.browser.as_deref()),
        }
    }

    fn open_browser(&mut self, url: &str) -> BridgeResult<()> {
        proc::open_url(url, self.browser.as_deref())
    }

    fn focus_browser(&mut self) -> bool {
        // The terminal front end always owns input; nothing to move.
        true
    }
}
