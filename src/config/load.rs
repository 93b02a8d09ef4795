//! The main config loading module for the bridge.
//!
//! Handles loading and deserializing settings from `webview-bridge.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the internal [RawConfig] used for
//! parsing and processing.
//!
//! Also implements default config initialization for `wvb --init`.

use crate::app::host::SlashCommand;
use crate::config::{General, InternalSearch, Search};
use crate::error::BridgeResult;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Environment variable overriding the config path.
pub const CONFIG_ENV: &str = "WEBVIEW_BRIDGE_CONFIG";

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    search: Search,
    general: General,
    commands: Vec<SlashCommand>,
}

/// Main configuration struct for the bridge
/// This struct holds the processed configuration options.
#[derive(Debug, Clone)]
pub struct Config {
    search: InternalSearch,
    general: General,
    commands: Vec<SlashCommand>,
}

/// Conversion from RawConfig to Config
/// Clamps the search caps and drops commands without a name.
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let commands = raw
            .commands
            .into_iter()
            .filter(|cmd| !cmd.name.trim().is_empty())
            .collect();
        Self {
            search: InternalSearch::from(raw.search),
            general: raw.general,
            commands,
        }
    }
}

impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by the entry point to load config at startup.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            tracing::info!(
                path = %path.display(),
                "No config file found, using internal defaults (run 'wvb --init' to generate one)"
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Error loading config, using defaults");
                Self::default()
            }
        }
    }

    /// Reads and parses the config file at `path`.
    pub fn load_from(path: &Path) -> BridgeResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses config from a toml string.
    pub fn parse(content: &str) -> BridgeResult<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn search(&self) -> &InternalSearch {
        &self.search
    }

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    /// The command catalog served by the binary's command source.
    #[inline]
    pub fn commands(&self) -> &[SlashCommand] {
        &self.commands
    }

    /// Determine the default configuration file path.
    /// Checks the WEBVIEW_BRIDGE_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/webview-bridge/webview-bridge.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("webview-bridge/webview-bridge.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/webview-bridge/webview-bridge.toml");
        }
        PathBuf::from("webview-bridge.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# webview-bridge.toml - default configuration for wvb

# Note:
# Commented values are the internal defaults.

# File search served to the @-mention picker
[search]
# max_depth = 15            # deepest directory level searched (0..=64)
# max_results = 200         # cap for query searches (1..=10000)
# list_max_results = 100    # cap for plain directory listings (1..=10000)
# extra_ignored = []        # base names skipped on top of the built-in list, e.g. ["tmp"]

[general]
# editor = "code --wait"    # opens files; unset uses the browser launcher
# browser = "firefox"       # opens links; unset uses xdg-open / open / explorer
# log_filter = "info"       # overridden by RUST_LOG

# Slash commands offered to the front end.
# When empty, a built-in set (/help, /clear, /new, ...) is served instead.
# [[commands]]
# name = "/review"
# description = "Review the current changes"
"##;
