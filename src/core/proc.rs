//! External process launching for the bridge.
//!
//! This module implements [open_url] and [open_in_editor], which hand a URL or a file over
//! to another program. Both spawn the program and return immediately; the child is never
//! waited on, so a slow browser or a GUI editor cannot stall the UI tick.
//!
//! Launchers are looked up with the `which` crate. When no browser command is configured,
//! the platform default is used (`open` on macOS, `xdg-open` and friends elsewhere on unix,
//! `explorer` on Windows).

use crate::error::{BridgeError, BridgeResult};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(target_os = "macos")]
const PLATFORM_LAUNCHERS: &[&str] = &["open"];
#[cfg(windows)]
const PLATFORM_LAUNCHERS: &[&str] = &["explorer"];
#[cfg(all(unix, not(target_os = "macos")))]
const PLATFORM_LAUNCHERS: &[&str] = &["xdg-open", "gio", "gnome-open", "kde-open"];

/// Resolves the program used to open URLs.
///
/// A configured command wins when it can be found in PATH (or is a path that exists).
pub fn find_launcher(configured: Option<&str>) -> BridgeResult<PathBuf> {
    if let Some(cmd) = configured.filter(|c| !c.trim().is_empty()) {
        return which::which(cmd).map_err(|_| BridgeError::NoLauncher);
    }
    PLATFORM_LAUNCHERS
        .iter()
        .find_map(|name| which::which(name).ok())
        .ok_or(BridgeError::NoLauncher)
}

/// Opens `url` with the configured or platform browser launcher.
pub fn open_url(url: &str, configured: Option<&str>) -> BridgeResult<()> {
    let launcher = find_launcher(configured)?;
    let mut cmd = Command::new(&launcher);
    if launcher.file_stem() == Some(OsStr::new("gio")) {
        cmd.arg("open");
    }
    cmd.arg(url);
    spawn_detached(cmd, &launcher)
}

/// Opens `path` with the given editor command.
///
/// The command may carry arguments (`"code --reuse-window"`); they are split on whitespace
/// and the path is appended last.
pub fn open_in_editor(editor: &str, path: &Path) -> BridgeResult<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(BridgeError::launch(
            editor,
            std::io::Error::other("empty editor command"),
        ));
    };
    let mut cmd = Command::new(program);
    cmd.args(parts).arg(path);
    spawn_detached(cmd, Path::new(program))
}

fn spawn_detached(mut cmd: Command, program: &Path) -> BridgeResult<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| BridgeError::launch(program.display().to_string(), e))
}
