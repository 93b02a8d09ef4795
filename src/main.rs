//! main.rs
//! Entry point for wvb

use webview_bridge::app::{
    BridgeSettings, BridgeState, ConfiguredCommands, FixedProject, StdioHost,
};
use webview_bridge::config::Config;
use webview_bridge::core::protocol::InboundMessage;
use webview_bridge::utils::cli::{CliAction, handle_args};
use webview_bridge::utils::{logging, resolve_project_root};

use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often finished work is delivered while stdin is quiet.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    let action = handle_args();

    if let CliAction::Exit = action {
        return Ok(());
    }

    let log = logging::init();
    let config = Config::load();
    if let Some(log) = &log {
        log.apply_config_filter(config.general().log_filter());
    }

    let root = match action {
        CliAction::RunBridgeAtPath(path_arg) => match resolve_project_root(&path_arg) {
            Some(root) => root,
            None => {
                eprintln!("[wvb] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
        },
        _ => std::env::current_dir()?,
    };
    tracing::info!(root = %root.display(), "Serving project");

    let commands = Arc::new(ConfiguredCommands::new(config.commands().to_vec()));
    let mut bridge = BridgeState::new(
        Box::new(StdioHost::stdout(&config)),
        Box::new(FixedProject::new(root)),
        commands,
        BridgeSettings::from(&config),
    );

    let lines = spawn_stdin_reader()?;
    loop {
        match lines.recv_timeout(TICK_INTERVAL) {
            Ok(line) => handle_line(&mut bridge, &line),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        bridge.tick();
    }

    tracing::debug!(in_flight = bridge.workers().active(), "Input closed, draining");
    while !bridge.is_idle() {
        thread::sleep(TICK_INTERVAL);
        bridge.tick();
    }
    Ok(())
}

fn handle_line(bridge: &mut BridgeState, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match serde_json::from_str::<InboundMessage>(line) {
        Ok(message) => {
            bridge.dispatch_message(&message);
        }
        Err(e) => tracing::warn!(error = %e, "Ignoring malformed message"),
    }
}

/// Reads stdin line by line on its own thread. The channel disconnects on EOF.
fn spawn_stdin_reader() -> io::Result<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}
