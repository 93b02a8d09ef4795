//! Command-line argument parsing and help for `wvb`.
//!
//! This module handles the few flags the binary accepts. Anything that is not a flag is taken
//! as the project root.
//!
//! When invoked with no args (wvb), the bridge serves the current directory.

use crate::config::{CONFIG_ENV, Config};

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunBridge,
    RunBridgeAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses the arguments after the program name.
pub fn parse_args(args: &[String]) -> CliAction {
    if args.is_empty() {
        return CliAction::RunBridge;
    }

    if args.len() > 1 {
        eprintln!("Error: wvb accepts only one argument at a time.");
        eprintln!("Usage: wvb [PROJECT_ROOT] or wvb [OPTION]");
        return CliAction::Exit;
    }

    match args[0].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            let config_path = Config::default_path();
            if let Err(e) = Config::generate_default(&config_path) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunBridgeAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("wvb {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"wvb - Web view bridge: project file search and slash commands over stdio

USAGE:
  wvb [PROJECT_ROOT]

PROJECT_ROOT:
  Directory searched by list_files (defaults to current directory)

PROTOCOL:
  stdin                   One JSON message per line: {{"type": "list_files", "content": "..."}}
  stdout                  One JavaScript callback per line
  stderr                  Logs

MESSAGE TYPES:
  list_files              {{"query": "...", "currentPath": "..."}} or a raw query
  get_commands            {{"query": "..."}} or a raw query
  open_file               Path, absolute or relative to PROJECT_ROOT
  open_browser            URL
  request_focus           No payload

OPTIONS:
      --init              Generate the default configuration
  -h, --help              Print help information
  -v, --version           Display the current installed version of wvb

ENVIRONMENT:
  {}   Override the default config path
  RUST_LOG                Override the configured log filter
"#,
        CONFIG_ENV
    );
}
