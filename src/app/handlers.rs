//! Message handlers for the web view.
//!
//! Each [MessageHandler] claims a few message types and turns them into either worker tasks
//! (anything that touches the disk or the command backend) or direct host calls (focus,
//! browser). Handlers hold no state of their own; everything they need is in the
//! [HandlerContext] handed to them on every call.

use crate::app::commands::command_cwd;
use crate::app::host::{CommandSource, Host, ProjectContext};
use crate::core::find::SearchLimits;
use crate::core::protocol::{
    CommandQuery, FOCUS_RESTORED_CALLBACK, ListFilesRequest, js_callback,
};
use crate::core::worker::{WorkerTask, Workers};
use crate::core::IgnoreList;
use crate::error::{BridgeError, BridgeResult};

use std::path::PathBuf;
use std::sync::Arc;

/// Request kinds whose answers can go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Files,
    Commands,
    Open,
}

/// Hands out request ids and remembers the latest one per [RequestKind].
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    latest_files: u64,
    latest_commands: u64,
}

impl RequestTracker {
    pub fn prepare_new_request(&mut self, kind: RequestKind) -> u64 {
        self.next = self.next.wrapping_add(1);
        match kind {
            RequestKind::Files => self.latest_files = self.next,
            RequestKind::Commands => self.latest_commands = self.next,
            RequestKind::Open => {}
        }
        self.next
    }

    /// True when `request_id` is still the newest request of its kind.
    ///
    /// Open requests never go stale: every one of them gets its answer.
    pub fn is_current(&self, kind: RequestKind, request_id: u64) -> bool {
        match kind {
            RequestKind::Files => request_id == self.latest_files,
            RequestKind::Commands => request_id == self.latest_commands,
            RequestKind::Open => true,
        }
    }
}

/// Everything a handler may touch while serving a message.
pub struct HandlerContext {
    pub(crate) host: Box<dyn Host>,
    pub(crate) project: Box<dyn ProjectContext>,
    pub(crate) commands: Arc<dyn CommandSource>,
    pub(crate) workers: Workers,
    pub(crate) limits: SearchLimits,
    pub(crate) ignore: IgnoreList,
    pub(crate) requests: RequestTracker,
}

impl HandlerContext {
    /// Absolute project root. Fails when no project is open.
    pub fn project_root(&self) -> BridgeResult<PathBuf> {
        let base = self
            .project
            .base_path()
            .ok_or(BridgeError::MissingProjectRoot)?;
        Ok(std::path::absolute(base)?)
    }

    /// Runs a guarded `window.<function>(arg)` call in the browser.
    pub fn call_javascript(&mut self, function: &str, arg: Option<&str>) {
        let script = js_callback(function, arg);
        self.host.execute_javascript(&script);
    }
}

/// A handler for one or more message types coming from the web view.
pub trait MessageHandler {
    fn supported_types(&self) -> &'static [&'static str];

    /// Serves the message. Returns false when the type is not handled here.
    fn handle(&self, ctx: &mut HandlerContext, kind: &str, content: &str) -> bool;
}

/// File listing, slash commands, opening files and links.
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    const SUPPORTED_TYPES: &'static [&'static str] =
        &["list_files", "get_commands", "open_file", "open_browser"];

    fn handle_list_files(ctx: &mut HandlerContext, content: &str) {
        let request = ListFilesRequest::parse(content);

        // The root always comes from the project, never from the payload.
        let root = match ctx.project_root() {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping file search");
                return;
            }
        };

        let request_id = ctx.requests.prepare_new_request(RequestKind::Files);
        ctx.workers.submit(WorkerTask::ListFiles {
            root,
            request,
            limits: ctx.limits,
            ignore: ctx.ignore.clone(),
            request_id,
        });
    }

    fn handle_get_commands(ctx: &mut HandlerContext, content: &str) {
        let query = CommandQuery::parse(content).query;
        let cwd = command_cwd(ctx.project.as_ref());
        let request_id = ctx.requests.prepare_new_request(RequestKind::Commands);
        ctx.workers.submit(WorkerTask::FetchCommands {
            source: Arc::clone(&ctx.commands),
            cwd,
            query,
            request_id,
        });
    }

    fn handle_open_file(ctx: &mut HandlerContext, content: &str) {
        tracing::info!(path = %content, "Open file requested");
        let request_id = ctx.requests.prepare_new_request(RequestKind::Open);
        ctx.workers.submit(WorkerTask::ResolveOpenFile {
            requested: content.to_string(),
            base: ctx.project.base_path(),
            request_id,
        });
    }

    fn handle_open_browser(ctx: &mut HandlerContext, content: &str) {
        if let Err(e) = ctx.host.open_browser(content) {
            tracing::error!(url = %content, error = %e, "Failed to open browser");
        }
    }
}

impl MessageHandler for FileHandler {
    fn supported_types(&self) -> &'static [&'static str] {
        Self::SUPPORTED_TYPES
    }

    fn handle(&self, ctx: &mut HandlerContext, kind: &str, content: &str) -> bool {
        match kind {
            "list_files" => Self::handle_list_files(ctx, content),
            "get_commands" => Self::handle_get_commands(ctx, content),
            "open_file" => Self::handle_open_file(ctx, content),
            "open_browser" => Self::handle_open_browser(ctx, content),
            _ => return false,
        }
        true
    }
}

/// Moves input focus into the embedded browser on request.
#[derive(Debug, Default)]
pub struct FocusHandler;

impl MessageHandler for FocusHandler {
    fn supported_types(&self) -> &'static [&'static str] {
        &["request_focus"]
    }

    fn handle(&self, ctx: &mut HandlerContext, kind: &str, _content: &str) -> bool {
        if kind != "request_focus" {
            return false;
        }
        tracing::info!("Received focus request");
        if !ctx.host.is_disposed() && ctx.host.focus_browser() {
            ctx.call_javascript(FOCUS_RESTORED_CALLBACK, None);
        }
        true
    }
}
