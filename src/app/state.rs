//! Bridge state and main controller module.
//!
//! This module defines the [BridgeState] struct, the single object a host keeps per embedded
//! browser. It holds:
//! - the host seams ([Host], [ProjectContext], [CommandSource])
//! - the registered [MessageHandler]s
//! - the worker threads and their request ids
//!
//! Incoming messages go through [BridgeState::dispatch]. Results produced by the workers are
//! only delivered from [BridgeState::tick], which the host calls from its UI thread, so every
//! callback into the browser happens on that one thread in the order the results arrived.

use crate::app::handlers::{
    FileHandler, FocusHandler, HandlerContext, MessageHandler, RequestKind, RequestTracker,
};
use crate::app::host::{CommandSource, Host, ProjectContext};
use crate::config::Config;
use crate::core::IgnoreList;
use crate::core::find::SearchLimits;
use crate::core::protocol::{
    COMMAND_LIST_CALLBACK, CommandListResponse, ERROR_MESSAGE_CALLBACK, FILE_LIST_CALLBACK,
    FileListResponse, InboundMessage, json_callback,
};
use crate::core::worker::{WorkerResponse, Workers};

use serde::Serialize;

use std::sync::Arc;

/// Search caps and ignore-list applied to every `list_files` request.
#[derive(Debug, Clone, Default)]
pub struct BridgeSettings {
    pub limits: SearchLimits,
    pub ignore: IgnoreList,
}

impl From<&Config> for BridgeSettings {
    fn from(config: &Config) -> Self {
        Self {
            limits: config.search().limits(),
            ignore: config.search().ignore_list(),
        }
    }
}

/// Main struct which holds the state of one web view bridge.
pub struct BridgeState {
    ctx: HandlerContext,
    handlers: Vec<Box<dyn MessageHandler>>,
}

impl BridgeState {
    /// Creates the bridge with the file and focus handlers registered and spawns its workers.
    pub fn new(
        host: Box<dyn Host>,
        project: Box<dyn ProjectContext>,
        commands: Arc<dyn CommandSource>,
        settings: BridgeSettings,
    ) -> Self {
        let ctx = HandlerContext {
            host,
            project,
            commands,
            workers: Workers::spawn(),
            limits: settings.limits,
            ignore: settings.ignore,
            requests: RequestTracker::default(),
        };
        Self {
            ctx,
            handlers: vec![Box::new(FileHandler), Box::new(FocusHandler)],
        }
    }

    /// Registers an extra handler. Earlier handlers win when two claim the same type.
    pub fn register(&mut self, handler: Box<dyn MessageHandler>) {
        self.handlers.push(handler);
    }

    // Getters/ accessors

    #[inline]
    pub fn workers(&self) -> &Workers {
        &self.ctx.workers
    }

    /// True when nothing is queued, running or waiting for delivery.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ctx.workers.is_idle()
    }

    /// Routes one message to the first handler that supports its type.
    ///
    /// Returns false for unknown types.
    pub fn dispatch(&mut self, kind: &str, content: &str) -> bool {
        let ctx = &mut self.ctx;
        let handled = self
            .handlers
            .iter()
            .filter(|h| h.supported_types().iter().any(|t| *t == kind))
            .any(|h| h.handle(ctx, kind, content));
        if !handled {
            tracing::warn!(kind, "No handler for message type");
        }
        handled
    }

    pub fn dispatch_message(&mut self, message: &InboundMessage) -> bool {
        self.dispatch(&message.kind, &message.content)
    }

    /// Delivers finished worker results to the browser.
    ///
    /// Must be called from the host's UI thread. Returns true if anything was processed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(response) = self.ctx.workers.response_rx().try_recv() {
            changed = true;
            self.handle_response(response);
        }
        changed
    }

    fn handle_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::FileList { files, request_id } => {
                if !self.ctx.requests.is_current(RequestKind::Files, request_id) {
                    tracing::debug!(request_id, "Dropping superseded file list");
                    return;
                }
                self.send_json(FILE_LIST_CALLBACK, &FileListResponse { files });
            }
            WorkerResponse::Commands {
                commands,
                request_id,
            } => {
                if !self.ctx.requests.is_current(RequestKind::Commands, request_id) {
                    tracing::debug!(request_id, "Dropping superseded command list");
                    return;
                }
                self.send_json(COMMAND_LIST_CALLBACK, &CommandListResponse { commands });
            }
            WorkerResponse::OpenFileResolved {
                requested, path, ..
            } => match self.ctx.host.open_file(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "Opened file"),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to open file");
                    let message = format!("Unable to open file: {requested}");
                    self.ctx
                        .call_javascript(ERROR_MESSAGE_CALLBACK, Some(&message));
                }
            },
            WorkerResponse::OpenFileMissing { requested, .. } => {
                let message = format!("Unable to open file: file does not exist ({requested})");
                self.ctx
                    .call_javascript(ERROR_MESSAGE_CALLBACK, Some(&message));
            }
        }
    }

    fn send_json<T: Serialize>(&mut self, function: &str, body: &T) {
        match json_callback(function, body) {
            Ok(script) => self.ctx.host.execute_javascript(&script),
            Err(e) => tracing::error!(function, error = %e, "Failed to serialize response"),
        }
    }
}
