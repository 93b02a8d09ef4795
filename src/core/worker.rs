//! Worker threads for the bridge's blocking operations.
//!
//! Handles file listing/search, slash-command fetching and `open_file` path resolution on
//! background threads. All results are sent back over a single response channel that only the
//! UI tick drains.
//!
//! Requests [WorkerTask] come in from the bridge state via channels, and results
//! [WorkerResponse] go back the same way. Every task carries the `request_id` it was issued
//! with so the receiving side can tell stale answers from current ones.
//!
//! A task that fails or panics is logged and produces no response. There is no retry and no
//! cancellation: a task runs until its depth and count caps stop it.
//!
//! # Caution:
//! This module is a central protocol boundary. Adding or editing variants here requires the
//! matching change in the response handling of the bridge state.

use crate::app::commands::resolve_commands;
use crate::app::host::CommandSource;
use crate::core::find::{SearchLimits, list_files};
use crate::core::fm::resolve_open_path;
use crate::core::protocol::{CommandItem, ListFilesRequest};
use crate::core::{FileEntry, IgnoreList};

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Manages worker threads channels for different task types.
///
/// Listing/search, command fetching and file resolution each get a dedicated thread, so a
/// slow command backend never holds up a file listing.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    command_tx: Sender<WorkerTask>,
    open_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
    active: Arc<AtomicUsize>,
}

impl Workers {
    /// Create the worker set.
    ///
    /// Spawns dedicated threads for listing, command and open-file tasks.
    pub fn spawn() -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (command_tx, command_rx) = unbounded::<WorkerTask>();
        let (open_tx, open_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();
        let active = Arc::new(AtomicUsize::new(0));

        start_worker("bridge-io", io_rx, res_tx.clone(), Arc::clone(&active));
        start_worker("bridge-commands", command_rx, res_tx.clone(), Arc::clone(&active));
        start_worker("bridge-open", open_rx, res_tx, Arc::clone(&active));

        Self {
            io_tx,
            command_tx,
            open_tx,
            response_rx,
            active,
        }
    }

    /// Queues a task on the thread responsible for its kind.
    ///
    /// Returns false when the worker is gone; the task is dropped in that case.
    pub fn submit(&self, task: WorkerTask) -> bool {
        let tx = match task {
            WorkerTask::ListFiles { .. } => &self.io_tx,
            WorkerTask::FetchCommands { .. } => &self.command_tx,
            WorkerTask::ResolveOpenFile { .. } => &self.open_tx,
        };
        self.active.fetch_add(1, Ordering::AcqRel);
        if tx.send(task).is_err() {
            self.active.fetch_sub(1, Ordering::AcqRel);
            tracing::error!("Worker thread is gone, dropping task");
            return false;
        }
        true
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }

    /// Number of tasks queued or running.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// True when no task is in flight and no response is waiting.
    pub fn is_idle(&self) -> bool {
        self.active() == 0 && self.response_rx.is_empty()
    }
}

/// Tasks sent to the worker threads via channel.
pub enum WorkerTask {
    ListFiles {
        root: PathBuf,
        request: ListFilesRequest,
        limits: SearchLimits,
        ignore: IgnoreList,
        request_id: u64,
    },
    FetchCommands {
        source: Arc<dyn CommandSource>,
        cwd: PathBuf,
        query: String,
        request_id: u64,
    },
    ResolveOpenFile {
        requested: String,
        base: Option<PathBuf>,
        request_id: u64,
    },
}

/// Responses sent from the worker threads back to the UI tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    FileList {
        files: Vec<FileEntry>,
        request_id: u64,
    },
    Commands {
        commands: Vec<CommandItem>,
        request_id: u64,
    },
    OpenFileResolved {
        requested: String,
        path: PathBuf,
        request_id: u64,
    },
    OpenFileMissing {
        requested: String,
        request_id: u64,
    },
}

/// Starts a worker thread which listens for [WorkerTask] and sends back [WorkerResponse].
///
/// # Arguments
/// * `name` - Thread name, shows up in logs and panics
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for outgoing responses
/// * `active` - In-flight counter, decremented once a task is finished
fn start_worker(
    name: &str,
    task_rx: Receiver<WorkerTask>,
    res_tx: Sender<WorkerResponse>,
    active: Arc<AtomicUsize>,
) {
    let spawned = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            while let Ok(task) = task_rx.recv() {
                match panic::catch_unwind(AssertUnwindSafe(|| run_task(task))) {
                    Ok(Some(response)) => {
                        let _ = res_tx.send(response);
                    }
                    Ok(None) => {}
                    Err(_) => {
                        tracing::error!("Worker task panicked, no response sent");
                    }
                }
                active.fetch_sub(1, Ordering::AcqRel);
            }
        });
    if let Err(e) = spawned {
        tracing::error!(worker = name, error = %e, "Failed to spawn worker thread");
    }
}

/// Executes a single task on the current thread.
pub fn run_task(task: WorkerTask) -> Option<WorkerResponse> {
    match task {
        WorkerTask::ListFiles {
            root,
            request,
            limits,
            ignore,
            request_id,
        } => {
            let files = list_files(&root, &request, limits, &ignore);
            tracing::info!(
                request_id,
                query = %request.query,
                current_path = %request.current_path,
                count = files.len(),
                "Listed files"
            );
            Some(WorkerResponse::FileList { files, request_id })
        }
        WorkerTask::FetchCommands {
            source,
            cwd,
            query,
            request_id,
        } => {
            tracing::info!(request_id, cwd = %cwd.display(), "Fetching slash commands");
            let commands = resolve_commands(source.fetch_commands(&cwd), &query);
            Some(WorkerResponse::Commands {
                commands,
                request_id,
            })
        }
        WorkerTask::ResolveOpenFile {
            requested,
            base,
            request_id,
        } => match resolve_open_path(&requested, base.as_deref()) {
            Some(path) => Some(WorkerResponse::OpenFileResolved {
                requested,
                path,
                request_id,
            }),
            None => {
                tracing::error!(path = %requested, "File does not exist");
                Some(WorkerResponse::OpenFileMissing {
                    requested,
                    request_id,
                })
            }
        },
    }
}
