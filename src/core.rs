//! Core engine of the bridge.
//!
//! This module contains the pieces that do not depend on any host:
//! - [fm]: file entries, directory listing and path helpers (see [FileEntry], [list_children]).
//! - [find]: the bounded recursive query search (see [search], [list_files]).
//! - [ignore]: the ignore-list of noise directories and files.
//! - [formatter]: result ordering and separator normalization.
//! - [protocol]: inbound payloads, outbound bodies and JavaScript callback snippets.
//! - [worker]: background threads and the messages they exchange with the bridge state.
//! - [proc]: launching editors and browsers.
//!
//! Most callers will import [FileEntry], [IgnoreList] and [list_files] from this module.

pub mod find;
pub mod fm;
pub mod formatter;
pub mod ignore;
pub mod proc;
pub mod protocol;
pub mod worker;

pub use find::{QueryMatcher, SearchLimits, list_files, search};
pub use fm::{EntryKind, FileEntry, list_children, resolve_open_path, resolve_subpath, to_relative};
pub use formatter::{compare_entries, normalize_separators, sort_entries};
pub use ignore::{DEFAULT_IGNORED, IgnoreList};
