//! goose-shim — installer shim for the `goose` migration tool.
//!
//! The shim stands in for the real `goose` binary: on first run it resolves
//! the host platform, downloads the matching pre-built asset from the pinned
//! `pressly/goose` GitHub release, verifies its SHA-256 against the
//! release's `checksums.txt`, commits it with an atomic rename + mode 0755,
//! and then launches it with the caller's arguments, stdio and exit code
//! passed straight through. Every later run finds the binary already
//! installed and goes directly to launch.
//!
//! # Pipeline
//!
//! Control flow is strictly linear, one suspension point at a time:
//!
//! ```text
//! platform resolve ─▶ fetch checksums.txt ─▶ fetch asset (.temp)
//!        ─▶ SHA-256 verify ─▶ rename + chmod ─▶ exec
//! ```
//!
//! # Modules
//!
//! - [`platform`] — host OS/arch mapping onto the release naming scheme
//! - [`config`] — upstream coordinates as an injectable [`config::ToolSpec`]
//! - [`fetch`] — GET with bounded manual redirect following, streaming to disk
//! - [`checksum`] — manifest parsing and the streaming SHA-256 gate
//! - [`install`] — orchestration, idempotency fast path, atomic commit
//! - [`launcher`] — child process spawn with inherited stdio
//! - [`progress`] — download progress display and byte formatting
//! - [`error`] — the typed failure surface, [`error::ShimError`]
//!
//! # Failure policy
//!
//! No retries anywhere: any install-phase failure aborts the run with a
//! message on stderr and exit code 1, leaving no temp artifacts behind. Once
//! the child is running, its exit code is the shim's exit code.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod install;
pub mod launcher;
pub mod platform;
pub mod progress;

pub use config::ToolSpec;
pub use error::{Result, ShimError};
pub use install::Installer;
