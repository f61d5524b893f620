//! Launching the installed binary.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, ShimError};

/// Run `exe` with `args`, stdio inherited from the shim, and return the exit
/// code to forward.
///
/// The child owns the terminal for its whole lifetime; nothing is captured
/// or transformed. A child that terminates without an exit code (killed by a
/// signal on Unix) maps to 0 — the shim makes no guarantees about
/// signal-based termination and picks the quiet default.
///
/// # Errors
///
/// [`ShimError::Launch`] when the process cannot be spawned at all.
pub async fn run(exe: &Path, args: &[OsString]) -> Result<i32> {
    debug!(exe = %exe.display(), argc = args.len(), "launching");
    let status = Command::new(exe)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| ShimError::Launch {
            program: exe.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(status.code().unwrap_or(0))
}
