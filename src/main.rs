//! Entry point for the `goose` wrapper binary.
//!
//! The shim defines no flags of its own: every argument is forwarded
//! verbatim to the installed binary. Diagnostics (tracing output, progress,
//! errors) go to stderr so the child's stdout stays untouched.

use std::env;
use std::ffi::OsString;
use std::process;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use goose_shim::{launcher, Installer, Result, ToolSpec};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match run().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let spec = ToolSpec::from_env()?;
    let installer = Installer::new(spec)?;
    let exe = installer.ensure_installed().await?;

    let args: Vec<OsString> = env::args_os().skip(1).collect();
    launcher::run(&exe, &args).await
}
