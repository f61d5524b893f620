//! Upstream coordinates and install location, as one injectable value.
//!
//! The original constants (repository, pinned version, download host) travel
//! in a [`ToolSpec`] that is passed explicitly into the fetcher and
//! installer. Tests point `base_url` at a local fixture server and
//! `install_root` at a temp directory instead of patching globals.
//!
//! # Environment overrides
//!
//! [`ToolSpec::from_env`] starts from the pinned defaults and applies:
//!
//! - `GOOSE_SHIM_BASE_URL` — replaces `https://github.com` (mock endpoints,
//!   mirrors)
//! - `GOOSE_SHIM_HOME` — replaces the default install root
//! - `GOOSE_SHIM_VERSION` — replaces the pinned release version

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BASE_URL, GITHUB_OWNER, GITHUB_REPO, PINNED_VERSION, TOOL_NAME,
};
use crate::error::Result;
use crate::platform::Platform;

/// Everything the pipeline needs to know about the upstream release and
/// where to put its binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Release repository owner (e.g. `pressly`).
    pub owner: String,
    /// Release repository name (e.g. `goose`).
    pub repo: String,
    /// Base name of the tool binary.
    pub tool: String,
    /// Pinned release version, without the `v` tag prefix.
    pub version: String,
    /// Scheme + host serving release downloads.
    pub base_url: String,
    /// Directory whose `bin/` subdirectory holds the installed binary.
    pub install_root: PathBuf,
}

impl ToolSpec {
    /// The built-in spec: `pressly/goose` at the version this crate pins,
    /// installed under the platform data directory.
    ///
    /// # Errors
    ///
    /// Fails only when the platform data directory cannot be determined
    /// (e.g. `HOME`/`APPDATA` unset).
    pub fn pinned() -> Result<Self> {
        Ok(Self {
            owner: GITHUB_OWNER.to_string(),
            repo: GITHUB_REPO.to_string(),
            tool: TOOL_NAME.to_string(),
            version: PINNED_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            install_root: default_install_root()?,
        })
    }

    /// The pinned spec with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut spec = Self::pinned()?;
        if let Ok(base) = env::var("GOOSE_SHIM_BASE_URL") {
            spec.base_url = base.trim_end_matches('/').to_string();
        }
        if let Ok(home) = env::var("GOOSE_SHIM_HOME") {
            spec.install_root = PathBuf::from(home);
        }
        if let Ok(version) = env::var("GOOSE_SHIM_VERSION") {
            spec.version = version.trim_start_matches('v').to_string();
        }
        Ok(spec)
    }

    /// Directory holding the installed binary and transient download files.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.install_root.join("bin")
    }

    /// Final path of the installed executable for a platform.
    #[must_use]
    pub fn executable_path(&self, platform: Platform) -> PathBuf {
        self.bin_dir()
            .join(format!("{}{}", self.tool, platform.exe_suffix()))
    }

    /// Download URL for a file attached to the pinned release.
    ///
    /// # Examples
    ///
    /// ```
    /// use goose_shim::config::ToolSpec;
    /// use std::path::PathBuf;
    ///
    /// let spec = ToolSpec {
    ///     owner: "pressly".into(),
    ///     repo: "goose".into(),
    ///     tool: "goose".into(),
    ///     version: "3.26.0".into(),
    ///     base_url: "https://github.com".into(),
    ///     install_root: PathBuf::from("/tmp"),
    /// };
    /// assert_eq!(
    ///     spec.release_url("checksums.txt"),
    ///     "https://github.com/pressly/goose/releases/download/v3.26.0/checksums.txt"
    /// );
    /// ```
    #[must_use]
    pub fn release_url(&self, file: &str) -> String {
        format!(
            "{}/{}/{}/releases/download/v{}/{}",
            self.base_url, self.owner, self.repo, self.version, file
        )
    }
}

/// `{data_dir}/goose-shim`, following platform conventions (XDG on Linux,
/// `Application Support` on macOS, `%APPDATA%` on Windows).
fn default_install_root() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("goose-shim"))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine the platform data directory; \
                 set GOOSE_SHIM_HOME to choose an install location",
            )
            .into()
        })
}

/// A spec pointing at an arbitrary root, used by tests.
#[must_use]
pub fn spec_with_root(base_url: &str, install_root: &Path) -> ToolSpec {
    ToolSpec {
        owner: GITHUB_OWNER.to_string(),
        repo: GITHUB_REPO.to_string(),
        tool: TOOL_NAME.to_string(),
        version: PINNED_VERSION.to_string(),
        base_url: base_url.trim_end_matches('/').to_string(),
        install_root: install_root.to_path_buf(),
    }
}
