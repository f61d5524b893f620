//! Error handling for the goose shim.
//!
//! Every failure the install pipeline can hit is a [`ShimError`] variant, so
//! callers (and tests) can match on the failure kind instead of scraping
//! message strings. The binary converts whatever bubbles up into a single
//! colored line on stderr and exits with code 1; only a launched child gets
//! to pick its own exit code.
//!
//! # Failure categories
//!
//! - **Pre-flight**: [`ShimError::UnsupportedPlatform`] and
//!   [`ShimError::UnsupportedArchitecture`] fire before any network or
//!   filesystem activity and leave no partial state behind.
//! - **Download**: [`ShimError::Transport`] for network or write failures
//!   while fetching, [`ShimError::TooManyRedirects`] when a redirect chain
//!   exceeds the hop bound. Partial destination files are removed before the
//!   error surfaces.
//! - **Verification**: [`ShimError::ChecksumMismatch`] when the computed
//!   digest disagrees with the manifest, or when the manifest has no entry
//!   for the asset at all. The temp file is deleted and the final executable
//!   path is never touched.
//! - **Launch**: [`ShimError::Launch`] when the installed binary cannot be
//!   spawned.
//!
//! There is no retry logic anywhere: a transient network blip means the user
//! re-invokes the tool.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShimError>;

/// All failure modes of the install-and-launch pipeline.
#[derive(Error, Debug)]
pub enum ShimError {
    /// The host operating system has no corresponding release asset.
    ///
    /// Fatal and pre-flight: resolution runs before any I/O, there is no
    /// fallback and nothing to clean up.
    #[error("unsupported platform: {os} (expected macos, linux or windows)")]
    UnsupportedPlatform {
        /// The OS identifier the host reported.
        os: String,
    },

    /// The host CPU architecture has no corresponding release asset.
    #[error("unsupported architecture: {arch} (expected x86_64 or arm64)")]
    UnsupportedArchitecture {
        /// The architecture identifier the host reported.
        arch: String,
    },

    /// A download failed at the network or write-to-disk layer.
    ///
    /// Covers connection errors, non-success HTTP statuses and I/O errors
    /// while streaming the body. The partially written destination file has
    /// already been removed by the time this surfaces.
    #[error("failed to download {url}: {reason}")]
    Transport {
        /// The URL the fetch was addressing when it failed.
        url: String,
        /// Human-readable cause (status line, connection error, write error).
        reason: String,
    },

    /// A redirect chain exceeded the hop bound.
    ///
    /// Real releases redirect exactly once (to the CDN); anything deeper is a
    /// broken or hostile server, and the bounded loop refuses to chase it.
    #[error("too many redirects while fetching {url}")]
    TooManyRedirects {
        /// The originally requested URL.
        url: String,
    },

    /// The downloaded asset's digest disagrees with the checksum manifest.
    ///
    /// A manifest with no entry for the asset is the same failure: an absent
    /// expected value never equals a computed digest. In that case `expected`
    /// reads `(no manifest entry)`.
    #[error("checksum mismatch for {asset}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Release asset filename the manifest was queried for.
        asset: String,
        /// Digest recorded in the manifest, or `(no manifest entry)`.
        expected: String,
        /// Digest computed from the downloaded file.
        actual: String,
    },

    /// The verified, installed binary could not be spawned.
    #[error("failed to launch {program}: {reason}")]
    Launch {
        /// Path of the binary the shim tried to execute.
        program: PathBuf,
        /// Underlying spawn error.
        reason: String,
    },

    /// Filesystem failure outside a download (directory creation, rename,
    /// permission change, manifest read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShimError {
    /// Expected-digest placeholder for assets the manifest does not list.
    pub(crate) const NO_MANIFEST_ENTRY: &'static str = "(no manifest entry)";
}
