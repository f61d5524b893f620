//! Process-wide immutable configuration values.
//!
//! Everything here is baked in at compile time; runtime overrides go through
//! [`crate::config::ToolSpec`] instead of mutating globals.

/// GitHub owner of the upstream release repository.
pub const GITHUB_OWNER: &str = "pressly";

/// GitHub repository name of the upstream release repository.
pub const GITHUB_REPO: &str = "goose";

/// Base name of the tool binary (release assets and the installed file both
/// derive from it).
pub const TOOL_NAME: &str = "goose";

/// Pinned upstream release version. The shim's own crate version tracks the
/// wrapped tool release, so the pin is simply our package version.
pub const PINNED_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default host serving release downloads.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Filename of the checksum manifest attached to every release.
pub const CHECKSUMS_FILE: &str = "checksums.txt";

/// Identifying user agent sent with every request.
pub const USER_AGENT: &str = concat!("goose-shim/", env!("CARGO_PKG_VERSION"));

/// Maximum redirect hops a single fetch will follow.
///
/// Release downloads redirect exactly once in practice; the bound exists so a
/// misconfigured or malicious server cannot keep the fetcher chasing
/// `Location` headers forever.
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Read buffer size for streaming digest computation (64 KiB).
pub const DIGEST_CHUNK_SIZE: usize = 64 * 1024;
