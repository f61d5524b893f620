//! Checksum manifest parsing and the SHA-256 verification gate.
//!
//! Every release ships a `checksums.txt` next to its binaries: one record per
//! line, `<hex-digest>` and `<filename>` separated by two literal spaces (the
//! `sha256sum` text format). The manifest is parsed fresh on every install
//! attempt and never persisted beyond its transient download.
//!
//! Verification is mandatory and blocking: the installer refuses to rename a
//! downloaded asset into place until its streamed SHA-256 digest equals the
//! manifest's recorded value for that exact filename. A filename the
//! manifest does not list fails the same way a wrong digest does.

use std::collections::HashMap;
use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::constants::DIGEST_CHUNK_SIZE;
use crate::error::{Result, ShimError};

/// Parsed mapping from release asset filename to expected hex digest.
#[derive(Debug, Clone, Default)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parse manifest text.
    ///
    /// Lines without the two-space separator, and lines where either field
    /// is empty, are skipped silently — blank trailing lines and commentary
    /// simply never become entries. Digests are normalized to lowercase.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            let Some((digest, filename)) = line.split_once("  ") else {
                continue;
            };
            let digest = digest.trim();
            let filename = filename.trim();
            if digest.is_empty() || filename.is_empty() {
                continue;
            }
            entries.insert(filename.to_string(), digest.to_ascii_lowercase());
        }
        Self { entries }
    }

    /// Read and parse a manifest file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse(&content))
    }

    /// Expected digest for an asset filename, if the manifest lists it.
    #[must_use]
    pub fn digest_for(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Number of parsed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no records parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the SHA-256 digest of a file, streaming it in fixed-size chunks.
///
/// Returns the lowercase hex encoding. The file is never loaded whole, so
/// memory use stays bounded regardless of binary size.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; DIGEST_CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Check a downloaded file against the manifest entry for `asset`.
///
/// # Errors
///
/// [`ShimError::ChecksumMismatch`] when the computed digest disagrees with
/// the recorded one, or when the manifest has no entry for `asset` at all —
/// an absent expected value never equals any digest, so both cases gate the
/// install identically.
pub async fn verify(manifest: &ChecksumManifest, asset: &str, path: &Path) -> Result<()> {
    let actual = sha256_file(path).await?;
    match manifest.digest_for(asset) {
        Some(expected) if expected.eq_ignore_ascii_case(&actual) => {
            debug!(asset, digest = %actual, "checksum verified");
            Ok(())
        }
        Some(expected) => Err(ShimError::ChecksumMismatch {
            asset: asset.to_string(),
            expected: expected.to_string(),
            actual,
        }),
        None => {
            warn!(asset, "checksum manifest has no entry for asset");
            Err(ShimError::ChecksumMismatch {
                asset: asset.to_string(),
                expected: ShimError::NO_MANIFEST_ENTRY.to_string(),
                actual,
            })
        }
    }
}
