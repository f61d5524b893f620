//! Install orchestration: resolve, fetch, verify, commit.
//!
//! The pipeline is strictly linear. The platform is resolved before any I/O;
//! the checksum manifest is fully downloaded before the asset download
//! starts; the asset is fully downloaded before its digest is computed; and
//! only a digest match lets the temp file be renamed into the executable
//! path. No partially verified file is ever exec'd, because nothing but the
//! post-verification rename ever writes to the final path.
//!
//! # Idempotency
//!
//! The final executable already existing is the primary fast path: every run
//! after the first returns immediately with zero network requests and zero
//! filesystem writes.
//!
//! # Concurrent first installs
//!
//! Two processes racing the first install both download and both rename.
//! There is deliberately no lock file: the rename is atomic, release content
//! is immutable per version, so the last writer wins and both end up with an
//! identical binary.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::checksum::{self, ChecksumManifest};
use crate::config::ToolSpec;
use crate::constants::CHECKSUMS_FILE;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::platform::{asset_name, Arch, Platform};

/// Downloads, verifies and commits the tool binary described by a
/// [`ToolSpec`].
pub struct Installer {
    spec: ToolSpec,
    fetcher: Fetcher,
}

impl Installer {
    /// Build an installer for `spec`.
    pub fn new(spec: ToolSpec) -> Result<Self> {
        Ok(Self {
            spec,
            fetcher: Fetcher::new()?,
        })
    }

    /// The spec this installer serves.
    #[must_use]
    pub fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    /// Ensure the binary for the running host is installed; returns its path.
    ///
    /// Platform resolution runs first and fails fast — an unsupported host
    /// never touches the network or the filesystem.
    pub async fn ensure_installed(&self) -> Result<PathBuf> {
        let platform = Platform::current()?;
        let arch = Arch::current()?;
        self.ensure_installed_for(platform, arch).await
    }

    /// Ensure the binary for an explicit platform/arch pair is installed.
    ///
    /// On the slow path this creates `bin/`, downloads `checksums.txt` and
    /// the release asset (the latter to a `.temp` name, never the final
    /// one), verifies the asset's SHA-256 against the manifest, renames it
    /// into place and grants mode 0755. Any failure removes the temp file
    /// and leaves the final path untouched; the transient manifest file is
    /// removed after every attempt, success or not.
    pub async fn ensure_installed_for(&self, platform: Platform, arch: Arch) -> Result<PathBuf> {
        let exe = self.spec.executable_path(platform);
        if exe.exists() {
            debug!(exe = %exe.display(), "already installed");
            return Ok(exe);
        }

        let bin_dir = self.spec.bin_dir();
        tokio::fs::create_dir_all(&bin_dir).await?;

        let asset = asset_name(&self.spec.tool, platform, arch);
        let manifest_path = bin_dir.join(CHECKSUMS_FILE);
        let temp = bin_dir.join(format!("{asset}.temp"));

        info!(
            "downloading {} v{} for {platform}/{arch}",
            self.spec.tool, self.spec.version
        );
        let result = self
            .download_verify_commit(&asset, &manifest_path, &temp, &exe)
            .await;

        remove_quietly(&manifest_path).await;
        if result.is_err() {
            // Catch-all: no failure path may leave the temp artifact behind.
            remove_quietly(&temp).await;
        }
        result.map(|()| exe)
    }

    async fn download_verify_commit(
        &self,
        asset: &str,
        manifest_path: &Path,
        temp: &Path,
        exe: &Path,
    ) -> Result<()> {
        self.fetcher
            .fetch(&self.spec.release_url(CHECKSUMS_FILE), manifest_path)
            .await?;
        self.fetcher
            .fetch(&self.spec.release_url(asset), temp)
            .await?;

        let manifest = ChecksumManifest::load(manifest_path).await?;
        checksum::verify(&manifest, asset, temp).await?;

        tokio::fs::rename(temp, exe).await?;
        set_executable(exe).await?;
        info!(exe = %exe.display(), "installed");
        Ok(())
    }
}

#[cfg(unix)]
async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
    Ok(())
}

// Windows derives executability from the .exe extension.
#[cfg(not(unix))]
async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Best-effort removal of a transient file.
async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "could not remove transient file");
        }
    }
}
