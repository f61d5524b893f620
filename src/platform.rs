//! Host platform resolution and release asset naming.
//!
//! Upstream publishes one pre-built binary per (OS, architecture) pair, named
//! by a fixed convention: `goose_{platform}_{arch}` with an `.exe` suffix on
//! Windows. This module maps the identifiers the host reports
//! ([`std::env::consts::OS`] / [`std::env::consts::ARCH`]) onto that
//! convention, and refuses anything outside the published matrix before a
//! single byte of network or filesystem work happens.
//!
//! # Supported matrix
//!
//! | OS       | upstream name | Arch            | upstream name |
//! |----------|---------------|-----------------|---------------|
//! | macOS    | `darwin`      | x86-64 / amd64  | `x86_64`      |
//! | Linux    | `linux`       | aarch64 / arm64 | `arm64`       |
//! | Windows  | `windows`     |                 |               |

use std::env;
use std::fmt;

use crate::error::{Result, ShimError};

/// Operating system identifier in the upstream release naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS (`darwin` in asset names).
    Darwin,
    /// Linux.
    Linux,
    /// Windows; assets and the installed binary carry an `.exe` suffix.
    Windows,
}

impl Platform {
    /// Resolve the platform of the running host.
    ///
    /// # Errors
    ///
    /// Returns [`ShimError::UnsupportedPlatform`] when the host OS has no
    /// upstream release. There is no fallback; the whole run aborts.
    pub fn current() -> Result<Self> {
        Self::from_os(env::consts::OS)
    }

    /// Map a host-reported OS string onto the upstream identifier.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" | "darwin" => Ok(Self::Darwin),
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Windows),
            other => Err(ShimError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Identifier string used in asset names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }

    /// Executable filename suffix for this platform.
    #[must_use]
    pub const fn exe_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CPU architecture identifier in the upstream release naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86 (`x86_64` in asset names; `amd64` accepted on input).
    X86_64,
    /// 64-bit ARM (`arm64` in asset names; `aarch64` accepted on input).
    Arm64,
}

impl Arch {
    /// Resolve the architecture of the running host.
    ///
    /// # Errors
    ///
    /// Returns [`ShimError::UnsupportedArchitecture`] when the host CPU has
    /// no upstream release.
    pub fn current() -> Result<Self> {
        Self::from_arch(env::consts::ARCH)
    }

    /// Map a host-reported architecture string onto the upstream identifier.
    pub fn from_arch(arch: &str) -> Result<Self> {
        match arch {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            other => Err(ShimError::UnsupportedArchitecture {
                arch: other.to_string(),
            }),
        }
    }

    /// Identifier string used in asset names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose the release asset filename for a tool on a platform/arch pair.
///
/// The name is deterministic: `{tool}_{platform}_{arch}` plus the platform's
/// executable suffix, matching the filenames listed in the release's checksum
/// manifest.
///
/// # Examples
///
/// ```
/// use goose_shim::platform::{asset_name, Arch, Platform};
///
/// assert_eq!(asset_name("goose", Platform::Linux, Arch::X86_64), "goose_linux_x86_64");
/// assert_eq!(asset_name("goose", Platform::Windows, Arch::Arm64), "goose_windows_arm64.exe");
/// ```
#[must_use]
pub fn asset_name(tool: &str, platform: Platform, arch: Arch) -> String {
    format!("{tool}_{platform}_{arch}{}", platform.exe_suffix())
}
