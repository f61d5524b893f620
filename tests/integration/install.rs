//! Install pipeline behavior: commit, idempotency, checksum gate, cleanup.

use std::collections::HashMap;

use goose_shim::config::spec_with_root;
use goose_shim::constants::CHECKSUMS_FILE;
use goose_shim::platform::{Arch, Platform};
use goose_shim::{Installer, ShimError};

use super::common::{manifest_body, release_path, sha256_hex, FixtureServer, Route};

const ASSET: &str = "goose_linux_x86_64";

/// Routes serving a valid manifest + asset pair for linux/x86_64.
fn happy_routes(payload: &[u8]) -> HashMap<String, Route> {
    let digest = sha256_hex(payload);
    HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            Route::Payload(manifest_body(&[(digest.as_str(), ASSET)])),
        ),
        (release_path(ASSET), Route::Payload(payload.to_vec())),
    ])
}

#[tokio::test]
async fn first_install_commits_the_verified_binary() {
    let payload = b"#!/bin/sh\nexit 0\n";
    let server = FixtureServer::start(happy_routes(payload)).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let exe = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    assert_eq!(exe, spec.executable_path(Platform::Linux));
    assert_eq!(std::fs::read(&exe).unwrap(), payload);

    // Transient files never outlive the attempt.
    let bin_dir = spec.bin_dir();
    assert!(!bin_dir.join(format!("{ASSET}.temp")).exists());
    assert!(!bin_dir.join(CHECKSUMS_FILE).exists());
}

#[cfg(unix)]
#[tokio::test]
async fn installed_binary_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let payload = b"#!/bin/sh\nexit 0\n";
    let server = FixtureServer::start(happy_routes(payload)).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec).unwrap();
    let exe = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    let mode = std::fs::metadata(&exe).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[tokio::test]
async fn second_install_needs_no_network() {
    let payload = b"binary payload";
    let server = FixtureServer::start(happy_routes(payload)).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let exe = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    // With the server gone, any request would fail; the fast path must not
    // issue one.
    server.shutdown();
    let again = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    assert_eq!(exe, again);
    assert_eq!(std::fs::read(&again).unwrap(), payload);
}

#[tokio::test]
async fn wrong_digest_fails_and_removes_the_temp_file() {
    let payload = b"tampered payload";
    let zeros = "0".repeat(64);
    let routes = HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            Route::Payload(manifest_body(&[(zeros.as_str(), ASSET)])),
        ),
        (release_path(ASSET), Route::Payload(payload.to_vec())),
    ]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let err = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap_err();

    assert!(matches!(err, ShimError::ChecksumMismatch { .. }));
    assert!(!spec.bin_dir().join(format!("{ASSET}.temp")).exists());
    assert!(!spec.executable_path(Platform::Linux).exists());
}

#[tokio::test]
async fn asset_absent_from_manifest_fails_the_same_way() {
    let payload = b"payload";
    let digest = sha256_hex(payload);
    let routes = HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            // The manifest knows a different asset, not ours.
            Route::Payload(manifest_body(&[(digest.as_str(), "goose_darwin_arm64")])),
        ),
        (release_path(ASSET), Route::Payload(payload.to_vec())),
    ]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let err = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap_err();

    assert!(matches!(err, ShimError::ChecksumMismatch { .. }));
    assert!(!spec.bin_dir().join(format!("{ASSET}.temp")).exists());
    assert!(!spec.executable_path(Platform::Linux).exists());
}

#[tokio::test]
async fn asset_connection_failure_after_manifest_success() {
    let digest = sha256_hex(b"whatever");
    let routes = HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            Route::Payload(manifest_body(&[(digest.as_str(), ASSET)])),
        ),
        (release_path(ASSET), Route::Disconnect),
    ]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let err = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap_err();

    assert!(matches!(err, ShimError::Transport { .. }));
    assert!(!spec.bin_dir().join(format!("{ASSET}.temp")).exists());
    assert!(!spec.executable_path(Platform::Linux).exists());
}

#[tokio::test]
async fn missing_release_asset_is_a_transport_error() {
    let digest = sha256_hex(b"payload");
    // Manifest resolves, but the asset route does not exist (404).
    let routes = HashMap::from([(
        release_path(CHECKSUMS_FILE),
        Route::Payload(manifest_body(&[(digest.as_str(), ASSET)])),
    )]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec.clone()).unwrap();
    let err = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap_err();

    match err {
        ShimError::Transport { reason, .. } => assert!(reason.contains("404")),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(!spec.bin_dir().join(format!("{ASSET}.temp")).exists());
}
