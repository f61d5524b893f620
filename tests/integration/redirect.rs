//! Redirect handling: the fetcher must land on the payload, never the
//! redirect response body.

use std::collections::HashMap;

use goose_shim::config::spec_with_root;
use goose_shim::constants::CHECKSUMS_FILE;
use goose_shim::platform::{Arch, Platform};
use goose_shim::Installer;

use super::common::{manifest_body, release_path, sha256_hex, FixtureServer, Route};

const ASSET: &str = "goose_linux_x86_64";

#[tokio::test]
async fn asset_redirect_is_followed_to_the_real_payload() {
    let payload = b"the real binary bytes";
    let digest = sha256_hex(payload);
    let routes = HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            Route::Payload(manifest_body(&[(digest.as_str(), ASSET)])),
        ),
        // GitHub answers the release URL with a 302 to the CDN.
        (
            release_path(ASSET),
            Route::Redirect(format!("/cdn/{ASSET}")),
        ),
        (format!("/cdn/{ASSET}"), Route::Payload(payload.to_vec())),
    ]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec).unwrap();
    let exe = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&exe).unwrap(), payload);
}

#[tokio::test]
async fn two_hop_redirect_chain_still_resolves() {
    let payload = b"payload behind two hops";
    let digest = sha256_hex(payload);
    let routes = HashMap::from([
        (
            release_path(CHECKSUMS_FILE),
            Route::Payload(manifest_body(&[(digest.as_str(), ASSET)])),
        ),
        (
            release_path(ASSET),
            Route::Redirect("/hop1".to_string()),
        ),
        ("/hop1".to_string(), Route::Redirect("/hop2".to_string())),
        ("/hop2".to_string(), Route::Payload(payload.to_vec())),
    ]);
    let server = FixtureServer::start(routes).await;
    let root = tempfile::tempdir().unwrap();
    let spec = spec_with_root(&server.base_url(), root.path());

    let installer = Installer::new(spec).unwrap();
    let exe = installer
        .ensure_installed_for(Platform::Linux, Arch::X86_64)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&exe).unwrap(), payload);
}
