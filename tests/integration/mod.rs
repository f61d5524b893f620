//! Integration test suite for the goose shim.
//!
//! Every test runs the real pipeline against a local fixture HTTP server
//! (see `tests/common`); nothing here touches the network.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Organization:
//! - **install**: first-install commit, idempotency, checksum gating,
//!   temp-file cleanup on failure
//! - **redirect**: redirect following writes the payload, not the redirect
//!   response
//! - **cli**: the compiled `goose` binary end to end — exit-code forwarding
//!   and failure behavior

#[path = "../common/mod.rs"]
mod common;

mod install;
mod redirect;
