//! HTTP fetching with manual redirect handling.
//!
//! Release downloads answer with a `302` pointing at the CDN, so the client
//! is built with automatic redirects disabled and the hop is followed
//! explicitly — through a bounded loop rather than recursion, so a broken or
//! hostile server cannot chain `Location` headers forever.
//!
//! Bodies stream straight to the destination file chunk by chunk; nothing is
//! buffered whole. Any failure mid-stream removes the partial file before
//! the error surfaces, so a destination path either holds a complete body or
//! does not exist.

use std::path::Path;

use futures::StreamExt;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, Url};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::constants::{MAX_REDIRECT_HOPS, USER_AGENT};
use crate::error::{Result, ShimError};
use crate::progress::DownloadProgress;

/// Downloads release files over HTTPS.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher with the identifying user agent and automatic
    /// redirects disabled (the redirect hop is handled in [`fetch`](Self::fetch)).
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(std::io::Error::other)?;
        Ok(Self { client })
    }

    /// GET `url` and stream the body to `dest`.
    ///
    /// Redirect responses carrying a `Location` header are followed for up
    /// to [`MAX_REDIRECT_HOPS`] hops; relative targets are resolved against
    /// the URL that issued them.
    ///
    /// # Errors
    ///
    /// - [`ShimError::Transport`] for connection failures, non-success
    ///   statuses, redirects without a `Location`, and any error while
    ///   writing the body. The partially written `dest` is removed first.
    /// - [`ShimError::TooManyRedirects`] when the hop bound is exceeded.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let mut target = Url::parse(url).map_err(|e| ShimError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        for _hop in 0..MAX_REDIRECT_HOPS {
            debug!(url = %target, "requesting");
            let response = self
                .client
                .get(target.clone())
                .send()
                .await
                .map_err(|e| transport(&target, e.to_string()))?;

            let status = response.status();
            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .ok_or_else(|| {
                        transport(&target, format!("redirect ({status}) without a Location header"))
                    })?;
                let next = target.join(location).map_err(|e| {
                    transport(&target, format!("invalid redirect target {location:?}: {e}"))
                })?;
                debug!(from = %target, to = %next, "following redirect");
                target = next;
                continue;
            }
            if !status.is_success() {
                return Err(transport(&target, format!("HTTP {status}")));
            }
            return stream_to_file(response, &target, dest).await;
        }

        Err(ShimError::TooManyRedirects {
            url: url.to_string(),
        })
    }
}

async fn stream_to_file(response: Response, url: &Url, dest: &Path) -> Result<()> {
    let total = response.content_length();
    let label = dest
        .file_name()
        .map_or_else(|| url.to_string(), |name| name.to_string_lossy().into_owned());
    let mut progress = DownloadProgress::start(&label, total);

    let mut file = File::create(dest)
        .await
        .map_err(|e| transport(url, format!("cannot create {}: {e}", dest.display())))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                drop(file);
                remove_partial(dest).await;
                return Err(transport(url, e.to_string()));
            }
        };
        if let Err(e) = file.write_all(&chunk).await {
            drop(file);
            remove_partial(dest).await;
            return Err(transport(url, format!("write failed: {e}")));
        }
        progress.advance(chunk.len() as u64);
    }
    if let Err(e) = file.flush().await {
        drop(file);
        remove_partial(dest).await;
        return Err(transport(url, format!("write failed: {e}")));
    }

    progress.finish();
    info!(url = %url, dest = %dest.display(), bytes = progress.transferred(), "download complete");
    Ok(())
}

/// Best-effort removal of a partially written destination.
async fn remove_partial(dest: &Path) {
    if let Err(e) = tokio::fs::remove_file(dest).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(dest = %dest.display(), error = %e, "could not remove partial download");
        }
    }
}

fn transport(url: &Url, reason: String) -> ShimError {
    ShimError::Transport {
        url: url.to_string(),
        reason,
    }
}
