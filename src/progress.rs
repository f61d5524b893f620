//! Download progress reporting.
//!
//! Wraps `indicatif` with the crate's house style: a percentage bar while the
//! server announced a `Content-Length`, a spinner with a running byte count
//! otherwise. The message line always carries the cumulative transfer size in
//! binary-prefixed units and, once per second and on the final chunk, the
//! instantaneous throughput.
//!
//! Progress rendering is display-only — it never gates or schedules anything.
//! It disables itself when the `GOOSE_SHIM_NO_PROGRESS` environment variable
//! is set, for CI logs and scripts.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// Minimum interval between throughput re-samples.
const RATE_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

fn is_progress_disabled() -> bool {
    std::env::var("GOOSE_SHIM_NO_PROGRESS").is_ok()
}

/// Format a byte count with binary prefixes (1024-based).
///
/// # Examples
///
/// ```
/// use goose_shim::progress::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Bytes");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} Bytes");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Format a transfer rate as `<size>/s`.
#[must_use]
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec.max(0.0) as u64))
}

/// Live progress display for a single download.
///
/// Created by the fetcher once response headers are in (so the total size is
/// known if the server sent one), advanced per body chunk, finished when the
/// stream ends. Dropping it without [`finish`](Self::finish) leaves the bar
/// unfinished, which `indicatif` renders as an interrupted transfer — exactly
/// right for the error paths.
pub struct DownloadProgress {
    bar: ProgressBar,
    sized: bool,
    transferred: u64,
    window_started: Instant,
    window_bytes: u64,
}

impl DownloadProgress {
    /// Start a progress display for `label`, with the total byte count when
    /// the response carried a valid `Content-Length`.
    #[must_use]
    pub fn start(label: &str, total: Option<u64>) -> Self {
        let bar = if is_progress_disabled() {
            ProgressBar::hidden()
        } else if let Some(total) = total {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {percent:>3}% {msg}")
                    .unwrap()
                    .progress_chars("━╸━"),
            );
            bar
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{prefix:.bold.cyan} {spinner:.cyan} {msg}")
                    .unwrap()
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_prefix(label.to_string());
        Self {
            bar,
            sized: total.is_some(),
            transferred: 0,
            window_started: Instant::now(),
            window_bytes: 0,
        }
    }

    /// Record `bytes` more transferred; re-renders the byte count and, at
    /// most once per second, the throughput.
    pub fn advance(&mut self, bytes: u64) {
        self.transferred += bytes;
        self.window_bytes += bytes;
        if self.sized {
            self.bar.set_position(self.transferred);
        }

        let elapsed = self.window_started.elapsed();
        if elapsed >= RATE_SAMPLE_INTERVAL {
            let rate = self.window_bytes as f64 / elapsed.as_secs_f64();
            self.bar.set_message(format!(
                "{} ({})",
                format_bytes(self.transferred),
                format_rate(rate)
            ));
            self.window_started = Instant::now();
            self.window_bytes = 0;
        } else {
            self.bar.set_message(format_bytes(self.transferred));
        }
    }

    /// Total bytes recorded so far.
    #[must_use]
    pub fn transferred(&self) -> u64 {
        self.transferred
    }

    /// Complete the display with a final size + throughput sample.
    pub fn finish(&self) {
        let elapsed = self.window_started.elapsed();
        let message = if elapsed.as_secs_f64() > 0.0 && self.window_bytes > 0 {
            let rate = self.window_bytes as f64 / elapsed.as_secs_f64();
            format!("{} ({})", format_bytes(self.transferred), format_rate(rate))
        } else {
            format_bytes(self.transferred)
        };
        self.bar.finish_with_message(message);
    }
}
