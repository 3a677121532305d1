//! Terminal spinner reporting which package is being looked up.
//!
//! Hidden when disabled by flag, when `LNFUND_NO_PROGRESS` is set, or when
//! stderr is not a terminal (indicatif skips drawing there). Log lines go
//! through [`SuspendingWriter`] so they never land on top of the spinner.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lnfund_core::{ProgressSink, ResolveStats};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

fn is_progress_disabled() -> bool {
    std::env::var_os("LNFUND_NO_PROGRESS").is_some()
}

/// Single self-overwriting status line
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// Drive `bar`, which starts hidden and is shown only when `enabled`.
    pub fn new(bar: ProgressBar, enabled: bool) -> Self {
        if enabled && !is_progress_disabled() {
            bar.set_draw_target(ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self { bar }
    }
}

impl ProgressSink for SpinnerProgress {
    fn started(&self) {
        self.bar.set_message("Analyzing your package.json...");
    }

    fn analyzing(&self, package: &str) {
        self.bar.set_message(format!("Analyzing package: {}", package));
    }

    fn finished(&self, _stats: &ResolveStats) {
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Writer that clears the spinner while a log line is written.
pub struct SuspendingWriter<W> {
    bar: ProgressBar,
    inner: W,
}

impl<W: Write> SuspendingWriter<W> {
    pub fn new(bar: ProgressBar, inner: W) -> Self {
        Self { bar, inner }
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| self.inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.bar.suspend(|| self.inner.flush())
    }
}

/// Log destination for `tracing-subscriber`: stderr, around the spinner.
pub struct StderrLog {
    bar: ProgressBar,
}

impl StderrLog {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl<'a> MakeWriter<'a> for StderrLog {
    type Writer = SuspendingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter::new(self.bar.clone(), io::stderr())
    }
}
