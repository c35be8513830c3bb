//! Elapsed-time spinner shown while a vision API call is in flight.
//!
//! The animation runs on indicatif's steady-tick thread. [`ProgressIndicator::stop`]
//! finishes the bar, which stops and joins that thread, and only then writes
//! the final status line, so no stale frame can land after it.
//!
//! The running bar is also registered globally so the log writer can hide it
//! while a log line is written (see [`suspend_active`]).

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// The bar currently on screen, if any.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Run `f` with the active spinner (if any) cleared from the terminal, then
/// redraw it.
pub fn suspend_active<R>(f: impl FnOnce() -> R) -> R {
    let active = ACTIVE_BAR.lock().ok().and_then(|bar| bar.clone());
    match active {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

fn set_active(bar: Option<ProgressBar>) {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = bar;
    }
}

/// Redraw interval of the animation.
const TICK_INTERVAL: Duration = Duration::from_millis(300);

/// Animation frames; indicatif uses the last entry as the finished frame.
const TICK_FRAMES: &[&str] = &[".  ", ".. ", "...", " ..", "  .", "   ", "   "];

/// A running spinner with a message and a start time.
pub struct ProgressIndicator {
    bar: ProgressBar,
    message: String,
    start: Instant,
    out: Box<dyn Write + Send>,
}

impl ProgressIndicator {
    /// Start a spinner on stderr.
    pub fn start(message: &str) -> Self {
        Self::start_with(
            message,
            ProgressDrawTarget::stderr(),
            Box::new(std::io::stderr()),
        )
    }

    /// Start a spinner that draws nothing and discards its status line.
    pub fn hidden(message: &str) -> Self {
        Self::start_with(
            message,
            ProgressDrawTarget::hidden(),
            Box::new(std::io::sink()),
        )
    }

    pub(crate) fn start_with(
        message: &str,
        target: ProgressDrawTarget,
        out: Box<dyn Write + Send>,
    ) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        set_active(Some(bar.clone()));

        Self {
            bar,
            message: message.to_string(),
            start: Instant::now(),
            out,
        }
    }

    /// Run `f` with this spinner cleared from the terminal, then redraw it.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.bar.suspend(f)
    }

    /// Stop the animation and print `Done`/`Failed` with the elapsed time.
    ///
    /// Returns the elapsed time.
    pub fn stop(mut self, success: bool, reason: Option<&str>) -> Duration {
        set_active(None);
        self.bar.finish_and_clear();
        let elapsed = self.start.elapsed();

        let lines = status_lines(&self.message, success, elapsed, reason);
        if let Err(e) = self.out.write_all(lines.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::debug!("Could not write progress status: {e}");
        }
        elapsed
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("  {msg} {spinner} ({secs})")
        .unwrap()
        .tick_strings(TICK_FRAMES)
        .with_key("secs", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.elapsed().as_secs_f64());
        })
}

/// Final status text: one status line plus an optional reason line.
pub fn status_lines(
    message: &str,
    success: bool,
    elapsed: Duration,
    reason: Option<&str>,
) -> String {
    let status = if success { "Done" } else { "Failed" };
    let mut lines = format!(
        "  {message} -> {status}! ({:.1}s)\n",
        elapsed.as_secs_f64()
    );
    if let Some(reason) = reason.filter(|r| !r.is_empty()) {
        let _ = writeln!(lines, "    Reason: {reason}");
    }
    lines
}
