//! Progress reporting
//!
//! Progress output is observational only: reporters receive notifications
//! from the batch driver and never influence the rendered lines.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// 1-based position of the item about to be fetched
    pub completed: usize,
    /// Total items
    pub count: usize,
    /// Percentage the batch reaches once this item is done
    pub percent: u8,
    /// Human-readable status
    pub status: String,
}

/// Receives progress notifications during a batch
pub trait ProgressReporter {
    /// Called once before the first item
    fn start(&mut self, _count: usize) {}

    /// Called once per item
    fn update(&mut self, update: &ProgressUpdate);

    /// Called once after the last item
    fn finish(&mut self) {}
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn update(&mut self, _update: &ProgressUpdate) {}
}

/// Terminal progress bar on stderr
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Create a bar drawing to stderr; it is sized on `start`
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template(
            "  {bar:30.cyan/blue} {percent:>3}% [{pos}/{len}] {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&mut self, count: usize) {
        self.bar.set_length(count as u64);
        self.bar.set_position(0);
        self.bar.set_message("Starting");
    }

    fn update(&mut self, update: &ProgressUpdate) {
        self.bar.set_position(update.completed as u64);
        self.bar.set_message(update.status.clone());
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Collects every notification; used by tests and embedders
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    /// Value passed to `start`
    pub started: Option<usize>,
    /// Notifications in arrival order
    pub updates: Vec<ProgressUpdate>,
    /// Whether `finish` was called
    pub finished: bool,
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, count: usize) {
        self.started = Some(count);
    }

    fn update(&mut self, update: &ProgressUpdate) {
        self.updates.push(update.clone());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
