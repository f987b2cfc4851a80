//! Batch driver
//!
//! Resolves the selector and template once, then processes every address
//! in input order. Setup problems (empty input, bad selector, bad template)
//! fail the whole call before any fetch; per-item failures are absorbed and
//! rendered as `n/a`.

pub mod processor;
pub mod report;
pub mod state;

pub use processor::{process_item, ItemProcessor};
pub use report::{BatchReport, BatchSummary, ItemOutcome, ItemRecord};
pub use state::{percent, BatchState};

use crate::error::{Error, Result};
use crate::extraction::{resolve, Query};
use crate::fetch::{FetchConfig, Fetcher, HttpFetcher};
use crate::progress::{BarProgress, NoProgress, ProgressReporter};
use crate::template::OutputTemplate;
use tracing::{info, instrument};

/// Per-call batch options
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Output template (default: `$Value <<< $Uri`)
    pub template: OutputTemplate,
    /// Show a progress bar on stderr for the duration of the call
    pub show_progress: bool,
}

impl BatchOptions {
    /// Options with the default template and no progress bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and set the output template
    pub fn template(mut self, template: &str) -> Result<Self> {
        self.template = OutputTemplate::parse(template)?;
        Ok(self)
    }

    /// Enable/disable the progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Runs batches against a fetcher
pub struct BatchDriver<F> {
    fetcher: F,
}

impl BatchDriver<HttpFetcher> {
    /// Driver with an HTTP fetcher built from `config`
    pub fn http(config: FetchConfig) -> Result<Self> {
        Ok(Self::new(HttpFetcher::new(config)?))
    }
}

impl<F: Fetcher> BatchDriver<F> {
    /// Create a driver
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Run a batch and return the rendered lines in input order
    pub async fn run<S: AsRef<str>>(
        &self,
        uris: &[S],
        attrib: &str,
        options: &BatchOptions,
    ) -> Result<Vec<String>> {
        Ok(self.run_report(uris, attrib, options).await?.into_lines())
    }

    /// Run a batch and return per-item records plus totals
    pub async fn run_report<S: AsRef<str>>(
        &self,
        uris: &[S],
        attrib: &str,
        options: &BatchOptions,
    ) -> Result<BatchReport> {
        if uris.is_empty() {
            return Err(Error::EmptyInput);
        }
        let query = resolve(attrib)?;

        if options.show_progress {
            let mut bar = BarProgress::new();
            Ok(self.run_query(uris, &query, &options.template, &mut bar).await)
        } else {
            Ok(self
                .run_query(uris, &query, &options.template, &mut NoProgress)
                .await)
        }
    }

    /// Run an already-resolved query with an explicit progress reporter
    #[instrument(skip_all, fields(count = uris.len(), query = %query))]
    pub async fn run_query<S: AsRef<str>>(
        &self,
        uris: &[S],
        query: &Query,
        template: &OutputTemplate,
        progress: &mut dyn ProgressReporter,
    ) -> BatchReport {
        info!("Processing {} addresses", uris.len());

        let processor = ItemProcessor::new(&self.fetcher, query, template);
        let mut state = BatchState::new(uris.len());
        let mut report = BatchReport::default();

        progress.start(uris.len());
        for uri in uris {
            let record = processor.process(uri.as_ref(), &mut state, progress).await;
            report.push(record);
        }
        progress.finish();

        let s = &report.summary;
        info!(
            "Batch complete: {} resolved, {} empty, {} not found, {} failed",
            s.resolved, s.empty, s.not_found, s.failed
        );
        report
    }
}

/// Fetch every address over HTTP and render one line per address.
///
/// `template` defaults to `$Value <<< $Uri` when `None`.
pub async fn run<S: AsRef<str>>(
    uris: &[S],
    attrib: &str,
    template: Option<&str>,
    show_progress: bool,
) -> Result<Vec<String>> {
    let mut options = BatchOptions::new().show_progress(show_progress);
    if let Some(template) = template {
        options = options.template(template)?;
    }
    BatchDriver::http(FetchConfig::default())?
        .run(uris, attrib, &options)
        .await
}
