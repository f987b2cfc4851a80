//! Per-item processing
//!
//! Fetch, parse, extract, render. Fetch failures are absorbed here and
//! surface as the `n/a` sentinel; nothing in this module returns an error.

use super::report::{ItemOutcome, ItemRecord};
use super::state::BatchState;
use crate::extraction::{AttributeExtractor, Document, ExtractionResult, Query};
use crate::fetch::Fetcher;
use crate::progress::{ProgressReporter, ProgressUpdate};
use crate::template::{OutputTemplate, TemplateContext};
use tracing::{debug, warn};

/// Processes items against one resolved query and template
pub struct ItemProcessor<'a, F> {
    fetcher: &'a F,
    query: &'a Query,
    template: &'a OutputTemplate,
}

impl<'a, F: Fetcher> ItemProcessor<'a, F> {
    /// Create a processor for one batch
    pub fn new(fetcher: &'a F, query: &'a Query, template: &'a OutputTemplate) -> Self {
        Self {
            fetcher,
            query,
            template,
        }
    }

    /// Process the next item: advances `state`, notifies `progress`.
    pub async fn process(
        &self,
        uri: &str,
        state: &mut BatchState,
        progress: &mut dyn ProgressReporter,
    ) -> ItemRecord {
        let index = state.advance();
        let count = state.count();
        let percent = state.percent();

        progress.update(&ProgressUpdate {
            completed: index,
            count,
            percent,
            status: format!("Processing {uri}"),
        });

        let (result, outcome) = match self.fetcher.fetch(uri).await {
            Ok(markup) => {
                let result = AttributeExtractor::extract(&Document::parse(&markup), self.query);
                let outcome = ItemOutcome::from_result(&result);
                (result, outcome)
            }
            Err(e) => {
                warn!("[{}/{}] {} failed: {}", index, count, uri, e);
                (
                    ExtractionResult::NotAvailable,
                    ItemOutcome::Failed {
                        error: e.to_string(),
                    },
                )
            }
        };

        let line = self.template.render(&TemplateContext {
            value: result.as_display(),
            uri,
            index,
            count,
            percent,
        });
        debug!("[{}/{}] {} -> {}", index, count, uri, result.as_display());

        ItemRecord {
            index,
            uri: uri.to_string(),
            value: result.value().map(str::to_string),
            outcome,
            percent,
            line,
        }
    }
}

/// Process a single item outside a batch.
///
/// `index` is the number of items already processed; the returned index is
/// the position of this item, ready to be passed to the next call.
pub async fn process_item<F: Fetcher>(
    fetcher: &F,
    uri: &str,
    query: &Query,
    template: &OutputTemplate,
    index: usize,
    count: usize,
) -> (String, usize) {
    let mut state = BatchState::resume(index, count);
    let record = ItemProcessor::new(fetcher, query, template)
        .process(uri, &mut state, &mut crate::progress::NoProgress)
        .await;
    (record.line, record.index)
}
