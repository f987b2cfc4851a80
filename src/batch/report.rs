//! Batch accounting

use crate::extraction::ExtractionResult;
use serde::{Deserialize, Serialize};

/// How a single item ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ItemOutcome {
    /// Matched element with a non-empty value
    Resolved,
    /// Matched element without the property
    Empty,
    /// No element matched
    NotFound,
    /// Fetch failed
    Failed {
        /// Failure message
        error: String,
    },
}

impl ItemOutcome {
    /// Classify an extraction result
    pub fn from_result(result: &ExtractionResult) -> Self {
        match result {
            ExtractionResult::Value(v) if v.is_empty() => ItemOutcome::Empty,
            ExtractionResult::Value(_) => ItemOutcome::Resolved,
            ExtractionResult::NotAvailable => ItemOutcome::NotFound,
        }
    }
}

/// Record of one processed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// 1-based position
    pub index: usize,
    /// Address as supplied
    pub uri: String,
    /// Extracted value; `None` when not available
    pub value: Option<String>,
    /// Outcome classification
    #[serde(flatten)]
    pub outcome: ItemOutcome,
    /// Completed percentage after this item
    pub percent: u8,
    /// Rendered output line
    pub line: String,
}

/// Totals for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Items processed
    pub total: usize,
    /// Items with a non-empty value
    pub resolved: usize,
    /// Items whose matched element lacked the property
    pub empty: usize,
    /// Items where nothing matched
    pub not_found: usize,
    /// Items whose fetch failed
    pub failed: usize,
}

impl BatchSummary {
    /// Count one item
    pub fn record(&mut self, outcome: &ItemOutcome) {
        self.total += 1;
        match outcome {
            ItemOutcome::Resolved => self.resolved += 1,
            ItemOutcome::Empty => self.empty += 1,
            ItemOutcome::NotFound => self.not_found += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Items rendered with the `n/a` sentinel
    pub fn unavailable(&self) -> usize {
        self.not_found + self.failed
    }
}

/// Full result of a batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-item records
    pub records: Vec<ItemRecord>,
    /// Totals
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Rendered lines in input order
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(|r| r.line.clone()).collect()
    }

    /// Consume the report, keeping only the rendered lines
    pub fn into_lines(self) -> Vec<String> {
        self.records.into_iter().map(|r| r.line).collect()
    }

    pub(crate) fn push(&mut self, record: ItemRecord) {
        self.summary.record(&record.outcome);
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, outcome: ItemOutcome) -> ItemRecord {
        ItemRecord {
            index,
            uri: format!("https://example.com/{index}"),
            value: None,
            outcome,
            percent: 0,
            line: format!("line {index}"),
        }
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(
            ItemOutcome::from_result(&ExtractionResult::Value("x".into())),
            ItemOutcome::Resolved
        );
        assert_eq!(
            ItemOutcome::from_result(&ExtractionResult::Value(String::new())),
            ItemOutcome::Empty
        );
        assert_eq!(
            ItemOutcome::from_result(&ExtractionResult::NotAvailable),
            ItemOutcome::NotFound
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut report = BatchReport::default();
        report.push(record(1, ItemOutcome::Resolved));
        report.push(record(2, ItemOutcome::NotFound));
        report.push(record(
            3,
            ItemOutcome::Failed {
                error: "boom".into(),
            },
        ));
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.resolved, 1);
        assert_eq!(report.summary.unavailable(), 2);
        assert_eq!(report.lines(), vec!["line 1", "line 2", "line 3"]);
    }

    #[test]
    fn test_record_serialization() {
        let json = serde_json::to_value(record(
            1,
            ItemOutcome::Failed {
                error: "timeout".into(),
            },
        ))
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "timeout");
        assert_eq!(json["value"], serde_json::Value::Null);
    }
}
