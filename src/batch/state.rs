//! Batch counters

/// Percentage of `completed` out of `count`, rounded half up, 0–100.
///
/// Returns 0 for an empty batch.
pub fn percent(completed: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    let completed = completed.min(count) as u128;
    let count = count as u128;
    ((200 * completed + count) / (2 * count)) as u8
}

/// Per-batch counters, advanced once per item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchState {
    index: usize,
    count: usize,
}

impl BatchState {
    /// Fresh state for `count` items
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// State after `index` items have already been processed
    pub fn resume(index: usize, count: usize) -> Self {
        Self { index, count }
    }

    /// Move to the next item and return its 1-based index
    pub fn advance(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    /// 1-based index of the current item (0 before the first `advance`)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total items
    pub fn count(&self) -> usize {
        self.count
    }

    /// Percentage of items completed once the current item is done
    pub fn percent(&self) -> u8 {
        percent(self.index, self.count)
    }
}
