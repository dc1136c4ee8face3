//! The per-run output accumulator.

use serde_json::Value;
use tracing::trace;

use crate::merger::FragmentMerger;

/// Running reconstructed output of one run.
///
/// Every fold replaces the held value with the merge result.
#[derive(Debug, Clone, Default)]
pub struct AggregatedOutput {
    merger: FragmentMerger,
    value: Option<Value>,
    delta_folds: u64,
    final_folds: u64,
}

impl AggregatedOutput {
    pub fn new(merger: FragmentMerger) -> Self {
        Self {
            merger,
            value: None,
            delta_folds: 0,
            final_folds: 0,
        }
    }

    /// Fold a streamed chunk.
    pub fn fold_delta(&mut self, fragment: Value) {
        let merged = self.merger.merge_delta(self.value.take(), fragment);
        self.value = Some(merged);
        self.delta_folds += 1;
        trace!(folds = self.delta_folds, "folded delta fragment");
    }

    /// Fold a completion snapshot.
    pub fn fold_final(&mut self, snapshot: Value) {
        let merged = self.merger.merge_final(self.value.take(), snapshot);
        self.value = Some(merged);
        self.final_folds += 1;
        trace!(folds = self.final_folds, "folded completion snapshot");
    }

    pub fn get(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn into_inner(self) -> Option<Value> {
        self.value
    }

    pub fn delta_folds(&self) -> u64 {
        self.delta_folds
    }

    pub fn final_folds(&self) -> u64 {
        self.final_folds
    }
}
