//! Per-document score accumulation and top-k selection.

use std::collections::BTreeMap;

/// Running per-document totals keyed by document position.
///
/// Iteration is in position order, which gives the final sort its
/// insertion-order tie-break.
#[derive(Debug, Default)]
pub struct ScoreAccumulator {
    totals: BTreeMap<usize, f64>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `score` to the running total of `position`
    pub fn add(&mut self, position: usize, score: f64) {
        *self.totals.entry(position).or_insert(0.0) += score;
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Highest `k` totals, descending. Equal scores keep position order.
    pub fn top_k(self, k: usize) -> Vec<(usize, f64)> {
        if k == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(usize, f64)> = self.totals.into_iter().collect();
        // Stable sort: ties stay in insertion order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}
