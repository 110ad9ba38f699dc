//! Search-level scope.

use std::time::Duration;

use crate::stats::SearchStats;

/// Running state of one search, visible to termination conditions.
#[derive(Debug, Default)]
pub struct SearchScope {
    stats: SearchStats,
    frontier_len: usize,
    last_cost: u64,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_solving(&mut self) {
        self.stats = SearchStats::default();
        self.stats.start();
        self.frontier_len = 0;
        self.last_cost = 0;
    }

    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed()
    }

    /// Number of states expanded so far.
    pub fn expanded_count(&self) -> u64 {
        self.stats.states_expanded
    }

    /// Cost of the most recently expanded state.
    pub fn last_cost(&self) -> u64 {
        self.last_cost
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub(crate) fn record_expanded(&mut self, cost: u64) -> u64 {
        self.stats.record_expanded();
        self.last_cost = cost;
        self.stats.states_expanded
    }

    pub(crate) fn set_frontier_len(&mut self, len: usize) {
        self.frontier_len = len;
    }

    pub(crate) fn into_stats(self) -> SearchStats {
        self.stats
    }
}
