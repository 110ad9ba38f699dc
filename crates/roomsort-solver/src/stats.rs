//! Search statistics.

use std::time::{Duration, Instant};

/// Counters collected over one search run.
///
/// # Example
///
/// ```
/// use roomsort_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.start();
/// stats.record_expanded();
/// stats.record_stale();
/// stats.record_successor(true);
/// stats.record_successor(false);
///
/// assert_eq!(stats.states_expanded, 1);
/// assert_eq!(stats.stale_pops, 1);
/// assert_eq!(stats.moves_generated, 2);
/// assert_eq!(stats.successors_pushed, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    finished: Option<Duration>,
    /// States popped for the first time and expanded.
    pub states_expanded: u64,
    /// Popped entries whose state was already finalized at a lower cost.
    pub stale_pops: u64,
    /// Legal moves produced by the generator.
    pub moves_generated: u64,
    /// Successors pushed onto the frontier.
    pub successors_pushed: u64,
    /// Largest frontier size reached.
    pub peak_frontier: usize,
    /// Cost lookups answered from the cost model's cache.
    pub cost_cache_hits: u64,
    /// Cost lookups that had to be computed.
    pub cost_cache_misses: u64,
}

impl SearchStats {
    /// Marks the start of searching.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.finished = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.finished = Some(self.elapsed());
    }

    /// Returns the elapsed time since searching started, or the total time
    /// once finished.
    pub fn elapsed(&self) -> Duration {
        self.finished
            .or_else(|| self.start_time.map(|t| t.elapsed()))
            .unwrap_or_default()
    }

    pub fn record_expanded(&mut self) {
        self.states_expanded += 1;
    }

    pub fn record_stale(&mut self) {
        self.stale_pops += 1;
    }

    /// Records a generated move and whether its successor was pushed.
    pub fn record_successor(&mut self, pushed: bool) {
        self.moves_generated += 1;
        if pushed {
            self.successors_pushed += 1;
        }
    }

    /// Returns expanded states per second.
    pub fn states_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.states_expanded as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns the fraction of cost lookups served from cache.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cost_cache_hits + self.cost_cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cost_cache_hits as f64 / total as f64
        }
    }
}
