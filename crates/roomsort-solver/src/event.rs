//! Event system for search monitoring.
//!
//! Listeners registered on a [`Solver`](crate::Solver) are called
//! synchronously, in registration order, from the search loop.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use roomsort_core::State;
//! use roomsort_solver::event::SearchEventListener;
//! use roomsort_solver::Solver;
//!
//! #[derive(Debug)]
//! struct PrintCosts;
//!
//! impl SearchEventListener for PrintCosts {
//!     fn on_state_expanded(&self, _state: &State, cost: u64, depth: usize) {
//!         println!("expanded depth {depth} at cost {cost}");
//!     }
//! }
//!
//! let solver = Solver::new().with_listener(Arc::new(PrintCosts));
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use roomsort_core::State;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A terminal state was reached at this cost.
    Solved { cost: u64 },
    /// The frontier emptied.
    Unreachable,
    /// A termination condition fired.
    Terminated,
    /// An invariant check failed.
    Failed,
}

/// Listener for search lifecycle events.
pub trait SearchEventListener: Send + Sync + Debug {
    /// Called once before the first pop.
    fn on_search_started(&self, _initial: &State) {}

    /// Called for every state popped for the first time.
    ///
    /// Costs arrive in non-decreasing order.
    fn on_state_expanded(&self, state: &State, cost: u64, depth: usize);

    /// Called once when the search stops.
    fn on_search_ended(&self, _outcome: SearchOutcome) {}
}

/// Central event broadcaster.
#[derive(Debug, Default, Clone)]
pub struct SearchEventSupport {
    listeners: Vec<Arc<dyn SearchEventListener>>,
}

impl SearchEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SearchEventListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn fire_search_started(&self, initial: &State) {
        for listener in &self.listeners {
            listener.on_search_started(initial);
        }
    }

    pub fn fire_state_expanded(&self, state: &State, cost: u64, depth: usize) {
        for listener in &self.listeners {
            listener.on_state_expanded(state, cost, depth);
        }
    }

    pub fn fire_search_ended(&self, outcome: SearchOutcome) {
        for listener in &self.listeners {
            listener.on_search_ended(outcome);
        }
    }
}

/// Counts events; handy in tests and for quick diagnostics.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    started: AtomicU64,
    expanded: AtomicU64,
    ended: AtomicU64,
    max_cost: AtomicU64,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started_count(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    pub fn expanded_count(&self) -> u64 {
        self.expanded.load(Ordering::Relaxed)
    }

    pub fn ended_count(&self) -> u64 {
        self.ended.load(Ordering::Relaxed)
    }

    /// Highest expanded cost seen.
    pub fn max_cost(&self) -> u64 {
        self.max_cost.load(Ordering::Relaxed)
    }
}

impl SearchEventListener for CountingEventListener {
    fn on_search_started(&self, _initial: &State) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_state_expanded(&self, _state: &State, cost: u64, _depth: usize) {
        self.expanded.fetch_add(1, Ordering::Relaxed);
        self.max_cost.fetch_max(cost, Ordering::Relaxed);
    }

    fn on_search_ended(&self, _outcome: SearchOutcome) {
        self.ended.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomsort_core::Puzzle;

    #[test]
    fn test_broadcast_reaches_every_listener() {
        let state = Puzzle::builder_standard(1)
            .unwrap()
            .capacity(1)
            .room_letters("A")
            .build()
            .unwrap()
            .initial()
            .clone();

        let first = Arc::new(CountingEventListener::new());
        let second = Arc::new(CountingEventListener::new());
        let mut support = SearchEventSupport::new();
        support.add_listener(first.clone());
        support.add_listener(second.clone());
        assert_eq!(support.listener_count(), 2);

        support.fire_search_started(&state);
        support.fire_state_expanded(&state, 7, 1);
        support.fire_state_expanded(&state, 3, 1);
        support.fire_search_ended(SearchOutcome::Solved { cost: 7 });

        for listener in [&first, &second] {
            assert_eq!(listener.started_count(), 1);
            assert_eq!(listener.expanded_count(), 2);
            assert_eq!(listener.ended_count(), 1);
            assert_eq!(listener.max_cost(), 7);
        }
    }
}
