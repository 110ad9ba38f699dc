//! Termination conditions for a search.
//!
//! A condition is checked before every pop. When it fires, the search
//! stops and reports [`RoomsortError::Terminated`](roomsort_core::RoomsortError::Terminated)
//! instead of a solution.

mod composite;
mod external;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns true if searching should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool;
}

/// Never terminates; the search runs until the frontier empties.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        false
    }
}

impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

#[cfg(test)]
mod tests;
