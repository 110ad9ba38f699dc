//! Expansion count termination.

use super::Termination;
use crate::scope::SearchScope;

/// Terminates after a number of expanded states.
///
/// # Example
///
/// ```
/// use roomsort_solver::termination::StepCountTermination;
///
/// // Stop after 100 000 expansions
/// let term = StepCountTermination::new(100_000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.expanded_count() >= self.limit
    }
}
