//! External termination via a shared flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use roomsort_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(Arc::clone(&flag));
///
/// // Later, from another thread:
/// flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Returns a handle that can be used to request termination.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _scope: &SearchScope) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
