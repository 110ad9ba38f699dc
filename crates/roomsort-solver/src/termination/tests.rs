use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;

fn scope_with_expanded(count: u64) -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start_solving();
    for _ in 0..count {
        scope.record_expanded(0);
    }
    scope
}

#[test]
fn test_step_count_termination() {
    let term = StepCountTermination::new(3);
    assert!(!term.is_terminated(&scope_with_expanded(2)));
    assert!(term.is_terminated(&scope_with_expanded(3)));
}

#[test]
fn test_time_termination() {
    let scope = scope_with_expanded(0);
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert_eq!(TimeTermination::millis(1500).limit(), Duration::from_millis(1500));
}

#[test]
fn test_external_termination() {
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(Arc::clone(&flag));
    let scope = scope_with_expanded(0);
    assert!(!term.is_terminated(&scope));
    term.flag().store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let term = OrTermination((
        StepCountTermination::new(10),
        TimeTermination::seconds(3600),
    ));
    assert!(!term.is_terminated(&scope_with_expanded(5)));
    assert!(term.is_terminated(&scope_with_expanded(10)));
}

#[test]
fn test_optional_and_no_termination() {
    let scope = scope_with_expanded(100);
    assert!(!NoTermination.is_terminated(&scope));
    assert!(!None::<StepCountTermination>.is_terminated(&scope));
    assert!(Some(StepCountTermination::new(1)).is_terminated(&scope));
}
