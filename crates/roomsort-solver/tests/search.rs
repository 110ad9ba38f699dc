use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use roomsort_config::EnvironmentMode;
use roomsort_core::{Kind, Puzzle, RoomsortError, State, Weights, MAX_WEIGHT};
use roomsort_solver::{
    CountingEventListener, ExternalTermination, MoveGenerator, SearchEventListener, Solver,
    StepCountTermination,
};
use roomsort_test as fixtures;

/// Records every expanded state with its cost, in pop order.
#[derive(Debug, Default)]
struct RecordingListener {
    expanded: Mutex<Vec<(u64, State)>>,
}

impl SearchEventListener for RecordingListener {
    fn on_state_expanded(&self, state: &State, cost: u64, _depth: usize) {
        self.expanded.lock().unwrap().push((cost, state.clone()));
    }
}

fn path_sum(puzzle: &Puzzle) -> (u64, u64) {
    let solution = Solver::new().solve(puzzle).unwrap();
    let sum = solution.path().iter().map(|step| step.cost).sum();
    (solution.cost(), sum)
}

#[test]
fn test_swapped_pair() {
    let solution = Solver::new().solve(&fixtures::swapped_pair()).unwrap();
    assert_eq!(solution.cost(), fixtures::SWAPPED_PAIR_COST);
    assert_eq!(solution.move_count(), 4);
    assert!(solution.final_state().is_terminal());
}

#[test]
fn test_three_move_settle() {
    let solution = Solver::new().solve(&fixtures::three_move()).unwrap();
    assert_eq!(solution.cost(), fixtures::THREE_MOVE_COST);
    assert_eq!(solution.move_count(), 3);
}

#[test]
fn test_single_slot_rooms() {
    let puzzle = fixtures::single_slot_swap();
    assert_eq!(
        Solver::new().min_cost(&puzzle).unwrap(),
        fixtures::SINGLE_SLOT_SWAP_COST
    );
}

#[test]
fn test_example() {
    let solution = Solver::new().solve(&fixtures::example()).unwrap();
    assert_eq!(solution.cost(), fixtures::EXAMPLE_COST);
    assert!(solution.stats().stale_pops > 0);
    assert!(solution.stats().cost_cache_hits > solution.stats().cost_cache_misses);
}

#[test]
fn test_example_unfolded() {
    let cost = Solver::new().min_cost(&fixtures::example_unfolded()).unwrap();
    assert_eq!(cost, fixtures::EXAMPLE_UNFOLDED_COST);
}

#[test]
fn test_sorted_puzzle_has_empty_path() {
    let solution = Solver::new().solve(&fixtures::sorted()).unwrap();
    assert_eq!(solution.cost(), 0);
    assert_eq!(solution.move_count(), 0);
}

#[test]
fn test_deadlock_is_unreachable() {
    match Solver::new().solve(&fixtures::deadlocked()) {
        Err(RoomsortError::Unreachable { explored }) => assert_eq!(explored, 1),
        other => panic!("expected Unreachable, got {other:?}"),
    }
}

#[test]
fn test_path_costs_add_up() {
    for puzzle in [
        fixtures::swapped_pair(),
        fixtures::three_move(),
        fixtures::single_slot_swap(),
        fixtures::example(),
    ] {
        let (cost, sum) = path_sum(&puzzle);
        assert_eq!(cost, sum);
    }
}

#[test]
fn test_replayed_path_ends_sorted() {
    let puzzle = fixtures::example();
    let solution = Solver::new().solve(&puzzle).unwrap();
    let states = solution.states(puzzle.initial()).unwrap();
    assert_eq!(states.len(), solution.move_count() + 1);
    let last = states.last().unwrap();
    assert!(last.is_terminal());
    assert_eq!(last, solution.final_state());

    let mut total = 0;
    for step in solution.path() {
        total += step.cost;
        assert_eq!(step.total, total);
    }
}

#[test]
fn test_expanded_costs_never_decrease() {
    let listener = Arc::new(RecordingListener::default());
    Solver::new()
        .with_listener(listener.clone())
        .solve(&fixtures::example())
        .unwrap();

    let expanded = listener.expanded.lock().unwrap();
    assert!(!expanded.is_empty());
    assert!(expanded.windows(2).all(|w| w[0].0 <= w[1].0));
}

#[test]
fn test_generated_moves_respect_blocking_and_settled_rooms() {
    let puzzle = fixtures::example();
    let listener = Arc::new(RecordingListener::default());
    Solver::new()
        .with_listener(listener.clone())
        .solve(&puzzle)
        .unwrap();

    let topology = puzzle.topology();
    let generator = MoveGenerator::new(topology);
    let mut costs = puzzle.cost_model();
    let expanded = listener.expanded.lock().unwrap();
    for (_, state) in expanded.iter().take(2_000) {
        for (mv, _) in generator.moves(state, &mut costs) {
            for &slot in topology.blocking_set(mv.room, mv.slot) {
                assert!(state.corridor_slot(slot).is_none(), "{mv} crosses slot {slot}");
            }
            if mv.is_exit() {
                assert!(!state.is_settled(mv.room), "{mv} leaves a settled room");
            }
            assert!(generator.check(state, &mv).is_ok());
        }
    }
}

#[test]
fn test_repeated_runs_agree() {
    let puzzle = fixtures::example();
    let first = Solver::new().solve(&puzzle).unwrap();
    let second = Solver::new().solve(&puzzle).unwrap();
    assert_eq!(first.cost(), second.cost());
    assert_eq!(first.path(), second.path());
    assert_eq!(
        first.stats().states_expanded,
        second.stats().states_expanded
    );
}

#[test]
fn test_full_assert_finds_same_cost() {
    let solver = Solver::new().with_environment_mode(EnvironmentMode::FullAssert);
    for (puzzle, expected) in [
        (fixtures::swapped_pair(), fixtures::SWAPPED_PAIR_COST),
        (fixtures::example(), fixtures::EXAMPLE_COST),
    ] {
        assert_eq!(solver.min_cost(&puzzle).unwrap(), expected);
    }
}

fn kinds(letters: &str) -> Vec<Kind> {
    letters.chars().map(|c| Kind::from_letter(c).unwrap()).collect()
}

#[test]
fn test_full_assert_reports_census_violation() {
    let puzzle = fixtures::single_slot_swap();
    // Two Bs and no A.
    let start = State::new(&[kinds("B"), kinds("B")], &[None; 5], 1).unwrap();

    let strict = Solver::new().with_environment_mode(EnvironmentMode::FullAssert);
    match strict.solve_from(&puzzle, &start) {
        Err(RoomsortError::InvariantViolation(message)) => assert!(message.contains("kind A")),
        other => panic!("expected InvariantViolation, got {other:?}"),
    }

    assert!(matches!(
        Solver::new().solve_from(&puzzle, &start),
        Err(RoomsortError::Unreachable { .. })
    ));
}

#[test]
fn test_solve_from_midway() {
    let puzzle = fixtures::swapped_pair();
    let solution = Solver::new().solve(&puzzle).unwrap();
    let first = solution.path()[0];
    let start = puzzle.initial().apply(&first.mv).unwrap();

    let rest = Solver::new().solve_from(&puzzle, &start).unwrap();
    assert_eq!(rest.cost(), solution.cost() - first.cost);
    assert_eq!(rest.move_count(), solution.move_count() - 1);
}

#[test]
fn test_solve_from_rejects_other_shape() {
    let start = State::new(&[kinds("A"), kinds("B")], &[None; 5], 1).unwrap();
    assert!(matches!(
        Solver::new().solve_from(&fixtures::swapped_pair(), &start),
        Err(RoomsortError::MalformedInput(_))
    ));
}

#[test]
fn test_largest_weight_does_not_overflow() {
    let puzzle = Puzzle::builder_standard(2)
        .unwrap()
        .capacity(1)
        .weights(Weights::new(vec![MAX_WEIGHT, 1]).unwrap())
        .room_letters("B")
        .room_letters("A")
        .build()
        .unwrap();
    // A walks out and home in four steps; B needs six around it.
    assert_eq!(Solver::new().min_cost(&puzzle).unwrap(), 4 * MAX_WEIGHT + 6);
}

#[test]
fn test_step_budget_terminates() {
    let solver = Solver::new().with_termination(StepCountTermination::new(10));
    match solver.solve(&fixtures::example()) {
        Err(RoomsortError::Terminated { explored }) => assert_eq!(explored, 10),
        other => panic!("expected Terminated, got {other:?}"),
    }
}

#[test]
fn test_external_flag_terminates() {
    let flag = Arc::new(AtomicBool::new(true));
    let solver = Solver::new().with_termination(ExternalTermination::new(flag));
    assert!(matches!(
        solver.solve(&fixtures::swapped_pair()),
        Err(RoomsortError::Terminated { explored: 0 })
    ));
}

#[test]
fn test_listener_sees_whole_run() {
    let counter = Arc::new(CountingEventListener::new());
    let solution = Solver::new()
        .with_listener(counter.clone())
        .solve(&fixtures::swapped_pair())
        .unwrap();

    assert_eq!(counter.started_count(), 1);
    assert_eq!(counter.ended_count(), 1);
    assert_eq!(counter.expanded_count(), solution.stats().states_expanded);
    assert_eq!(counter.max_cost(), solution.cost());
}
