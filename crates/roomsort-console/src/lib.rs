//! Colorful console output for search events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//! Output goes to stderr so that solution output on stdout stays clean.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search start/end)
//! - **WARN**: Unreachable, terminated or failed searches
//! - **DEBUG**: Progress updates (every N expanded states)
//! - **TRACE**: Individual state expansions

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "roomsort_solver=info";

/// Initializes the console output with [`DEFAULT_FILTER`].
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(DEFAULT_FILTER);
}

/// Initializes the console output with `default_filter` as the directive
/// used when `RUST_LOG` is unset.
///
/// An unparsable directive falls back to [`DEFAULT_FILTER`].
pub fn init_with(default_filter: &str) {
    INIT.get_or_init(|| {
        let directive = default_filter
            .parse::<Directive>()
            .or_else(|_| DEFAULT_FILTER.parse::<Directive>());
        let builder = EnvFilter::builder();
        let filter = match directive {
            Ok(directive) => builder.with_default_directive(directive),
            Err(_) => builder,
        }
        .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("roomsort") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    error: Option<String>,
    environment_mode: Option<String>,
    rooms: Option<u64>,
    capacity: Option<u64>,
    corridor_slots: Option<u64>,
    cost: Option<u64>,
    moves: Option<u64>,
    explored: Option<u64>,
    stale: Option<u64>,
    peak_frontier: Option<u64>,
    frontier: Option<u64>,
    visited: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    depth: Option<u64>,
    settled: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "error" => self.error = Some(s),
            "environment_mode" => self.environment_mode = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "rooms" => &mut self.rooms,
            "capacity" => &mut self.capacity,
            "corridor_slots" => &mut self.corridor_slots,
            "cost" => &mut self.cost,
            "moves" => &mut self.moves,
            "explored" => &mut self.explored,
            "stale" => &mut self.stale,
            "peak_frontier" => &mut self.peak_frontier,
            "frontier" => &mut self.frontier,
            "visited" => &mut self.visited,
            "steps" => &mut self.steps,
            "step" => &mut self.step,
            "depth" => &mut self.depth,
            "settled" => &mut self.settled,
            "speed" => &mut self.speed,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "environment_mode" => self.environment_mode = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "progress" => format_progress(v),
        "expand" => format_expand(v, level),
        "unreachable" => format_stopped(v, "No sorted state is reachable"),
        "terminated" => format_stopped(v, "Search terminated"),
        "search_failed" => format_failed(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let mut output = format!(
        "{} {} Solving │ {} rooms │ capacity {} │ {} corridor slots",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.rooms).bright_yellow(),
        count(v.capacity).bright_yellow(),
        count(v.corridor_slots).bright_yellow(),
    );
    if let Some(mode) = v.environment_mode.as_deref() {
        if mode != "NonAsserted" {
            output.push_str(&format!(" │ {}", mode.bright_magenta()));
        }
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let cost = count(v.cost);
    let mut output = format!(
        "{} {} Solving complete │ cost {} │ {} moves │ {} states │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        cost.bright_green().bold(),
        count(v.moves).white(),
        count(v.explored).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );
    if let Some(speed) = v.speed {
        output.push_str(&format!(
            " │ {} states/s",
            speed
                .to_formatted_string(&Locale::en)
                .bright_magenta()
                .bold()
        ));
    }
    if let Some(stale) = v.stale {
        output.push_str(&format!(
            " │ {} stale",
            stale.to_formatted_string(&Locale::en).bright_black()
        ));
    }
    if let Some(peak) = v.peak_frontier {
        output.push_str(&format!(
            " │ peak frontier {}",
            peak.to_formatted_string(&Locale::en).bright_black()
        ));
    }
    output
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>10} states │ {:>12}/s │ cost {} │ frontier {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.steps).white(),
        count(v.speed).bright_magenta().bold(),
        count(v.cost).bright_yellow(),
        count(v.frontier).white(),
    )
}

fn format_expand(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} State {:>10} │ cost {:>8} │ depth {:>3} │ {} settled",
        format_elapsed(),
        "·".bright_black(),
        count(v.step).bright_black(),
        count(v.cost).bright_black(),
        count(v.depth).bright_black(),
        count(v.settled).bright_black(),
    )
}

fn format_stopped(v: &EventVisitor, message: &str) -> String {
    format!(
        "{} {} {} │ {} states │ {}",
        format_elapsed(),
        "■".bright_red().bold(),
        message.bright_red().bold(),
        count(v.explored).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Search failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
