//! Engine metrics collection.
//!
//! Lock-free counters updated from the hot paths and reported through
//! structured logs. Counters are monotonic; snapshots are cheap and can
//! be taken from any thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Point-in-time view of the engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub organisms_created: u64,
    pub organisms_died: u64,
    pub mutations_applied: u64,
    pub crossovers: u64,
    pub messages_sent: u64,
    pub messages_failed: u64,
    pub decisions_resolved: u64,
    pub evolution_cycles: u64,
}

/// Aggregated engine counters.
///
/// One instance lives for the duration of a protocol run. All methods
/// take `&self`; relaxed ordering is sufficient because counters are
/// independent and only read for reporting.
#[derive(Debug, Default)]
pub struct Metrics {
    organisms_created: AtomicU64,
    organisms_died: AtomicU64,
    mutations_applied: AtomicU64,
    crossovers: AtomicU64,
    messages_sent: AtomicU64,
    messages_failed: AtomicU64,
    decisions_resolved: AtomicU64,
    evolution_cycles: AtomicU64,
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_organism_created(&self) {
        self.organisms_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_organism_died(&self) {
        self.organisms_died.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutations(&self, count: u64) {
        self.mutations_applied.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_crossover(&self) {
        self.crossovers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_message_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_message_failed(&self) {
        self.messages_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decision_resolved(&self) {
        self.decisions_resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evolution_cycle(&self) {
        self.evolution_cycles.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            organisms_created: self.organisms_created.load(Ordering::Relaxed),
            organisms_died: self.organisms_died.load(Ordering::Relaxed),
            mutations_applied: self.mutations_applied.load(Ordering::Relaxed),
            crossovers: self.crossovers.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_failed: self.messages_failed.load(Ordering::Relaxed),
            decisions_resolved: self.decisions_resolved.load(Ordering::Relaxed),
            evolution_cycles: self.evolution_cycles.load(Ordering::Relaxed),
        }
    }

    /// Emits the current counters as one structured log record.
    pub fn report(&self) {
        let s = self.snapshot();
        tracing::info!(
            organisms_created = s.organisms_created,
            organisms_died = s.organisms_died,
            mutations_applied = s.mutations_applied,
            crossovers = s.crossovers,
            messages_sent = s.messages_sent,
            messages_failed = s.messages_failed,
            decisions_resolved = s.decisions_resolved,
            evolution_cycles = s.evolution_cycles,
            "engine metrics"
        );
    }
}

/// Simple stopwatch for timing engine phases.
#[derive(Debug)]
pub struct PhaseTimer {
    label: &'static str,
    start: Instant,
}

impl PhaseTimer {
    #[must_use]
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Logs the elapsed time and returns it in milliseconds.
    pub fn finish(self) -> u128 {
        let elapsed = self.start.elapsed().as_millis();
        tracing::debug!(phase = self.label, elapsed_ms = elapsed, "phase complete");
        elapsed
    }
}

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info` when unset. Safe to call
/// more than once; subsequent calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
