//! Step metrics and structured logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Steps between periodic summary log lines.
const LOG_INTERVAL: u64 = 1000;

/// Step counter and cumulative step time for one engine.
pub struct Metrics {
    engine: &'static str,
    step_count: AtomicU64,
    busy_nanos: AtomicU64,
}

impl Metrics {
    #[must_use]
    pub fn new(engine: &'static str) -> Self {
        Self {
            engine,
            step_count: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_step(&self, duration: Duration) {
        let steps = self.step_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.busy_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if steps % LOG_INTERVAL == 0 {
            tracing::info!(
                engine = self.engine,
                steps = steps,
                steps_per_sec = self.steps_per_second(),
                "Automaton progress"
            );
        }
    }

    /// Runs `f`, records its duration as one step, and returns its output.
    pub fn time_step<T>(&self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record_step(start.elapsed());
        out
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Total time spent inside recorded steps.
    #[must_use]
    pub fn busy_time(&self) -> Duration {
        Duration::from_nanos(self.busy_nanos.load(Ordering::Relaxed))
    }

    /// Throughput over recorded step time; zero before the first step.
    #[must_use]
    pub fn steps_per_second(&self) -> f64 {
        let busy = self.busy_time().as_secs_f64();
        if busy > 0.0 {
            self.step_count() as f64 / busy
        } else {
            0.0
        }
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
