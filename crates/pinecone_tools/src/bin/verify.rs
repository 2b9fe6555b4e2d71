use anyhow::Context;
use clap::Parser;
use pinecone_core::config::AutomataConfig;
use pinecone_core::margolus::MargolusEngine;
use pinecone_core::metrics::{init_logging, Metrics};
use pinecone_data::MargolusStats;
use serde::Serialize;
use std::path::PathBuf;

/// Fault rates swept by the quad-core check, as fractions.
const SWEEP_RATES: [f64; 5] = [0.0, 0.005, 0.01, 0.02, 0.05];

/// Seed used for the sweep when the config leaves it unset.
const DEFAULT_SWEEP_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Verifies reversibility and fault tolerance of the automata",
    long_about = None
)]
struct Args {
    /// Optional TOML config; defaults are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forward/reverse cycle lengths 1..=N checked for reversibility.
    #[arg(long, default_value_t = 10)]
    cycles: usize,

    /// Steps per direction in the performance run.
    #[arg(long, default_value_t = 100)]
    perf_steps: usize,

    /// Steps per fault rate in the quad-core sweep.
    #[arg(long, default_value_t = 50)]
    quad_steps: usize,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ReversibilityReport {
    cycles: usize,
    passed_cycles: usize,
    success_rate_pct: f64,
}

impl ReversibilityReport {
    fn passed(&self) -> bool {
        self.passed_cycles == self.cycles
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
struct StepSample {
    generation: i64,
    active_cells: usize,
    entropy: f64,
}

impl StepSample {
    fn of(engine: &MargolusEngine) -> Self {
        let report = engine.complexity();
        Self {
            generation: engine.generation(),
            active_cells: report.active_sites,
            entropy: report.entropy,
        }
    }
}

#[derive(Serialize, Debug)]
struct RoundTripReport {
    initial: StepSample,
    forward: Vec<StepSample>,
    reverse: Vec<StepSample>,
    final_sample: StepSample,
    returned_to_seed: bool,
}

#[derive(Serialize, Debug)]
struct PerformanceReport {
    steps: usize,
    forward_steps_per_sec: f64,
    reverse_steps_per_sec: f64,
    symmetry_pct: f64,
}

#[derive(Serialize, Debug)]
struct EntropyReport {
    samples: Vec<f64>,
    min: f64,
    max: f64,
    std_dev: f64,
}

#[derive(Serialize, Debug)]
struct FaultSweepRow {
    rate_pct: f64,
    core_agreement_pct: f64,
    faults_detected: u64,
    faults_corrected: u64,
    fault_tolerance_score: f64,
    invariants_held: bool,
}

#[derive(Serialize, Debug)]
struct SuiteReport {
    reversibility: ReversibilityReport,
    round_trip: RoundTripReport,
    performance: PerformanceReport,
    entropy: EntropyReport,
    fibonacci: MargolusStats,
    fault_sweep: Vec<FaultSweepRow>,
}

impl SuiteReport {
    fn passed(&self) -> bool {
        self.reversibility.passed()
            && self.round_trip.returned_to_seed
            && self.fault_sweep.iter().all(|row| row.invariants_held)
    }
}

fn benchmark_reversibility(
    config: &AutomataConfig,
    cycles: usize,
) -> anyhow::Result<ReversibilityReport> {
    let mut engine = config.build_margolus()?;
    let original = engine.snapshot();
    let mut passed_cycles = 0;

    for cycle in 1..=cycles {
        engine.restore(original.clone())?;
        for _ in 0..cycle {
            engine.apply_step(false);
        }
        for _ in 0..cycle {
            engine.apply_step(true);
        }
        let ok = engine.snapshot() == original;
        if ok {
            passed_cycles += 1;
        }
        tracing::debug!(cycle = cycle, passed = ok, "Reversibility cycle");
    }

    let success_rate_pct = if cycles > 0 {
        100.0 * passed_cycles as f64 / cycles as f64
    } else {
        100.0
    };
    Ok(ReversibilityReport {
        cycles,
        passed_cycles,
        success_rate_pct,
    })
}

/// 6 forward, 13 reverse, 7 forward: nets to zero, so the seed must come back.
fn benchmark_round_trip(config: &AutomataConfig) -> anyhow::Result<RoundTripReport> {
    let mut engine = config.build_margolus()?;
    let original = engine.snapshot();
    let initial = StepSample::of(&engine);

    let forward = (0..6)
        .map(|_| {
            engine.apply_step(false);
            StepSample::of(&engine)
        })
        .collect();
    let reverse = (0..13)
        .map(|_| {
            engine.apply_step(true);
            StepSample::of(&engine)
        })
        .collect();
    for _ in 0..7 {
        engine.apply_step(false);
    }

    Ok(RoundTripReport {
        initial,
        forward,
        reverse,
        final_sample: StepSample::of(&engine),
        returned_to_seed: engine.snapshot() == original,
    })
}

fn benchmark_performance(
    config: &AutomataConfig,
    steps: usize,
) -> anyhow::Result<PerformanceReport> {
    let mut engine = config.build_margolus()?;
    let forward = Metrics::new("margolus_forward");
    let reverse = Metrics::new("margolus_reverse");

    for _ in 0..steps {
        forward.time_step(|| engine.apply_step(false));
    }
    for _ in 0..steps {
        reverse.time_step(|| engine.apply_step(true));
    }

    let forward_rate = forward.steps_per_second();
    let reverse_rate = reverse.steps_per_second();
    let symmetry_pct = if forward_rate > 0.0 {
        100.0 * reverse_rate / forward_rate
    } else {
        0.0
    };
    Ok(PerformanceReport {
        steps,
        forward_steps_per_sec: forward_rate,
        reverse_steps_per_sec: reverse_rate,
        symmetry_pct,
    })
}

fn benchmark_entropy(config: &AutomataConfig) -> anyhow::Result<EntropyReport> {
    let mut engine = config.build_margolus()?;
    let mut samples = Vec::with_capacity(40);
    for reverse in [false, true] {
        for _ in 0..20 {
            engine.apply_step(reverse);
            samples.push(engine.complexity().entropy);
        }
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    Ok(EntropyReport {
        samples,
        min,
        max,
        std_dev: variance.sqrt(),
    })
}

fn benchmark_fault_sweep(
    config: &AutomataConfig,
    steps: usize,
) -> anyhow::Result<Vec<FaultSweepRow>> {
    let mut rows = Vec::with_capacity(SWEEP_RATES.len());
    for rate in SWEEP_RATES {
        let mut sweep = config.clone();
        sweep.quad_core.fault_injection_rate = rate;
        sweep.quad_core.seed = Some(config.quad_core.seed.unwrap_or(DEFAULT_SWEEP_SEED));
        let mut engine = sweep.build_quad_core()?;

        let mut invariants_held = true;
        let (mut last_detected, mut last_corrected) = (0, 0);
        for _ in 0..steps {
            engine.step();
            let detected = engine.total_faults_detected();
            let corrected = engine.total_faults_corrected();
            invariants_held &= detected >= last_detected
                && corrected >= last_corrected
                && corrected <= detected * 3;
            last_detected = detected;
            last_corrected = corrected;
        }
        if rate == 0.0 {
            invariants_held &= engine.total_faults_detected() == 0
                && engine.core_agreement_pct() == 100.0;
        }

        let stats = engine.stats();
        rows.push(FaultSweepRow {
            rate_pct: stats.fault_injection_rate_pct,
            core_agreement_pct: stats.core_agreement_pct,
            faults_detected: stats.total_faults_detected,
            faults_corrected: stats.total_faults_corrected,
            fault_tolerance_score: stats.fault_tolerance_score,
            invariants_held,
        });
    }
    Ok(rows)
}

fn status(ok: bool) -> &'static str {
    if ok {
        "✅ PASS"
    } else {
        "❌ FAIL"
    }
}

fn print_report(report: &SuiteReport) {
    println!("{}", "=".repeat(60));
    println!("REVERSIBILITY");
    let rev = &report.reversibility;
    println!(
        "Success rate: {:.1}% ({}/{}) {}",
        rev.success_rate_pct,
        rev.passed_cycles,
        rev.cycles,
        status(rev.passed())
    );

    println!("{}", "=".repeat(60));
    println!("6 FORWARD + 13 REVERSE + 7 FORWARD");
    let rt = &report.round_trip;
    println!(
        "Initial: {} active, entropy {:.4}",
        rt.initial.active_cells, rt.initial.entropy
    );
    for s in rt.forward.iter().chain(rt.reverse.iter()) {
        println!(
            "  gen {:>3}: {} active, entropy {:.4}",
            s.generation, s.active_cells, s.entropy
        );
    }
    println!(
        "Final: {} active, back to seed: {}",
        rt.final_sample.active_cells,
        status(rt.returned_to_seed)
    );

    println!("{}", "=".repeat(60));
    println!("PERFORMANCE");
    let perf = &report.performance;
    println!(
        "Forward: {:.1} steps/sec, reverse: {:.1} steps/sec, symmetry {:.1}%",
        perf.forward_steps_per_sec, perf.reverse_steps_per_sec, perf.symmetry_pct
    );

    println!("{}", "=".repeat(60));
    println!("ENTROPY EVOLUTION");
    let ent = &report.entropy;
    println!(
        "Range: {:.4} to {:.4}, std dev {:.4}",
        ent.min, ent.max, ent.std_dev
    );

    println!("{}", "=".repeat(60));
    println!("FIBONACCI PROPERTIES");
    let fib = &report.fibonacci;
    println!("Golden angle: {:.2}°", fib.golden_angle_deg);
    println!("Spiral pair: ({}, {})", fib.spiral_count_a, fib.spiral_count_b);
    println!("Pattern energy: {:.4}", fib.pattern_energy);
    println!("Total scales: {}", fib.total_scales);
    println!("Turing complete (claimed): {}", fib.turing_complete);
    println!("Reversible: {}", fib.reversible);

    println!("{}", "=".repeat(60));
    println!("QUAD-CORE FAULT SWEEP");
    for row in &report.fault_sweep {
        println!(
            "  rate {:>4.1}%: agreement {:>5.1}%, faults {} (corrected {}), tolerance {:.2} {}",
            row.rate_pct,
            row.core_agreement_pct,
            row.faults_detected,
            row.faults_corrected,
            row.fault_tolerance_score,
            status(row.invariants_held)
        );
    }
    println!();
}

fn run_suite(config: &AutomataConfig, args: &Args) -> anyhow::Result<SuiteReport> {
    Ok(SuiteReport {
        reversibility: benchmark_reversibility(config, args.cycles)?,
        round_trip: benchmark_round_trip(config)?,
        performance: benchmark_performance(config, args.perf_steps)?,
        entropy: benchmark_entropy(config)?,
        fibonacci: config.build_margolus()?.stats(),
        fault_sweep: benchmark_fault_sweep(config, args.quad_steps)?,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AutomataConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AutomataConfig::default(),
    };

    let report = run_suite(&config, &args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.passed() {
        anyhow::bail!("verification failed");
    }
    Ok(())
}
