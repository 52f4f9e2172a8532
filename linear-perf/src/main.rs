//! Timing driver for the linear containers.
//!
//! For every size N and container, runs three phases on one container in
//! sequence: N appends, N prepends, then N erasures of the second element.
//! Prints elapsed wall time per phase, plus per-operation latency
//! percentiles with `--histogram`.
//!
//! Run with:
//!   cargo run --release -p linear-perf -- --sizes 10000,100000 --histogram
//!
//! Set `RUST_LOG=linear_perf=debug,linear_collections=trace` for progress
//! and container events on stderr.

use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use hdrhistogram::Histogram;
use linear_collections::{ArrayList, Growth, LinkedList, Sequence, DEFAULT_INCREMENT};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "linear-perf",
    about = "Time append, prepend and erase on the array and linked list containers"
)]
struct Cli {
    /// Element counts to run, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = [10_000usize, 100_000])]
    sizes: Vec<usize>,

    /// Containers to time.
    #[arg(long, value_enum, default_value_t = Containers::Both)]
    containers: Containers,

    /// Slots the array adds each time its buffer fills up.
    #[arg(long, default_value_t = DEFAULT_INCREMENT)]
    increment: usize,

    /// Record every operation's latency and print percentiles.
    #[arg(long)]
    histogram: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Containers {
    Array,
    List,
    Both,
}

impl Containers {
    fn array(self) -> bool {
        matches!(self, Containers::Array | Containers::Both)
    }

    fn list(self) -> bool {
        matches!(self, Containers::List | Containers::Both)
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Append,
    Prepend,
    EraseSecond,
}

impl Phase {
    const ALL: [Phase; 3] = [Phase::Append, Phase::Prepend, Phase::EraseSecond];

    fn label(self) -> &'static str {
        match self {
            Phase::Append => "append",
            Phase::Prepend => "prepend",
            Phase::EraseSecond => "erase second",
        }
    }

    fn apply<S: Sequence<Item = String>>(self, seq: &mut S) -> linear_collections::Result<()> {
        match self {
            Phase::Append => seq.append(black_box("testEnd".to_string())),
            Phase::Prepend => seq.prepend(black_box("testBegin".to_string())),
            Phase::EraseSecond => {
                let second = seq.begin().next(seq)?;
                black_box(seq.erase(second)?);
            }
        }
        Ok(())
    }
}

struct Report {
    container: &'static str,
    n: usize,
    phase: Phase,
    elapsed: Duration,
    latency: Option<Histogram<u64>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    ensure!(cli.increment > 0, "--increment must be greater than zero");

    let growth = Growth::fixed(cli.increment);
    let mut reports = Vec::new();

    for &n in &cli.sizes {
        if cli.containers.array() {
            info!(n, increment = cli.increment, "timing array list");
            let make = || ArrayList::<String>::with_growth(growth);
            reports.extend(run("array", n, make, cli.histogram)?);
        }
        if cli.containers.list() {
            info!(n, "timing linked list");
            reports.extend(run("list", n, LinkedList::<String>::new, cli.histogram)?);
        }
    }

    print_reports(&reports);
    Ok(())
}

fn run<S, F>(container: &'static str, n: usize, make: F, record: bool) -> Result<Vec<Report>>
where
    S: Sequence<Item = String>,
    F: FnOnce() -> S,
{
    let mut seq = make();
    let mut reports = Vec::with_capacity(Phase::ALL.len());

    for phase in Phase::ALL {
        let mut latency = if record {
            Some(Histogram::<u64>::new(3).context("failed to create latency histogram")?)
        } else {
            None
        };

        let start = Instant::now();
        for _ in 0..n {
            let op_start = latency.is_some().then(Instant::now);
            phase
                .apply(&mut seq)
                .with_context(|| format!("{container} {} failed", phase.label()))?;
            if let (Some(hist), Some(op_start)) = (latency.as_mut(), op_start) {
                hist.record(op_start.elapsed().as_nanos() as u64)
                    .context("failed to record latency")?;
            }
        }
        let elapsed = start.elapsed();

        debug!(
            container,
            n,
            phase = phase.label(),
            len = seq.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "phase finished"
        );
        reports.push(Report {
            container,
            n,
            phase,
            elapsed,
            latency,
        });
    }

    ensure!(
        seq.len() == n,
        "{container}: expected {n} elements after the erase phase, found {}",
        seq.len()
    );
    Ok(reports)
}

fn print_reports(reports: &[Report]) {
    println!(
        "{:<9} {:>9}  {:<13} {:>14}  {:>8} {:>8} {:>9} {:>10}",
        "container", "n", "phase", "elapsed (us)", "p50 ns", "p99 ns", "p999 ns", "max ns"
    );
    for report in reports {
        let head = format!(
            "{:<9} {:>9}  {:<13} {:>14}",
            report.container,
            report.n,
            report.phase.label(),
            report.elapsed.as_micros()
        );
        match &report.latency {
            Some(hist) => println!(
                "{head}  {:>8} {:>8} {:>9} {:>10}",
                hist.value_at_quantile(0.50),
                hist.value_at_quantile(0.99),
                hist.value_at_quantile(0.999),
                hist.max(),
            ),
            None => println!("{head}"),
        }
    }
}
