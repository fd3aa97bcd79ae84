//! Benchmark comparison tool.
//!
//! Compares two JSON result files and prints a table of deltas. Result names
//! do not include the backend, so this diffs two runs of the same store or a
//! PostgreSQL run against a MongoDB run.
//!
//! Usage: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ugc_benchmarks::report::{fmt_num, format_ns};
use ugc_benchmarks::schema::{BenchmarkMetrics, BenchmarkReport, BenchmarkResult};

/// Compare two benchmark result files.
#[derive(Debug, Parser)]
#[command(name = "bench-compare", author, version, about, long_about = None)]
struct Cli {
    /// Baseline result file
    baseline: PathBuf,

    /// Candidate result file
    candidate: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let baseline = load_report(&cli.baseline)?;
    let candidate = load_report(&cli.candidate)?;

    let base_map: HashMap<&str, &BenchmarkResult> = baseline
        .results
        .iter()
        .map(|r| (r.benchmark.as_str(), r))
        .collect();

    eprintln!(
        "Baseline:  {} ({}, {})",
        cli.baseline.display(),
        baseline.metadata.backend,
        baseline.metadata.timestamp
    );
    eprintln!(
        "Candidate: {} ({}, {})",
        cli.candidate.display(),
        candidate.metadata.backend,
        candidate.metadata.timestamp
    );
    eprintln!();

    println!(
        "{:<28} | {:>16} | {:>16} | {:>18}",
        "Benchmark", "Baseline", "Candidate", "Delta"
    );
    println!("{}", "-".repeat(86));

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    for cand in &candidate.results {
        match base_map.get(cand.benchmark.as_str()) {
            Some(base) => {
                matched += 1;
                if let Some(line) = comparison_line(&cand.benchmark, &base.metrics, &cand.metrics) {
                    println!("{line}");
                }
            }
            None => only_cand += 1,
        }
    }

    let only_base = baseline
        .results
        .iter()
        .filter(|b| !candidate.results.iter().any(|c| c.benchmark == b.benchmark))
        .count();

    println!("{}", "-".repeat(86));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
    Ok(())
}

fn load_report(path: &Path) -> anyhow::Result<BenchmarkReport> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Mean latency first (lower is better), then throughput (higher is better),
/// then visibility issues.
fn comparison_line(
    name: &str,
    base: &BenchmarkMetrics,
    cand: &BenchmarkMetrics,
) -> Option<String> {
    if let (Some(b), Some(c)) = (base.avg_ns, cand.avg_ns) {
        let delta = delta_pct(b as f64, c as f64);
        return Some(format!(
            "{:<28} | {:>16} | {:>16} | {:>+8.1}% ({})",
            name,
            format_ns(b),
            format_ns(c),
            delta,
            hint(-delta),
        ));
    }
    if let (Some(b), Some(c)) = (base.ops_per_sec, cand.ops_per_sec) {
        let delta = delta_pct(b, c);
        return Some(format!(
            "{:<28} | {:>10} rec/s | {:>10} rec/s | {:>+8.1}% ({})",
            name,
            fmt_num(b as u64),
            fmt_num(c as u64),
            delta,
            hint(delta),
        ));
    }
    if let (Some(b), Some(c)) = (base.issues, cand.issues) {
        return Some(format!(
            "{:<28} | {:>9} issues | {:>9} issues |",
            name, b, c
        ));
    }
    None
}

fn delta_pct(base: f64, cand: f64) -> f64 {
    if base > 0.0 {
        (cand - base) / base * 100.0
    } else {
        0.0
    }
}

/// `improvement` is positive when the candidate is better.
fn hint(improvement: f64) -> &'static str {
    if improvement > 1.0 {
        "faster"
    } else if improvement < -1.0 {
        "slower"
    } else {
        "~same"
    }
}
