//! Console output: tables on stderr, CSV on stdout.

use crate::batch::{planned_batches, LoadReport};
use crate::dataset::DatasetSizes;
use crate::mongo::VisibilityReport;
use crate::query::{Query, QueryLatencies};
use crate::stats::{duration_ms, throughput, LatencyStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Quiet,
    Csv,
}

pub struct Reporter {
    backend: &'static str,
    mode: OutputMode,
}

impl Reporter {
    /// In CSV mode the header row is printed immediately.
    pub fn new(backend: &'static str, mode: OutputMode) -> Self {
        if mode == OutputMode::Csv {
            println!("{}", csv_header());
        }
        Self { backend, mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn header(&self, title: &str, sizes: &DatasetSizes, batch_size: usize, trials: usize, seed: u64) {
        if self.mode != OutputMode::Table {
            return;
        }
        eprintln!("=== {title} ===");
        eprintln!(
            "  users={}  films={}  likes={}  bookmarks={}",
            fmt_num(sizes.users as u64),
            fmt_num(sizes.films as u64),
            fmt_num(sizes.likes as u64),
            fmt_num(sizes.bookmarks as u64),
        );
        eprintln!(
            "  batch={} ({} batches)  trials={}  seed={}",
            fmt_num(batch_size as u64),
            fmt_num(planned_batches(sizes, batch_size) as u64),
            trials,
            seed
        );
        eprintln!();
    }

    pub fn load(&self, load: &LoadReport) {
        match self.mode {
            OutputMode::Csv => {
                println!(
                    "{}",
                    csv_row(self.backend, "insert", "total", load.records(), load.ops_per_sec(), None, None)
                );
                for e in &load.entities {
                    println!(
                        "{}",
                        csv_row(
                            self.backend,
                            "insert",
                            e.entity.name(),
                            e.summary.records,
                            throughput(e.summary.records, e.elapsed),
                            None,
                            None,
                        )
                    );
                }
            }
            OutputMode::Quiet => {
                eprintln!(
                    "{} insert: {} records in {:.2}s ({} records/s)",
                    self.backend,
                    fmt_num(load.records() as u64),
                    load.elapsed.as_secs_f64(),
                    fmt_num(load.ops_per_sec() as u64),
                );
            }
            OutputMode::Table => {
                eprintln!(
                    "  Insert: {} records in {:.2}s ({} records/s, {} batches)",
                    fmt_num(load.records() as u64),
                    load.elapsed.as_secs_f64(),
                    fmt_num(load.ops_per_sec() as u64),
                    fmt_num(load.batches() as u64),
                );
                eprintln!();
                eprintln!(
                    "  {:<12} {:>12}  {:>8}  {:>10}  {:>12}",
                    "Entity", "records", "batches", "seconds", "records/s"
                );
                eprintln!("  {}", "-".repeat(60));
                for e in &load.entities {
                    eprintln!(
                        "  {:<12} {:>12}  {:>8}  {:>10.2}  {:>12}",
                        e.entity.name(),
                        fmt_num(e.summary.records as u64),
                        fmt_num(e.summary.batches as u64),
                        e.elapsed.as_secs_f64(),
                        fmt_num(throughput(e.summary.records, e.elapsed) as u64),
                    );
                }
                eprintln!();
            }
        }
    }

    pub fn queries(&self, latencies: &QueryLatencies) {
        let stats: Vec<(Query, LatencyStats)> = Query::ALL
            .iter()
            .filter_map(|&q| LatencyStats::from_samples(latencies.samples(q), None).map(|s| (q, s)))
            .collect();

        match self.mode {
            OutputMode::Csv => {
                for (q, s) in &stats {
                    println!(
                        "{}",
                        csv_row(self.backend, "query", q.slug(), s.count, s.ops_per_sec, Some(s), None)
                    );
                }
            }
            OutputMode::Quiet => {
                let means: Vec<String> = stats
                    .iter()
                    .map(|(q, s)| format!("{}={:.4}s", q.slug(), s.mean.as_secs_f64()))
                    .collect();
                eprintln!("{} queries: {}", self.backend, means.join(", "));
            }
            OutputMode::Table => {
                eprintln!(
                    "  {:<22} {:>6}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}",
                    "Query", "trials", "mean (s)", "p50", "p95", "p99", "max"
                );
                eprintln!("  {}", "-".repeat(84));
                for (q, s) in &stats {
                    eprintln!(
                        "  {:<22} {:>6}  {:>9.4}  {:>7.3}ms  {:>7.3}ms  {:>7.3}ms  {:>7.3}ms",
                        q.description(),
                        s.count,
                        s.mean.as_secs_f64(),
                        duration_ms(s.p50),
                        duration_ms(s.p95),
                        duration_ms(s.p99),
                        duration_ms(s.max),
                    );
                }
                eprintln!();
            }
        }
    }

    pub fn visibility(&self, report: &VisibilityReport) {
        match self.mode {
            OutputMode::Csv => {
                println!(
                    "{}",
                    csv_row(self.backend, "visibility", "likes", report.trials, 0.0, None, Some(report.issues))
                );
            }
            OutputMode::Quiet | OutputMode::Table => {
                if report.passed() {
                    eprintln!(
                        "  Visibility: all {} writes were visible to the next read",
                        report.trials
                    );
                } else {
                    eprintln!(
                        "  Visibility: {} of {} writes were not visible to the next read",
                        report.issues, report.trials
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

pub fn csv_header() -> &'static str {
    "\"backend\",\"phase\",\"name\",\"count\",\"ops_sec\",\"mean_s\",\"p50_ms\",\"p95_ms\",\"p99_ms\",\"max_ms\",\"issues\""
}

pub fn csv_row(
    backend: &str,
    phase: &str,
    name: &str,
    count: usize,
    ops_per_sec: f64,
    stats: Option<&LatencyStats>,
    issues: Option<usize>,
) -> String {
    let latency = match stats {
        Some(s) => format!(
            "{:.6},{:.3},{:.3},{:.3},{:.3}",
            s.mean.as_secs_f64(),
            duration_ms(s.p50),
            duration_ms(s.p95),
            duration_ms(s.p99),
            duration_ms(s.max),
        ),
        None => ",,,,".to_string(),
    };
    let issues = issues.map(|n| n.to_string()).unwrap_or_default();
    format!("\"{backend}\",\"{phase}\",\"{name}\",{count},{ops_per_sec:.2},{latency},{issues}")
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// `1234567` -> `"1,234,567"`.
pub fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Human-readable duration from nanoseconds, picking ns/us/ms/s.
pub fn format_ns(ns: u64) -> String {
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} us", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    }
}
