//! Result recorder for saving benchmark results to JSON files.

use crate::batch::LoadReport;
use crate::dataset::{DatasetSizes, Entity};
use crate::mongo::VisibilityReport;
use crate::query::{Query, QueryLatencies};
use crate::schema::*;
use crate::stats::LatencyStats;
use crate::Result;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result name for the insert phase: `insert/total` or `insert/<entity>`.
pub fn insert_name(entity: Option<Entity>) -> String {
    match entity {
        Some(e) => format!("insert/{}", e.name()),
        None => "insert/total".to_string(),
    }
}

pub fn query_name(query: Query) -> String {
    format!("query/{}", query.slug())
}

pub const VISIBILITY_NAME: &str = "visibility/likes";

/// Run parameters attached to every result of a run.
pub fn run_parameters(
    sizes: &DatasetSizes,
    batch_size: usize,
    trials: usize,
    seed: u64,
) -> HashMap<String, serde_json::Value> {
    let mut params = HashMap::new();
    params.insert("users".into(), serde_json::json!(sizes.users));
    params.insert("films".into(), serde_json::json!(sizes.films));
    params.insert("likes".into(), serde_json::json!(sizes.likes));
    params.insert("bookmarks".into(), serde_json::json!(sizes.bookmarks));
    params.insert("batch_size".into(), serde_json::json!(batch_size));
    params.insert("trials".into(), serde_json::json!(trials));
    params.insert("seed".into(), serde_json::json!(seed));
    params
}

/// Accumulates results for one run and writes them to a JSON file.
pub struct ResultRecorder {
    backend: String,
    metadata: RunMetadata,
    parameters: HashMap<String, serde_json::Value>,
    results: Vec<BenchmarkResult>,
}

impl ResultRecorder {
    /// Captures metadata (hardware, git, timestamp) at construction time.
    /// `parameters` are attached to every recorded result.
    pub fn new(backend: &str, parameters: HashMap<String, serde_json::Value>) -> Self {
        Self {
            backend: backend.to_string(),
            metadata: RunMetadata {
                timestamp: chrono::Utc::now()
                    .format("%Y-%m-%dT%H:%M:%SZ")
                    .to_string(),
                git_commit: git(&["rev-parse", "--short", "HEAD"]),
                git_branch: git(&["rev-parse", "--abbrev-ref", "HEAD"]),
                git_dirty: git(&["status", "--porcelain"]).map(|out| !out.is_empty()),
                backend: backend.to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                hardware: capture_hardware(),
            },
            parameters,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    fn push(&mut self, benchmark: String, metrics: BenchmarkMetrics) {
        self.results.push(BenchmarkResult {
            benchmark,
            category: self.backend.clone(),
            parameters: self.parameters.clone(),
            metrics,
        });
    }

    /// One result for the whole phase plus one per entity.
    pub fn record_load(&mut self, load: &LoadReport) {
        self.push(
            insert_name(None),
            BenchmarkMetrics {
                ops_per_sec: Some(load.ops_per_sec()),
                records: Some(load.records() as u64),
                batches: Some(load.batches() as u64),
                elapsed_ms: Some(load.elapsed.as_millis() as u64),
                ..Default::default()
            },
        );
        for entity in &load.entities {
            self.push(
                insert_name(Some(entity.entity)),
                BenchmarkMetrics {
                    ops_per_sec: Some(crate::stats::throughput(
                        entity.summary.records,
                        entity.elapsed,
                    )),
                    records: Some(entity.summary.records as u64),
                    batches: Some(entity.summary.batches as u64),
                    elapsed_ms: Some(entity.elapsed.as_millis() as u64),
                    ..Default::default()
                },
            );
        }
    }

    /// One result per query that has samples.
    pub fn record_queries(&mut self, latencies: &QueryLatencies) {
        for query in Query::ALL {
            let Some(s) = LatencyStats::from_samples(latencies.samples(query), None) else {
                continue;
            };
            self.push(
                query_name(query),
                BenchmarkMetrics {
                    ops_per_sec: Some(s.ops_per_sec),
                    avg_ns: Some(s.mean.as_nanos() as u64),
                    p50_ns: Some(s.p50.as_nanos() as u64),
                    p95_ns: Some(s.p95.as_nanos() as u64),
                    p99_ns: Some(s.p99.as_nanos() as u64),
                    min_ns: Some(s.min.as_nanos() as u64),
                    max_ns: Some(s.max.as_nanos() as u64),
                    samples: Some(s.count as u64),
                    records: Some(latencies.rows(query)),
                    ..Default::default()
                },
            );
        }
    }

    pub fn record_visibility(&mut self, report: &VisibilityReport) {
        self.push(
            VISIBILITY_NAME.to_string(),
            BenchmarkMetrics {
                samples: Some(report.trials as u64),
                issues: Some(report.issues as u64),
                ..Default::default()
            },
        );
    }

    pub fn into_report(self) -> BenchmarkReport {
        BenchmarkReport {
            schema_version: SCHEMA_VERSION,
            metadata: self.metadata,
            results: self.results,
        }
    }

    /// Write all results to `<dir>/<backend>-<timestamp>-<commit>.json`.
    pub fn save(self, dir: &Path) -> Result<PathBuf> {
        let commit = self
            .metadata
            .git_commit
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        let ts = self.metadata.timestamp.replace(':', "-");
        let filename = format!("{}-{}-{}.json", self.backend, ts, commit);

        std::fs::create_dir_all(dir)?;
        let path = dir.join(filename);
        let json = serde_json::to_string_pretty(&self.into_report())?;
        std::fs::write(&path, json)?;

        log::info!("results saved to {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Metadata capture helpers
// ---------------------------------------------------------------------------

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn capture_hardware() -> HardwareInfo {
    HardwareInfo {
        cpu: read_cpu_model(),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0),
        ram_gb: read_total_ram_gb(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}

fn read_cpu_model() -> String {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("model name"))
                .and_then(|l| l.split_once(':'))
                .map(|(_, model)| model.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn read_total_ram_gb() -> u64 {
    // MemTotal:       32780212 kB
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|l| l.starts_with("MemTotal:"))
                .and_then(|l| l.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok())
        })
        .map(|kb| kb / (1024 * 1024))
        .unwrap_or(0)
}
