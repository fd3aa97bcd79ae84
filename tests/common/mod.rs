//! Shared test utilities: small datasets and result fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ugc_benchmarks::dataset::{Dataset, DatasetSizes};
use ugc_benchmarks::schema::{
    BenchmarkMetrics, BenchmarkReport, BenchmarkResult, HardwareInfo, RunMetadata, SCHEMA_VERSION,
};

pub const SEED: u64 = 0xF11A_2024;

pub fn small_sizes() -> DatasetSizes {
    DatasetSizes {
        users: 200,
        films: 50,
        likes: 1_000,
        bookmarks: 540,
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

pub fn small_dataset() -> Dataset {
    Dataset::generate(&small_sizes(), &mut rng()).unwrap()
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// =============================================================================
// Result fixtures
// =============================================================================

pub fn latency_result(name: &str, backend: &str, avg_ns: u64) -> BenchmarkResult {
    BenchmarkResult {
        benchmark: name.to_string(),
        category: backend.to_string(),
        parameters: HashMap::new(),
        metrics: BenchmarkMetrics {
            avg_ns: Some(avg_ns),
            samples: Some(100),
            ..Default::default()
        },
    }
}

pub fn throughput_result(name: &str, backend: &str, ops_per_sec: f64) -> BenchmarkResult {
    BenchmarkResult {
        benchmark: name.to_string(),
        category: backend.to_string(),
        parameters: HashMap::new(),
        metrics: BenchmarkMetrics {
            ops_per_sec: Some(ops_per_sec),
            ..Default::default()
        },
    }
}

pub fn report(backend: &str, results: Vec<BenchmarkResult>) -> BenchmarkReport {
    BenchmarkReport {
        schema_version: SCHEMA_VERSION,
        metadata: RunMetadata {
            timestamp: "2026-10-19T12:00:00Z".to_string(),
            git_commit: None,
            git_branch: None,
            git_dirty: None,
            backend: backend.to_string(),
            tool_version: "0.1.0".to_string(),
            hardware: HardwareInfo {
                cpu: "test".to_string(),
                cores: 1,
                ram_gb: 1,
                os: "linux".to_string(),
                arch: "x86_64".to_string(),
            },
        },
        results,
    }
}

pub fn write_report(dir: &Path, file: &str, report: &BenchmarkReport) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, serde_json::to_string_pretty(report).unwrap()).unwrap();
    path
}
