//! UGC store benchmarks
//!
//! Fills a relational store (PostgreSQL) and a document store (MongoDB) with
//! synthetic users, films, likes and bookmarks, then measures bulk insert
//! throughput and the latency of a fixed set of read queries.
//!
//! The two drivers are independent of each other; this crate only shares the
//! dataset generator, the batching loop, statistics and result reporting.
//!
//! Run: `cargo run --release --bin pg-bench` / `cargo run --release --bin mongo-bench`
//! Compare: `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod mongo;
pub mod pg;
pub mod query;
pub mod recorder;
pub mod report;
pub mod schema;
pub mod stats;

pub use error::{Error, Result};
