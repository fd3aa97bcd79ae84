//! Chunked bulk insert with a shared progress bar.

use crate::dataset::{DatasetSizes, Entity};
use crate::stats::throughput;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Outcome of loading one slice of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: usize,
    pub batches: usize,
}

/// Progress bar covering the whole insert phase (all entities).
pub fn insert_progress(total_records: usize, hidden: bool) -> Result<ProgressBar> {
    progress_bar(total_records, "records", "inserting", hidden)
}

/// Progress bar for the visibility check, one tick per trial.
pub fn trial_progress(trials: usize, hidden: bool) -> Result<ProgressBar> {
    progress_bar(trials, "trials", "visibility", hidden)
}

fn progress_bar(len: usize, unit: &str, message: &'static str, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template(&format!(
            "{{msg:>10}} [{{bar:40.cyan/blue}}] {{human_pos}}/{{human_len}} {unit} ({{per_sec}}, eta {{eta}})"
        ))?
        .progress_chars("#>-"),
    );
    bar.set_message(message);
    Ok(bar)
}

/// Write `records` in consecutive chunks of at most `batch_size`.
///
/// `write` is called once per chunk, in order; the bar advances by the chunk
/// length only after the chunk was written. The first error stops the loop.
pub fn insert_in_batches<T, F>(
    records: &[T],
    batch_size: usize,
    progress: &ProgressBar,
    mut write: F,
) -> Result<BatchSummary>
where
    F: FnMut(&[T]) -> Result<()>,
{
    if batch_size == 0 {
        return Err(Error::ZeroBatchSize);
    }

    let mut summary = BatchSummary::default();
    for chunk in records.chunks(batch_size) {
        write(chunk)?;
        progress.inc(chunk.len() as u64);
        summary.records += chunk.len();
        summary.batches += 1;
        log::trace!("batch {} written ({} records)", summary.batches, chunk.len());
    }
    Ok(summary)
}

/// Number of batches needed for `records` at `batch_size`.
pub fn batch_count(records: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    records.div_ceil(batch_size)
}

/// Total batches a full load of `sizes` takes; each entity starts a fresh batch.
pub fn planned_batches(sizes: &DatasetSizes, batch_size: usize) -> usize {
    Entity::ALL
        .iter()
        .map(|&entity| batch_count(sizes.get(entity), batch_size))
        .sum()
}

/// Timing of one entity's load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityLoad {
    pub entity: Entity,
    pub summary: BatchSummary,
    pub elapsed: Duration,
}

/// Result of the whole insert phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub entities: Vec<EntityLoad>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn records(&self) -> usize {
        self.entities.iter().map(|e| e.summary.records).sum()
    }

    pub fn batches(&self) -> usize {
        self.entities.iter().map(|e| e.summary.batches).sum()
    }

    pub fn ops_per_sec(&self) -> f64 {
        throughput(self.records(), self.elapsed)
    }
}

/// Time one call to [`insert_in_batches`] and append it to `report`.
pub fn timed_load<T, F>(
    report: &mut LoadReport,
    entity: Entity,
    records: &[T],
    batch_size: usize,
    progress: &ProgressBar,
    write: F,
) -> Result<()>
where
    F: FnMut(&[T]) -> Result<()>,
{
    progress.set_message(entity.name());
    let start = Instant::now();
    let summary = insert_in_batches(records, batch_size, progress, write)?;
    let elapsed = start.elapsed();
    log::debug!(
        "{}: {} records in {} batches ({:.2}s)",
        entity.name(),
        summary.records,
        summary.batches,
        elapsed.as_secs_f64()
    );
    report.entities.push(EntityLoad {
        entity,
        summary,
        elapsed,
    });
    Ok(())
}
