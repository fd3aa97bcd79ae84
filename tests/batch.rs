//! Batching loop tests: chunk sizes, batch sums, progress and error handling.

mod common;

use common::{ms, small_dataset};
use indicatif::ProgressBar;
use ugc_benchmarks::batch::{
    batch_count, insert_in_batches, insert_progress, planned_batches, timed_load, trial_progress,
    BatchSummary, LoadReport,
};
use ugc_benchmarks::dataset::Entity;
use ugc_benchmarks::Error;

#[test]
fn batch_sum_equals_total_records() {
    let records: Vec<u32> = (0..25_003).collect();
    let progress = ProgressBar::hidden();
    let mut sizes = Vec::new();

    let summary = insert_in_batches(&records, 10_000, &progress, |chunk| {
        sizes.push(chunk.len());
        Ok(())
    })
    .unwrap();

    assert_eq!(sizes, vec![10_000, 10_000, 5_003]);
    assert_eq!(sizes.iter().sum::<usize>(), records.len());
    assert_eq!(
        summary,
        BatchSummary {
            records: 25_003,
            batches: 3
        }
    );
    assert_eq!(progress.position(), 25_003);
}

#[test]
fn chunks_are_written_in_order() {
    let records: Vec<u32> = (0..10).collect();
    let mut seen = Vec::new();

    insert_in_batches(&records, 3, &ProgressBar::hidden(), |chunk| {
        seen.extend_from_slice(chunk);
        Ok(())
    })
    .unwrap();

    assert_eq!(seen, records);
}

#[test]
fn exact_multiple_has_no_trailing_batch() {
    let records = vec![0u8; 40];
    let summary = insert_in_batches(&records, 10, &ProgressBar::hidden(), |_| Ok(())).unwrap();
    assert_eq!(summary.batches, 4);
    assert_eq!(batch_count(40, 10), 4);
    assert_eq!(batch_count(41, 10), 5);
    assert_eq!(batch_count(0, 10), 0);
}

#[test]
fn empty_input_writes_nothing() {
    let records: Vec<u8> = Vec::new();
    let mut calls = 0;
    let summary = insert_in_batches(&records, 10, &ProgressBar::hidden(), |_| {
        calls += 1;
        Ok(())
    })
    .unwrap();

    assert_eq!(calls, 0);
    assert_eq!(summary, BatchSummary::default());
}

#[test]
fn zero_batch_size_is_rejected() {
    let records = vec![1, 2, 3];
    let err = insert_in_batches(&records, 0, &ProgressBar::hidden(), |_| Ok(())).unwrap_err();
    assert!(matches!(err, Error::ZeroBatchSize));
}

#[test]
fn first_error_stops_the_loop() {
    let records: Vec<u32> = (0..50).collect();
    let progress = ProgressBar::hidden();
    let mut calls = 0;

    let err = insert_in_batches(&records, 10, &progress, |_| {
        calls += 1;
        if calls == 3 {
            return Err(Error::Io(std::io::Error::other("write failed")));
        }
        Ok(())
    })
    .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(calls, 3);
    // Only the two successful batches count as progress.
    assert_eq!(progress.position(), 20);
}

#[test]
fn timed_load_covers_every_entity() {
    let ds = small_dataset();
    let progress = ProgressBar::hidden();
    let mut report = LoadReport::default();

    timed_load(&mut report, Entity::Users, &ds.users, 64, &progress, |_| Ok(())).unwrap();
    timed_load(&mut report, Entity::Films, &ds.films, 64, &progress, |_| Ok(())).unwrap();
    timed_load(&mut report, Entity::Likes, &ds.likes, 64, &progress, |_| Ok(())).unwrap();
    timed_load(&mut report, Entity::Bookmarks, &ds.bookmarks, 64, &progress, |_| Ok(())).unwrap();
    report.elapsed = ms(500);

    let order: Vec<_> = report.entities.iter().map(|e| e.entity).collect();
    assert_eq!(order, Entity::ALL.to_vec());
    assert_eq!(report.records(), ds.total_records());
    assert_eq!(
        report.batches(),
        batch_count(200, 64) + batch_count(50, 64) + batch_count(1_000, 64) + batch_count(540, 64)
    );
    assert_eq!(report.batches(), planned_batches(&ds.sizes(), 64));
    assert_eq!(progress.position(), ds.total_records() as u64);
    assert!((report.ops_per_sec() - ds.total_records() as f64 * 2.0).abs() < 1e-6);
}

#[test]
fn progress_bars_have_requested_length() {
    let bar = insert_progress(1_234, false).unwrap();
    assert_eq!(bar.length(), Some(1_234));

    let bar = trial_progress(100, false).unwrap();
    assert_eq!(bar.length(), Some(100));

    let hidden = insert_progress(1_234, true).unwrap();
    assert!(hidden.is_hidden());
}
