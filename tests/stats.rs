//! Latency statistics and console formatting.

mod common;

use std::time::Duration;

use common::ms;
use ugc_benchmarks::query::{Query, QueryLatencies};
use ugc_benchmarks::report::{csv_header, csv_row, fmt_num, format_ns};
use ugc_benchmarks::stats::{duration_ms, throughput, LatencyStats};

#[test]
fn empty_samples_have_no_stats() {
    assert!(LatencyStats::from_samples(&[], None).is_none());
}

#[test]
fn percentiles_over_hundred_samples() {
    // 1ms..=100ms, shuffled order must not matter.
    let mut samples: Vec<Duration> = (1..=100).map(ms).collect();
    samples.reverse();

    let s = LatencyStats::from_samples(&samples, None).unwrap();
    assert_eq!(s.count, 100);
    assert_eq!(s.min, ms(1));
    assert_eq!(s.max, ms(100));
    assert_eq!(s.p50, ms(51));
    assert_eq!(s.p95, ms(96));
    assert_eq!(s.p99, ms(100));
    assert_eq!(s.mean, Duration::from_micros(50_500));
}

#[test]
fn single_sample() {
    let s = LatencyStats::from_samples(&[ms(7)], None).unwrap();
    assert_eq!(s.p50, ms(7));
    assert_eq!(s.p99, ms(7));
    assert_eq!(s.mean, ms(7));
    assert!((s.ops_per_sec - 1000.0 / 7.0).abs() < 1e-6);
}

#[test]
fn mean_rounds_down_to_the_nanosecond() {
    let s = LatencyStats::from_samples(&[ms(1), ms(2), ms(4)], None).unwrap();
    assert_eq!(s.mean, Duration::from_nanos(2_333_333));

    let s = LatencyStats::from_samples(&[Duration::from_nanos(1), Duration::from_nanos(2)], None)
        .unwrap();
    assert_eq!(s.mean, Duration::from_nanos(1));
}

#[test]
fn wall_time_drives_throughput_when_given() {
    let samples = vec![ms(10); 10];
    let s = LatencyStats::from_samples(&samples, Some(Duration::from_secs(2))).unwrap();
    assert!((s.ops_per_sec - 5.0).abs() < 1e-9);

    let s = LatencyStats::from_samples(&samples, None).unwrap();
    assert!((s.ops_per_sec - 100.0).abs() < 1e-9);
}

#[test]
fn throughput_of_zero_elapsed_is_zero() {
    assert_eq!(throughput(100, Duration::ZERO), 0.0);
    assert!((throughput(100, ms(500)) - 200.0).abs() < 1e-9);
    assert!((duration_ms(Duration::from_micros(1_500)) - 1.5).abs() < 1e-9);
}

#[test]
fn query_latencies_are_kept_per_query() {
    let mut lat = QueryLatencies::with_trials(2);
    lat.push(Query::LikedFilms, ms(3), 4);
    lat.push(Query::LikedFilms, ms(5), 2);
    lat.push(Query::FilmAvgRating, ms(1), 1);

    assert_eq!(lat.samples(Query::LikedFilms), &[ms(3), ms(5)]);
    assert_eq!(lat.rows(Query::LikedFilms), 6);
    assert!(lat.samples(Query::Bookmarks).is_empty());
    assert_eq!(lat.samples(Query::FilmAvgRating).len(), 1);
}

#[test]
fn query_slugs_are_distinct() {
    let mut slugs: Vec<_> = Query::ALL.iter().map(|q| q.slug()).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), Query::ALL.len());
}

#[test]
fn number_formatting() {
    assert_eq!(fmt_num(0), "0");
    assert_eq!(fmt_num(999), "999");
    assert_eq!(fmt_num(1_000), "1,000");
    assert_eq!(fmt_num(10_000_000), "10,000,000");
    assert_eq!(fmt_num(1_234_567), "1,234,567");

    assert_eq!(format_ns(999), "999 ns");
    assert_eq!(format_ns(1_500), "1.50 us");
    assert_eq!(format_ns(2_500_000), "2.50 ms");
    assert_eq!(format_ns(3_000_000_000), "3.00 s");
}

#[test]
fn csv_rows_match_header_width() {
    let columns = csv_header().split(',').count();

    let s = LatencyStats::from_samples(&[ms(2), ms(4)], None).unwrap();
    let query = csv_row("postgres", "query", "bookmarks", 2, s.ops_per_sec, Some(&s), None);
    let insert = csv_row("mongodb", "insert", "total", 10, 123.0, None, None);
    let visibility = csv_row("mongodb", "visibility", "likes", 100, 0.0, None, Some(3));

    assert_eq!(query.split(',').count(), columns);
    assert_eq!(insert.split(',').count(), columns);
    assert_eq!(visibility.split(',').count(), columns);
    assert!(query.starts_with("\"postgres\",\"query\",\"bookmarks\",2,"));
    assert!(visibility.ends_with(",3"));
}
