//! MongoDB insert/query benchmark with a read-your-write visibility check.
//!
//! Run:    `cargo run --release --bin mongo-bench`
//! Small:  `cargo run --release --bin mongo-bench -- --users 10000 --films 1000 --likes 20000 --bookmarks 10000`
//! Quiet:  `cargo run --release --bin mongo-bench -- -q --skip-visibility-check`
//!
//! The connection string comes from `--uri`, `MONGODB_URI` or `.env`.

use anyhow::Context;
use clap::Parser;
use ugc_benchmarks::batch::{insert_progress, trial_progress};
use ugc_benchmarks::config::{load_dotenv, DatasetArgs, OutputArgs};
use ugc_benchmarks::dataset::{seeded_rng, Dataset};
use ugc_benchmarks::logging;
use ugc_benchmarks::mongo::{MongoBench, DEFAULT_DATABASE, DEFAULT_URI};
use ugc_benchmarks::recorder::{run_parameters, ResultRecorder};
use ugc_benchmarks::report::{OutputMode, Reporter};

const BACKEND: &str = "mongodb";

/// Load synthetic users, films, likes and bookmarks into MongoDB, time a
/// fixed set of read queries and check that fresh writes are visible.
#[derive(Debug, Parser)]
#[command(name = "mongo-bench", author, version, about, long_about = None)]
struct Cli {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = DEFAULT_URI, hide_env_values = true)]
    uri: String,

    /// Database holding the benchmark collections
    #[arg(long, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE)]
    database: String,

    /// Skip the read-your-write check after the queries
    #[arg(long)]
    skip_visibility_check: bool,

    #[command(flatten)]
    dataset: DatasetArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() {
    if let Err(err) = run() {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let env_file = load_dotenv().context("reading .env")?;
    let cli = Cli::parse();
    logging::init();
    if let Some(path) = env_file {
        log::debug!("loaded environment from {}", path.display());
    }

    let sizes = cli.dataset.sizes();
    let (mut rng, seed) = seeded_rng(cli.dataset.seed);
    log::info!("seed: {seed}");

    let reporter = Reporter::new(BACKEND, cli.output.mode());
    reporter.header(
        "MongoDB UGC Benchmark",
        &sizes,
        cli.dataset.batch_size,
        cli.dataset.trials,
        seed,
    );
    let hide_progress = reporter.mode() != OutputMode::Table;

    let bench = MongoBench::connect(&cli.uri, &cli.database).context("connecting to MongoDB")?;
    bench.create_collections().context("creating collections")?;

    log::info!("generating {} records", sizes.total());
    let dataset = Dataset::generate(&sizes, &mut rng)?;

    let progress = insert_progress(dataset.total_records(), hide_progress)?;
    let load = bench
        .insert_dataset(&dataset, cli.dataset.batch_size, &progress)
        .context("inserting dataset")?;
    progress.finish_and_clear();
    reporter.load(&load);

    log::info!("running {} query trials", cli.dataset.trials);
    let latencies = bench
        .run_queries(&dataset.users, &dataset.films, cli.dataset.trials, &mut rng)
        .context("running queries")?;
    reporter.queries(&latencies);

    let visibility = if cli.skip_visibility_check {
        None
    } else {
        let progress = trial_progress(cli.dataset.trials, hide_progress)?;
        let report = bench
            .visibility_check(cli.dataset.trials, &progress, &mut rng)
            .context("checking write visibility")?;
        progress.finish_and_clear();
        reporter.visibility(&report);
        Some(report)
    };

    if !cli.output.no_record {
        let mut params = run_parameters(&sizes, cli.dataset.batch_size, cli.dataset.trials, seed);
        params.insert("database".into(), serde_json::json!(cli.database));

        let mut recorder = ResultRecorder::new(BACKEND, params);
        recorder.record_load(&load);
        recorder.record_queries(&latencies);
        if let Some(report) = &visibility {
            recorder.record_visibility(report);
        }
        recorder
            .save(&cli.output.results_dir)
            .context("saving results")?;
    }

    Ok(())
}
