//! PostgreSQL insert/query benchmark.
//!
//! Run:    `cargo run --release --bin pg-bench`
//! Small:  `cargo run --release --bin pg-bench -- --users 10000 --films 1000 --likes 20000 --bookmarks 10000`
//! CSV:    `cargo run --release --bin pg-bench -- --csv`
//!
//! The connection string comes from `--url`, `POSTGRES_URL` or `.env`.

use anyhow::Context;
use clap::Parser;
use ugc_benchmarks::batch::insert_progress;
use ugc_benchmarks::config::{load_dotenv, DatasetArgs, OutputArgs};
use ugc_benchmarks::dataset::{seeded_rng, Dataset};
use ugc_benchmarks::logging;
use ugc_benchmarks::pg::{PgBench, DEFAULT_URL};
use ugc_benchmarks::recorder::{run_parameters, ResultRecorder};
use ugc_benchmarks::report::{OutputMode, Reporter};

const BACKEND: &str = "postgres";

/// Load synthetic users, films, likes and bookmarks into PostgreSQL and time
/// a fixed set of read queries.
#[derive(Debug, Parser)]
#[command(name = "pg-bench", author, version, about, long_about = None)]
struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, env = "POSTGRES_URL", default_value = DEFAULT_URL, hide_env_values = true)]
    url: String,

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
        "PostgreSQL UGC Benchmark",
        &sizes,
        cli.dataset.batch_size,
        cli.dataset.trials,
        seed,
    );

    let mut bench = PgBench::connect(&cli.url).context("connecting to PostgreSQL")?;
    bench.create_schema().context("creating tables")?;

    log::info!("generating {} records", sizes.total());
    let dataset = Dataset::generate(&sizes, &mut rng)?;

    let progress = insert_progress(dataset.total_records(), reporter.mode() != OutputMode::Table)?;
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

    if !cli.output.no_record {
        let params = run_parameters(&sizes, cli.dataset.batch_size, cli.dataset.trials, seed);
        let mut recorder = ResultRecorder::new(BACKEND, params);
        recorder.record_load(&load);
        recorder.record_queries(&latencies);
        recorder
            .save(&cli.output.results_dir)
            .context("saving results")?;
    }

    Ok(())
}
