//! Command-line configuration shared by both benchmark binaries.

use crate::batch::DEFAULT_BATCH_SIZE;
use crate::dataset::{
    DatasetSizes, DEFAULT_BOOKMARKS, DEFAULT_FILMS, DEFAULT_LIKES, DEFAULT_USERS,
};
use crate::query::DEFAULT_TRIALS;
use crate::report::OutputMode;
use clap::Args;
use std::path::PathBuf;

/// Dataset shape and measurement parameters.
#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Number of users to generate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_USERS)]
    pub users: usize,

    /// Number of films to generate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FILMS)]
    pub films: usize,

    /// Number of likes to generate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_LIKES)]
    pub likes: usize,

    /// Number of bookmarks to generate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BOOKMARKS)]
    pub bookmarks: usize,

    /// Records written per bulk insert
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
    pub batch_size: usize,

    /// Number of trials for each timed query
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// RNG seed; a random seed is chosen and logged when omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

impl DatasetArgs {
    pub fn sizes(&self) -> DatasetSizes {
        DatasetSizes {
            users: self.users,
            films: self.films,
            likes: self.likes,
            bookmarks: self.bookmarks,
        }
    }
}

/// Where and how results are reported.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Directory for JSON result files
    #[arg(long, value_name = "DIR", default_value = "results")]
    pub results_dir: PathBuf,

    /// Do not write a JSON result file
    #[arg(long)]
    pub no_record: bool,

    /// Print CSV rows to stdout instead of tables
    #[arg(long, conflicts_with = "quiet")]
    pub csv: bool,

    /// One summary line per phase
    #[arg(short, long)]
    pub quiet: bool,
}

impl OutputArgs {
    pub fn mode(&self) -> OutputMode {
        if self.csv {
            OutputMode::Csv
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Table
        }
    }
}

fn parse_batch_size(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        return Err("batch size must be at least 1".to_string());
    }
    Ok(n)
}

/// Load `.env` from the working directory if there is one.
///
/// Must run before argument parsing so `env` fallbacks see its values.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
