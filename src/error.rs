use thiserror::Error;

/// Errors raised while generating, loading or querying a benchmark dataset.
#[derive(Debug, Error)]
pub enum Error {
    #[error("postgres: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("batch size must be greater than zero")]
    ZeroBatchSize,

    /// Likes and bookmarks reference users and films, so both pools must be non-empty.
    #[error("cannot generate {count} {entity} without at least one user and one film")]
    EmptyReferencePool { entity: &'static str, count: usize },

    #[error("progress bar template: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
