//! The fixed read queries timed against both stores.

use std::time::Duration;

pub const DEFAULT_TRIALS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// Titles of films a user rated above the like threshold.
    LikedFilms,
    /// Number of likes above the threshold for one film.
    FilmLikeCount,
    /// Titles of films a user bookmarked.
    Bookmarks,
    /// Average rating of one film.
    FilmAvgRating,
}

impl Query {
    pub const ALL: [Query; 4] = [
        Query::LikedFilms,
        Query::FilmLikeCount,
        Query::Bookmarks,
        Query::FilmAvgRating,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::LikedFilms => "liked-films",
            Self::FilmLikeCount => "film-like-count",
            Self::Bookmarks => "bookmarks",
            Self::FilmAvgRating => "film-avg-rating",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LikedFilms => "user's liked films",
            Self::FilmLikeCount => "likes of a film",
            Self::Bookmarks => "user's bookmarks",
            Self::FilmAvgRating => "film average rating",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::LikedFilms => 0,
            Self::FilmLikeCount => 1,
            Self::Bookmarks => 2,
            Self::FilmAvgRating => 3,
        }
    }
}

/// One latency sample per trial for each query.
#[derive(Debug, Clone, Default)]
pub struct QueryLatencies {
    samples: [Vec<Duration>; 4],
    /// Rows returned across all trials, per query. Keeps result sets observable.
    rows: [u64; 4],
}

impl QueryLatencies {
    pub fn with_trials(trials: usize) -> Self {
        Self {
            samples: std::array::from_fn(|_| Vec::with_capacity(trials)),
            rows: [0; 4],
        }
    }

    pub fn push(&mut self, query: Query, elapsed: Duration, rows: u64) {
        self.samples[query.index()].push(elapsed);
        self.rows[query.index()] += rows;
    }

    pub fn samples(&self, query: Query) -> &[Duration] {
        &self.samples[query.index()]
    }

    pub fn rows(&self, query: Query) -> u64 {
        self.rows[query.index()]
    }
}
