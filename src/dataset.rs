//! Synthetic dataset: users, films, likes and bookmarks.
//!
//! Every entity is generated once, in memory, before anything touches a
//! database. Likes and bookmarks reference users and films picked uniformly at
//! random, so duplicate (user, film) pairs are possible and left to the store
//! to resolve.

use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_USERS: usize = 2_000_000;
pub const DEFAULT_FILMS: usize = 300_000;
pub const DEFAULT_LIKES: usize = 5_000_000;
pub const DEFAULT_BOOKMARKS: usize = 2_700_000;

/// Ratings are drawn from `0..=MAX_RATING`.
pub const MAX_RATING: i16 = 10;

/// Queries and the visibility check treat a rating above this as a "like".
pub const LIKED_THRESHOLD: i16 = 5;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Drama,
}

impl Genre {
    pub const ALL: [Genre; 2] = [Genre::Action, Genre::Drama];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Drama => "Drama",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub genre: Genre,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Like {
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub rating: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bookmark {
    pub user_id: Uuid,
    pub film_id: Uuid,
}

/// The four entity kinds, in the order they are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Users,
    Films,
    Likes,
    Bookmarks,
}

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Users,
        Entity::Films,
        Entity::Likes,
        Entity::Bookmarks,
    ];

    /// Table / collection name. Identical for both backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Films => "films",
            Self::Likes => "likes",
            Self::Bookmarks => "bookmarks",
        }
    }
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Requested number of records per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSizes {
    pub users: usize,
    pub films: usize,
    pub likes: usize,
    pub bookmarks: usize,
}

impl Default for DatasetSizes {
    fn default() -> Self {
        Self {
            users: DEFAULT_USERS,
            films: DEFAULT_FILMS,
            likes: DEFAULT_LIKES,
            bookmarks: DEFAULT_BOOKMARKS,
        }
    }
}

impl DatasetSizes {
    pub fn get(&self, entity: Entity) -> usize {
        match entity {
            Entity::Users => self.users,
            Entity::Films => self.films,
            Entity::Likes => self.likes,
            Entity::Bookmarks => self.bookmarks,
        }
    }

    pub fn total(&self) -> usize {
        self.users + self.films + self.likes + self.bookmarks
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub films: Vec<Film>,
    pub likes: Vec<Like>,
    pub bookmarks: Vec<Bookmark>,
}

impl Dataset {
    /// Generate a dataset with exactly the requested number of each entity.
    pub fn generate<R: Rng + ?Sized>(sizes: &DatasetSizes, rng: &mut R) -> Result<Self> {
        let pool_empty = sizes.users == 0 || sizes.films == 0;
        if pool_empty && sizes.likes > 0 {
            return Err(Error::EmptyReferencePool {
                entity: Entity::Likes.name(),
                count: sizes.likes,
            });
        }
        if pool_empty && sizes.bookmarks > 0 {
            return Err(Error::EmptyReferencePool {
                entity: Entity::Bookmarks.name(),
                count: sizes.bookmarks,
            });
        }

        let users: Vec<User> = (0..sizes.users)
            .map(|i| User {
                id: random_id(rng),
                name: format!("User {i}"),
                email: format!("user{i}@example.com"),
            })
            .collect();

        let films: Vec<Film> = (0..sizes.films)
            .map(|i| Film {
                id: random_id(rng),
                title: format!("Film {i}"),
                genre: Genre::ALL[rng.gen_range(0..Genre::ALL.len())],
            })
            .collect();

        let likes = (0..sizes.likes)
            .map(|_| Like {
                user_id: users[rng.gen_range(0..users.len())].id,
                film_id: films[rng.gen_range(0..films.len())].id,
                rating: rng.gen_range(0..=MAX_RATING),
            })
            .collect();

        let bookmarks = (0..sizes.bookmarks)
            .map(|_| Bookmark {
                user_id: users[rng.gen_range(0..users.len())].id,
                film_id: films[rng.gen_range(0..films.len())].id,
            })
            .collect();

        Ok(Self {
            users,
            films,
            likes,
            bookmarks,
        })
    }

    pub fn sizes(&self) -> DatasetSizes {
        DatasetSizes {
            users: self.users.len(),
            films: self.films.len(),
            likes: self.likes.len(),
            bookmarks: self.bookmarks.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        self.sizes().total()
    }
}

/// Random v4 UUID drawn from `rng`, so seeded runs produce the same ids.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Build the run's RNG. Without an explicit seed one is drawn from entropy;
/// the seed actually used is returned so it can be logged and recorded.
pub fn seeded_rng(seed: Option<u64>) -> (StdRng, u64) {
    let seed = seed.unwrap_or_else(rand::random);
    (StdRng::seed_from_u64(seed), seed)
}
