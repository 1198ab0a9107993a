//! Data layer module
//!
//! Handles all data persistence:
//! - Repository traits (accounts, statuses, public timeline)
//! - SQLite-backed store
//! - In-memory store

mod database;
mod error;
mod memory;
mod models;
mod repository;
mod timeline;

use std::sync::Arc;

pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::*;
pub use repository::{AccountRepository, StatusRepository, TimelineRepository};
pub use timeline::{
    Criterion, DEFAULT_LIMIT, MAX_LIMIT, PublicTimelineQuery, TimelineFilter, clamp_limit,
};

#[cfg(test)]
pub use repository::{MockAccountRepository, MockStatusRepository, MockTimelineRepository};

/// The repositories a request handler may use
///
/// Callers depend only on the traits; the concrete store is chosen once at
/// startup.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub timelines: Arc<dyn TimelineRepository>,
}

impl Repositories {
    /// Repositories backed by a SQLite database
    pub fn sqlite(db: Arc<Database>) -> Self {
        Self {
            accounts: db.clone(),
            statuses: db.clone(),
            timelines: db,
        }
    }

    /// Repositories backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            accounts: store.clone(),
            statuses: store.clone(),
            timelines: store,
        }
    }
}
