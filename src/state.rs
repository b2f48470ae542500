use sqlx::SqlitePool;

use crate::database::{Repository, Resource};

/// Shared handler state: the connection pool and nothing else
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn repo<T: Resource>(&self) -> Repository<T> {
        Repository::new(self.pool.clone())
    }
}
