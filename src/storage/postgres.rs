//! PostgreSQL backend.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::StorageResult;

mod sql {
    pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    title TEXT,
    description TEXT,
    done BOOLEAN,
    due_date DATE
)";
    pub const SELECT_ALL: &str =
        "SELECT id, title, description, done, due_date FROM todos ORDER BY id";
    pub const SELECT_BY_ID: &str =
        "SELECT id, title, description, done, due_date FROM todos WHERE id = $1";
    pub const INSERT: &str =
        "INSERT INTO todos (title, description, done, due_date) VALUES ($1, $2, $3, $4)";
    pub const UPDATE: &str =
        "UPDATE todos SET title = $1, description = $2, done = $3, due_date = $4 WHERE id = $5";
    pub const DELETE: &str = "DELETE FROM todos WHERE id = $1";
}

#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}

sql_backend!(PgTodoRepository, PgTodoWriter, Postgres, sql);
