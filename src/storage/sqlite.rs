//! SQLite backend, for local runs and tests.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

use super::TodoRepository;
use crate::config::DatabaseConfig;
use crate::error::StorageResult;

mod sql {
    pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT,
    done BOOLEAN,
    due_date DATE
)";
    pub const SELECT_ALL: &str =
        "SELECT id, title, description, done, due_date FROM todos ORDER BY id";
    pub const SELECT_BY_ID: &str =
        "SELECT id, title, description, done, due_date FROM todos WHERE id = ?";
    pub const INSERT: &str =
        "INSERT INTO todos (title, description, done, due_date) VALUES (?, ?, ?, ?)";
    pub const UPDATE: &str =
        "UPDATE todos SET title = ?, description = ?, done = ?, due_date = ? WHERE id = ?";
    pub const DELETE: &str = "DELETE FROM todos WHERE id = ?";
}

#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        let pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        // An in-memory database lives only as long as its connection.
        let pool_options = if is_in_memory(&config.url) {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// A fresh private in-memory database with the schema in place.
    pub async fn in_memory() -> StorageResult<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        let repository = Self::connect(&config).await?;
        repository.ensure_schema().await?;
        Ok(repository)
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

sql_backend!(SqliteTodoRepository, SqliteTodoWriter, Sqlite, sql);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::scenarios;

    async fn empty() -> SqliteTodoRepository {
        SqliteTodoRepository::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn list_all_returns_rows_in_insertion_order() {
        scenarios::list_all_returns_rows_in_insertion_order(&empty().await).await;
    }

    #[tokio::test]
    async fn find_by_id_is_none_for_unknown_id() {
        scenarios::find_by_id_is_none_for_unknown_id(&empty().await).await;
    }

    #[tokio::test]
    async fn insert_ignores_client_id() {
        scenarios::insert_ignores_client_id(&empty().await).await;
    }

    #[tokio::test]
    async fn insert_keeps_missing_fields_null() {
        scenarios::insert_keeps_missing_fields_null(&empty().await).await;
    }

    #[tokio::test]
    async fn replace_overwrites_every_field() {
        scenarios::replace_overwrites_every_field(&empty().await).await;
    }

    #[tokio::test]
    async fn replace_of_missing_row_is_a_no_op() {
        scenarios::replace_of_missing_row_is_a_no_op(&empty().await).await;
    }

    #[tokio::test]
    async fn remove_deletes_row() {
        scenarios::remove_deletes_row(&empty().await).await;
    }

    #[tokio::test]
    async fn dropped_writer_rolls_back() {
        scenarios::dropped_writer_rolls_back(&empty().await).await;
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://todos?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://todos.db?mode=rwc"));
    }
}
