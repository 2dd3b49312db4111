//! Storage access for the `todos` table.
//!
//! Reads go straight through a [`TodoRepository`]. Writes go through a
//! [`TodoWriter`], a database transaction that takes effect on
//! [`TodoWriter::commit`] and rolls back when dropped.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{StorageError, StorageResult};
use crate::model::TodoItem;

/// Implement [`TodoRepository`] for `$repository` (a struct with a `pool`
/// field) and define `$writer` over a transaction on `$db`.
///
/// `$sql` names a module holding the backend's statements: `CREATE_TABLE`,
/// `SELECT_ALL`, `SELECT_BY_ID`, `INSERT`, `UPDATE` and `DELETE`. `INSERT`
/// binds title, description, done and due date in that order. `UPDATE` binds
/// the same four and then the id.
macro_rules! sql_backend {
    ($repository:ident, $writer:ident, $db:ty, $sql:ident) => {
        #[async_trait::async_trait]
        impl $crate::storage::TodoRepository for $repository {
            async fn ensure_schema(&self) -> $crate::error::StorageResult<()> {
                sqlx::query($sql::CREATE_TABLE).execute(&self.pool).await?;
                Ok(())
            }

            async fn list_all(
                &self,
            ) -> $crate::error::StorageResult<Vec<$crate::model::TodoItem>> {
                let rows = sqlx::query_as::<_, $crate::model::TodoRow>($sql::SELECT_ALL)
                    .fetch_all(&self.pool)
                    .await?;
                Ok(rows.into_iter().map($crate::model::TodoItem::from).collect())
            }

            async fn find_by_id(
                &self,
                id: i64,
            ) -> $crate::error::StorageResult<Option<$crate::model::TodoItem>> {
                let row = sqlx::query_as::<_, $crate::model::TodoRow>($sql::SELECT_BY_ID)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(row.map($crate::model::TodoItem::from))
            }

            async fn begin(
                &self,
            ) -> $crate::error::StorageResult<Box<dyn $crate::storage::TodoWriter>> {
                let tx = self.pool.begin().await?;
                Ok(Box::new($writer { tx }))
            }
        }

        struct $writer {
            tx: sqlx::Transaction<'static, $db>,
        }

        #[async_trait::async_trait]
        impl $crate::storage::TodoWriter for $writer {
            async fn insert(
                &mut self,
                item: &$crate::model::TodoItem,
            ) -> $crate::error::StorageResult<()> {
                sqlx::query($sql::INSERT)
                    .bind(item.title.as_deref())
                    .bind(item.description.as_deref())
                    .bind(item.done)
                    .bind(item.due_date)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(())
            }

            async fn replace(
                &mut self,
                item: &$crate::model::TodoItem,
            ) -> $crate::error::StorageResult<()> {
                sqlx::query($sql::UPDATE)
                    .bind(item.title.as_deref())
                    .bind(item.description.as_deref())
                    .bind(item.done)
                    .bind(item.due_date)
                    .bind(item.id)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(())
            }

            async fn remove(&mut self, id: i64) -> $crate::error::StorageResult<()> {
                sqlx::query($sql::DELETE)
                    .bind(id)
                    .execute(&mut *self.tx)
                    .await?;
                Ok(())
            }

            async fn commit(self: Box<Self>) -> $crate::error::StorageResult<()> {
                let writer = *self;
                writer.tx.commit().await?;
                Ok(())
            }
        }
    };
}

pub mod postgres;
pub mod sqlite;

#[cfg(test)]
mod scenarios;

pub use postgres::PgTodoRepository;
pub use sqlite::SqliteTodoRepository;

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create the `todos` table if it does not exist yet.
    async fn ensure_schema(&self) -> StorageResult<()>;

    /// Every row, ordered by id.
    async fn list_all(&self) -> StorageResult<Vec<TodoItem>>;

    /// The matching row, or `None` when there is none.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<TodoItem>>;

    /// Open a write transaction.
    async fn begin(&self) -> StorageResult<Box<dyn TodoWriter>>;
}

#[async_trait]
pub trait TodoWriter: Send {
    /// Append a row. Any id on `item` is ignored; storage assigns one.
    async fn insert(&mut self, item: &TodoItem) -> StorageResult<()>;

    /// Overwrite every mutable column of the row with `item.id`.
    /// Does nothing when no such row exists.
    async fn replace(&mut self, item: &TodoItem) -> StorageResult<()>;

    /// Delete the row if present.
    async fn remove(&mut self, id: i64) -> StorageResult<()>;

    async fn commit(self: Box<Self>) -> StorageResult<()>;
}

/// Open a connection pool for the backend named by the url scheme.
pub async fn connect(config: &DatabaseConfig) -> StorageResult<Arc<dyn TodoRepository>> {
    let url = config.url.as_str();
    let repository: Arc<dyn TodoRepository> =
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            info!("Connecting to PostgreSQL");
            Arc::new(PgTodoRepository::connect(config).await?)
        } else if url.starts_with("sqlite:") {
            info!("Opening SQLite database at {}", url);
            Arc::new(SqliteTodoRepository::connect(config).await?)
        } else {
            return Err(StorageError::UnsupportedUrl(url.to_string()));
        };
    Ok(repository)
}
