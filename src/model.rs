//! The todo item entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single task.
///
/// Every field is nullable on the wire. `id` is assigned by storage on insert
/// and ignored when a client sends one with a create request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

impl TodoItem {
    /// An item with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Row shape shared by both SQL backends.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TodoRow {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            // a NULL flag reads back as not done
            done: Some(row.done.unwrap_or(false)),
            due_date: row.due_date,
        }
    }
}
