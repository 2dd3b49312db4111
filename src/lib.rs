//! todos
//!
//! A small task-tracking backend: CRUD over a single `todos` table behind an
//! axum HTTP surface, with a lookup cache in the service layer.

#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use cache::{CacheKey, TodoCache};
pub use error::{ServiceError, StorageError};
pub use model::TodoItem;
pub use service::TodoService;
