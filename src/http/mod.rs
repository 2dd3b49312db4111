//! HTTP surface: the `/todos` routes, their error mapping and the server.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::todo_routes;
pub use server::HttpServer;
