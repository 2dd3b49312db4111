use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use mimalloc::MiMalloc;
use tracing::info;

use todos::config::AppConfig;
use todos::http::HttpServer;
use todos::{TodoCache, TodoService, logging, storage};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Usage: `todos [config.toml]`. Without an argument `config/default.toml`
/// is read when present; environment variables override either way.
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| {
            let default = PathBuf::from("config/default.toml");
            default.exists().then_some(default)
        });

    let config = AppConfig::load(config_path.as_deref())?;
    let _log_guard = logging::init(&config.log)?;

    let repository = storage::connect(&config.database).await?;
    repository.ensure_schema().await?;

    let service = if config.cache.enabled {
        TodoService::new(repository, TodoCache::new(&config.cache))
    } else {
        info!("Lookup cache disabled");
        TodoService::without_cache(repository)
    };

    HttpServer::new(config.server, Arc::new(service))
        .start()
        .await?;

    Ok(())
}
