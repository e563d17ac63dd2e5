//! PageCraft Server
//!
//! Hosts page persistence, live page rendering and SEO metadata generation
//! over HTTP.
//!
//! ## Routes
//!
//! ```text
//! GET    /health
//! GET    /api/pages
//! GET    /api/pages/{id}
//! PUT    /api/pages/{id}        (PATCH accepted too)
//! DELETE /api/pages/{id}
//! POST   /api/ai/generate-seo   { "pageTitle": "...", "siteName": "..." }
//! GET    /live/{site_id}          (the site's "home" page)
//! GET    /live/{site_id}/{slug}
//! ```
//!
//! Live routes only serve published pages.
//!
//! ## Environment
//!
//! - `PAGECRAFT_ADDR`: listen address (default `0.0.0.0:3030`)
//! - `PAGECRAFT_DATA_DIR`: page directory (default: the user's data dir)
//! - `RUST_LOG`: log filter

mod app;
mod cache;
mod storage;

use app::{router, AppState};
use pagecraft_core::{FileStorage, TemplateSeoGenerator};
use storage::PooledFileStorage;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::info;

const DEFAULT_ADDR: &str = "0.0.0.0:3030";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagecraft_server=info,tower_http=info".into()),
        )
        .init();

    let addr: SocketAddr = std::env::var("PAGECRAFT_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let files = match std::env::var_os("PAGECRAFT_DATA_DIR") {
        Some(dir) => FileStorage::new(PathBuf::from(dir))?,
        None => FileStorage::default_location()?,
    };
    let storage = PooledFileStorage::new(files);
    info!("Storing pages in {}", storage.base_path().display());

    let state = Arc::new(AppState::new(Arc::new(storage), Arc::new(TemplateSeoGenerator::new())));
    let app = router(state);

    info!("PageCraft server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
