//! Shared state, routes and handlers.

use crate::cache::LiveCache;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pagecraft_core::{
    Page, PageSummary, SeoError, SeoGenerator, SeoMetadata, SeoRequest, Storage, StorageError,
};
use pagecraft_render::{HtmlOptions, HtmlRenderer};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Slug served when a public URL names only the site.
pub const HOME_SLUG: &str = "home";

/// Shared application state
pub struct AppState {
    storage: Arc<dyn Storage>,
    seo: Arc<dyn SeoGenerator>,
    renderer: HtmlRenderer,
    live: LiveCache,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, seo: Arc<dyn SeoGenerator>) -> Self {
        Self {
            storage,
            seo,
            renderer: HtmlRenderer::new(HtmlOptions::default()),
            live: LiveCache::new(),
        }
    }
}

/// Errors returned by the HTTP API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("page {0} not found")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(StorageError),
    #[error("metadata generation failed: {0}")]
    Seo(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            e @ StorageError::SlugTaken { .. } => ApiError::Conflict(e.to_string()),
            other => ApiError::Storage(other),
        }
    }
}

impl From<SeoError> for ApiError {
    fn from(e: SeoError) -> Self {
        match e {
            SeoError::MissingField(_) => ApiError::BadRequest(e.to_string()),
            SeoError::Backend(msg) => ApiError::Seo(msg),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Seo(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("{}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pages", get(list_pages))
        .route(
            "/api/pages/{id}",
            get(get_page).put(save_page).patch(save_page).delete(delete_page),
        )
        .route("/api/ai/generate-seo", post(generate_seo))
        .route("/live/{site_id}", get(live_home))
        .route("/live/{site_id}/{slug}", get(live_page))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check
pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_pages(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PageSummary>>> {
    Ok(Json(state.storage.list().await?))
}

pub async fn get_page(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Json<Page>> {
    Ok(Json(state.storage.load(&id).await?))
}

/// Save a full page (tree and metadata).
pub async fn save_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(page): Json<Page>,
) -> ApiResult<Json<Page>> {
    if page.id != id {
        return Err(ApiError::BadRequest(format!(
            "page id {} does not match the URL ({})",
            page.id, id
        )));
    }
    for violation in page.content.violations() {
        warn!("page {}: {}", id, violation);
    }
    state.storage.save(&page).await?;
    state.live.invalidate();
    info!("saved page {} ({} elements)", id, page.content.len());
    Ok(Json(page))
}

pub async fn delete_page(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.storage.delete(&id).await?;
    state.live.invalidate();
    info!("deleted page {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn generate_seo(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SeoRequest>,
) -> ApiResult<Json<SeoMetadata>> {
    let metadata = state.seo.generate(&request).await?;
    info!("generated SEO for {:?} (score {})", request.page_title, metadata.ai_seo_score);
    Ok(Json(metadata))
}

/// Public HTML for a site's home page.
pub async fn live_home(State(state): State<Arc<AppState>>, Path(site_id): Path<String>) -> ApiResult<Html<String>> {
    render_live(&state, &site_id, HOME_SLUG).await
}

/// Public HTML for a published page.
pub async fn live_page(
    State(state): State<Arc<AppState>>,
    Path((site_id, slug)): Path<(String, String)>,
) -> ApiResult<Html<String>> {
    render_live(&state, &site_id, &slug).await
}

async fn render_live(state: &AppState, site_id: &str, slug: &str) -> ApiResult<Html<String>> {
    if let Some(html) = state.live.get(site_id, slug) {
        return Ok(Html(html));
    }
    let generation = state.live.generation();
    let page = state.storage.find_by_slug(site_id, slug).await?;
    if !page.is_published() {
        return Err(ApiError::NotFound(format!("{site_id}/{slug}")));
    }
    let html = state.renderer.render_live_page(&page);
    state.live.insert(site_id, slug, generation, html.clone());
    Ok(Html(html))
}
