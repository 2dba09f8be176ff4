//! "Show Details" documents.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use tracing::warn;

use crate::error::WebError;
use crate::markdown;
use crate::state::SharedState;

/// GET /details/{section}/{id}: the item's detail document as HTML.
///
/// An item without a document, or a document that cannot be fetched, yields
/// the "Details Unavailable" fragment with a 404.
pub async fn details(
    State(state): State<SharedState>,
    Path((section, id)): Path<(String, String)>,
) -> Result<(StatusCode, Html<String>), WebError> {
    let path = state.store.read().await.detail_path(&section, &id);

    let Some(path) = path else {
        return Ok((StatusCode::NOT_FOUND, Html(state.renderer.detail(Some(&id), None)?)));
    };

    match state.loader.fetch_document(&path).await {
        Ok(source) => {
            let html = markdown::render(&source);
            Ok((StatusCode::OK, Html(state.renderer.detail(Some(&id), Some(&html))?)))
        }
        Err(e) => {
            warn!(%section, %id, %path, error = %e, "Detail document unavailable");
            Ok((StatusCode::NOT_FOUND, Html(state.renderer.detail(Some(&id), None)?)))
        }
    }
}
