//! JSON endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use folio_common::FolioError;

use crate::error::WebError;
use crate::state::SharedState;
use crate::widgets::{WidgetBoard, WidgetStatus};

/// GET /api/data: every resource, `null` where loading failed.
pub async fn api_data(State(state): State<SharedState>) -> Json<Value> {
    Json(state.store.read().await.to_json())
}

/// GET /api/widgets: display state of every stat widget.
pub async fn api_widgets(State(state): State<SharedState>) -> Json<WidgetBoard> {
    Json(state.widgets.read().await.clone())
}

/// GET /api/repos: recently updated repositories.
pub async fn api_repos(State(state): State<SharedState>) -> Json<WidgetStatus<Vec<String>>> {
    Json(state.widgets.read().await.recent_repos.clone())
}

/// `Authorization: Bearer <token>` value, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// POST /reload: fetch every resource again. Needs the configured token.
pub async fn reload(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, WebError> {
    if !state.config.reload_allowed(bearer_token(&headers)) {
        warn!("Rejected reload request");
        return Err(FolioError::Security("reload not authorized".to_string()).into());
    }
    let loaded = state.reload().await;
    info!(loaded, "Content reloaded on request");
    Ok(Json(json!({ "loaded": loaded, "total": crate::loader::Resource::ALL.len() })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(bearer_token(&headers), Some("s3cret"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic czNjcmV0"));
        assert_eq!(bearer_token(&headers), None);
    }
}
