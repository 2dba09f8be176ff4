//! Full page and section fragments.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::WebError;
use crate::paginate::PageState;
use crate::share::PageLocation;
use crate::state::SharedState;
use crate::theme::{CookieStore, Theme, ThemeController};
use crate::view::{PageRequest, ViewContext};

/// Theme from the cookie jar; the returned jar carries the persisted default.
pub fn current_theme(jar: CookieJar) -> (Theme, CookieJar) {
    let mut controller = ThemeController::new(CookieStore::new(jar));
    let theme = controller.current();
    (theme, controller.into_store().into_jar())
}

/// GET /: the whole portfolio.
pub async fn index(
    State(state): State<SharedState>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(query): Query<HashMap<String, String>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (theme, jar) = current_theme(jar);
    let request = PageRequest {
        state: PageState::from_query(&query),
        location: PageLocation::from_headers(&headers, "/", &state.config.server.public_origin),
        theme,
    };

    let store = state.store.read().await;
    let widgets = state.widgets.read().await;
    let view = ViewContext {
        store: &store,
        widgets: &widgets,
        config: &state.config,
        request: &request,
    }
    .build_page();

    let html = state.renderer.page(&view)?;
    Ok((jar, Html(html)))
}

#[derive(Debug, Deserialize)]
pub struct SectionQuery {
    pub page: Option<String>,
}

/// GET /sections/{section}?page=n: one section's container, for in-place
/// pagination.
pub async fn section(
    State(state): State<SharedState>,
    Path(section): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
    Query(query): Query<SectionQuery>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (theme, jar) = current_theme(jar);
    let cursors: HashMap<String, String> = query
        .page
        .map(|page| (section.clone(), page))
        .into_iter()
        .collect();
    let request = PageRequest {
        state: PageState::from_query(&cursors),
        location: PageLocation::from_headers(&headers, "/", &state.config.server.public_origin),
        theme,
    };

    let store = state.store.read().await;
    let widgets = state.widgets.read().await;
    let ctx = ViewContext {
        store: &store,
        widgets: &widgets,
        config: &state.config,
        request: &request,
    };
    let view = ctx
        .build_section(&section)
        .ok_or_else(|| WebError::UnknownSection(section.clone()))?;
    let heading = ctx.heading_links();

    let html = state
        .renderer
        .section(&section, &view, heading.get(section.as_str()))?;
    Ok((jar, Html(html)))
}
