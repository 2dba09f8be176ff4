//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use crate::state::SharedState;
use crate::handlers::{
    page::{index, section},
    details::details,
    api::{api_data, api_widgets, api_repos, reload},
    theme::toggle_theme,
    contact::contact_submit,
};

/// Build and return the full Axum router.
pub fn build_router(state: SharedState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        // Pages
        .route("/",                          get(index))
        .route("/sections/{section}",        get(section))
        .route("/details/{section}/{id}",    get(details))

        // Actions
        .route("/theme",   post(toggle_theme))
        .route("/contact", post(contact_submit))
        .route("/reload",  post(reload))

        // API endpoints
        .route("/api/data",    get(api_data))
        .route("/api/widgets", get(api_widgets))
        .route("/api/repos",   get(api_repos))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
