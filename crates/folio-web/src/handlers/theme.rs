//! Theme switch.

use axum::{
    http::{header, HeaderMap},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use url::Url;

use crate::theme::{CookieStore, ThemeController};

/// Same-site path to return to after toggling; anything else goes home.
fn return_path(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| Url::parse(referer).ok())
        .map(|url| match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        })
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

/// POST /theme: flip and persist the preference, then go back.
pub async fn toggle_theme(headers: HeaderMap, jar: CookieJar) -> (CookieJar, Redirect) {
    let mut controller = ThemeController::new(CookieStore::new(jar));
    controller.toggle();
    let jar = controller.into_store().into_jar();
    (jar, Redirect::to(&return_path(&headers)))
}
