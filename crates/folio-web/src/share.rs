//! Copy-to-clipboard affordances.
//!
//! The browser performs the copy (Clipboard API, or the selection fallback
//! when it is unavailable); the server decides exactly what text is copied
//! and which toast confirms it.

use axum::http::{header, HeaderMap};
use serde::Serialize;

/// Origin and path of the page a visitor is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub origin: String,
    pub pathname: String,
}

impl PageLocation {
    pub fn new(origin: &str, pathname: &str) -> Self {
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            pathname: pathname.to_string(),
        }
    }

    /// Location as seen by the client: `Host` plus `X-Forwarded-Proto`, or
    /// `fallback_origin` when the request has no usable host.
    pub fn from_headers(headers: &HeaderMap, pathname: &str, fallback_origin: &str) -> Self {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty());
        match host {
            Some(host) => {
                let scheme = headers
                    .get("x-forwarded-proto")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("http");
                Self::new(&format!("{}://{}", scheme, host), pathname)
            }
            None => Self::new(fallback_origin, pathname),
        }
    }

    /// `origin + pathname + "#" + id`.
    pub fn link_to(&self, id: &str) -> String {
        format!("{}{}#{}", self.origin, self.pathname, id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyKind {
    ItemLink,
    SectionLink,
    Email,
}

/// What a copy button writes and how success is announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyAction {
    pub kind: CopyKind,
    pub text: String,
    pub toast: &'static str,
}

impl CopyAction {
    pub fn item_link(location: &PageLocation, id: &str) -> Self {
        Self {
            kind: CopyKind::ItemLink,
            text: location.link_to(id),
            toast: "Link copied!",
        }
    }

    pub fn section_link(location: &PageLocation, section: &str) -> Self {
        Self {
            kind: CopyKind::SectionLink,
            text: location.link_to(section),
            toast: "Section link copied!",
        }
    }

    pub fn email(address: &str) -> Self {
        Self {
            kind: CopyKind::Email,
            text: address.to_string(),
            toast: "Email copied to clipboard!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_item_link_is_origin_path_hash_id() {
        let location = PageLocation::new("https://ada.dev", "/portfolio/");
        let action = CopyAction::item_link(&location, "folio-server");
        assert_eq!(action.text, "https://ada.dev/portfolio/#folio-server");
        assert_eq!(action.toast, "Link copied!");
    }

    #[test]
    fn test_location_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ada.dev"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        let location = PageLocation::from_headers(&headers, "/", "http://localhost:3000");
        assert_eq!(location.link_to("projects"), "https://ada.dev/#projects");
    }

    #[test]
    fn test_location_falls_back_to_configured_origin() {
        let location = PageLocation::from_headers(&HeaderMap::new(), "", "http://localhost:3000/");
        assert_eq!(location.origin, "http://localhost:3000");
        assert_eq!(location.pathname, "/");
        assert_eq!(location.link_to("p1"), "http://localhost:3000/#p1");
    }

    #[test]
    fn test_email_action() {
        let action = CopyAction::email("ada@example.com");
        assert_eq!(action.kind, CopyKind::Email);
        assert_eq!(action.text, "ada@example.com");
    }
}
