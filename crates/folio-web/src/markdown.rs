//! Markdown → HTML for card summaries and detail documents.
//!
//! Raw HTML in the source is escaped rather than passed through, and link
//! targets with a scripting scheme are dropped.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// False for script-capable schemes (`javascript:` and friends).
pub fn safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    !BLOCKED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Render markdown to an HTML fragment.
pub fn render(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) if !safe_url(&dest_url) => {
            Event::Start(Tag::Link { link_type, dest_url: CowStr::Borrowed("#"), title, id })
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) if !safe_url(&dest_url) => {
            Event::Start(Tag::Image { link_type, dest_url: CowStr::Borrowed(""), title, id })
        }
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Render an optional field; blank input yields `None` so the caller can omit it.
pub fn render_opt(source: Option<&str>) -> Option<String> {
    source
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(render)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render("Built with **Rust** and `axum`.");
        assert!(html.contains("<strong>Rust</strong>"));
        assert!(html.contains("<code>axum</code>"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_neutralised() {
        let html = render("[click](javascript:alert(1)) and [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_render_opt_skips_blank() {
        assert_eq!(render_opt(None), None);
        assert_eq!(render_opt(Some("   ")), None);
        assert!(render_opt(Some("text")).is_some());
    }
}
