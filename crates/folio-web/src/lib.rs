//! folio-web: server-rendered portfolio site.
//! Provides:
//!   - Concurrent loading of the JSON content resources
//!   - Section view models with per-section pagination
//!   - Light/dark theme persisted in a cookie
//!   - Stat widgets, share links, detail documents and the contact form

pub mod router;
pub mod handlers;
pub mod state;
pub mod error;

pub mod loader;
pub mod view;
pub mod render;
pub mod paginate;
pub mod theme;
pub mod markdown;
pub mod share;
pub mod widgets;
pub mod contact;
