//! folio-common: Shared content types, errors, configuration and the capped
//! HTTP client used across the Folio crates.

pub mod error;
pub mod content;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::SiteConfig;
pub use content::{
    AboutProfile, Achievement, Certification, ContentItem, Education, Experience, Project,
    Research, TechCategory,
};
pub use error::{FolioError, Result};
