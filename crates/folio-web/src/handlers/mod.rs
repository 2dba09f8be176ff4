//! HTTP handlers for all web routes.

pub mod page;
pub mod details;
pub mod api;
pub mod theme;
pub mod contact;
