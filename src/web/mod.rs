//! Server-rendered HTML pages.
//!
//! Short links resolve to these pages. Uses Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
