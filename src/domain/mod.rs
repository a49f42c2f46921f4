//! Domain layer containing business entities and pure logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`short_link`] - Recipe id <-> short code codec
//! - [`shopping_list`] - Cart ingredient aggregation
//! - [`rendering`] - Shopping list document rendering seam
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules that need data access live in
//! [`crate::application::services`].

pub mod entities;
pub mod rendering;
pub mod repositories;
pub mod shopping_list;
pub mod short_link;
