//! Shopping list document rendering seam.
//!
//! The aggregated list is the only input a renderer receives. Formatting,
//! pagination inside the document and the file format are the renderer's
//! business; the HTTP layer only ships the bytes.

use crate::domain::shopping_list::AggregatedLine;

/// A rendered, downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content_type: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Renderer failure.
#[derive(Debug, thiserror::Error)]
#[error("Failed to render document: {0}")]
pub struct RenderError(pub String);

/// Turns an aggregated shopping list into a document.
///
/// # Implementations
///
/// - [`crate::infrastructure::rendering::TextShoppingListRenderer`] - plain-text template
pub trait ShoppingListRenderer: Send + Sync {
    fn render(&self, lines: &[AggregatedLine]) -> Result<Document, RenderError>;
}
