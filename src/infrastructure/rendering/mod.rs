//! Document renderers for shopping list export.

mod text_renderer;

pub use text_renderer::TextShoppingListRenderer;
