//! HTML template rendering handlers.

mod recipe;

pub use recipe::recipe_page_handler;
