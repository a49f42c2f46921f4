//! Plain-text shopping list renderer backed by an Askama template.

use askama::Template;

use crate::domain::rendering::{Document, RenderError, ShoppingListRenderer};
use crate::domain::shopping_list::AggregatedLine;

/// Template for `templates/shopping_list.txt`.
#[derive(Template)]
#[template(path = "shopping_list.txt")]
struct ShoppingListTemplate<'a> {
    title: &'a str,
    lines: &'a [AggregatedLine],
}

/// Renders the shopping list as a UTF-8 text attachment.
///
/// One line per ingredient: `Flour (g) - 600`.
pub struct TextShoppingListRenderer {
    title: String,
    file_name: String,
}

impl TextShoppingListRenderer {
    pub fn new() -> Self {
        Self {
            title: "Shopping list".to_string(),
            file_name: "shopping-list.txt".to_string(),
        }
    }
}

impl Default for TextShoppingListRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingListRenderer for TextShoppingListRenderer {
    fn render(&self, lines: &[AggregatedLine]) -> Result<Document, RenderError> {
        let body = ShoppingListTemplate {
            title: &self.title,
            lines,
        }
        .render()
        .map_err(|e| RenderError(e.to_string()))?;

        Ok(Document {
            content_type: "text/plain; charset=utf-8",
            file_name: self.file_name.clone(),
            bytes: body.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, amount: u64) -> AggregatedLine {
        AggregatedLine {
            ingredient_name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    fn render_text(lines: &[AggregatedLine]) -> String {
        let doc = TextShoppingListRenderer::new().render(lines).unwrap();
        String::from_utf8(doc.bytes).unwrap()
    }

    #[test]
    fn test_renders_one_line_per_ingredient_in_order() {
        let text = render_text(&[line("Salt", "g", 15), line("Sugar", "g", 3)]);

        assert!(text.starts_with("Shopping list"));
        let salt = text.find("Salt (g) - 15").unwrap();
        let sugar = text.find("Sugar (g) - 3").unwrap();
        assert!(salt < sugar);
    }

    #[test]
    fn test_empty_list() {
        let text = render_text(&[]);
        assert!(text.contains("Your shopping cart is empty."));
    }

    #[test]
    fn test_text_is_not_html_escaped() {
        let text = render_text(&[line("Salt & Pepper", "g", 1)]);
        assert!(text.contains("Salt & Pepper (g) - 1"));
    }

    #[test]
    fn test_document_metadata() {
        let doc = TextShoppingListRenderer::new().render(&[]).unwrap();
        assert_eq!(doc.file_name, "shopping-list.txt");
        assert!(doc.content_type.starts_with("text/plain"));
    }
}
