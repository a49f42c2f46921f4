//! Per-user recipe collections: favorites and the shopping cart.

use crate::domain::shopping_list::CartLine;

/// A user-to-recipe relation. Both collections share the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorites,
    ShoppingCart,
}

impl Collection {
    /// Table backing this collection.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::ShoppingCart => "shopping_cart",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::ShoppingCart => "shopping cart",
        }
    }
}

/// One recipe in a user's cart with its ingredient lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRecipe {
    pub recipe_id: i64,
    pub lines: Vec<CartLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables() {
        assert_eq!(Collection::Favorites.table(), "favorites");
        assert_eq!(Collection::ShoppingCart.table(), "shopping_cart");
    }
}
