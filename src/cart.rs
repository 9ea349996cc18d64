use serde::{Deserialize, Serialize};

use crate::catalog::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

/// In-memory shopping cart. All state lives for the session only; there is
/// no persistence.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add a product. An existing line for the same product id merges the
    /// quantities instead of creating a duplicate line.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += quantity;
        } else {
            self.items.push(CartItem { product, quantity });
        }
    }

    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Set the quantity for a line; zero removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Subtotal: sum of price x quantity over every line.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.product.price * f64::from(i.quantity))
            .sum()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_owned(),
            name: format!("Product {}", id),
            description: String::new(),
            price,
            image: String::new(),
            category: Category::Electronics,
            stock: 10,
            featured: false,
            rating: None,
            reviews: None,
        }
    }

    #[test]
    fn add_merges_existing_lines() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 1);
        cart.add_item(product("a", 10.0), 2);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn add_zero_quantity_is_ignored() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn update_quantity_sets_and_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 2);
        cart.update_quantity("a", 5);
        assert_eq!(cart.items()[0].quantity, 5);

        cart.update_quantity("a", 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn update_quantity_for_unknown_product_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 1);
        cart.update_quantity("missing", 4);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_drops_only_the_matching_line() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 1);
        cart.add_item(product("b", 20.0), 1);
        cart.remove_item("a");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, "b");
    }

    #[test]
    fn total_and_count_sum_over_lines() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 2);
        cart.add_item(product("b", 5.5), 3);

        assert!((cart.total() - 36.5).abs() < 1e-9);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_item(product("a", 10.0), 2);
        cart.clear();

        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), 0.0);
    }
}
