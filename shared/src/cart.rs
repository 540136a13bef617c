//! Customer cart state
//!
//! Local, pre-submission cart for the QR ordering page. Lines are keyed
//! by product id; quantities never go below zero, and a decrement that
//! reaches 0 removes the line. The cart knows nothing about stock:
//! product availability is re-checked server-side at submission time.

use serde::{Deserialize, Serialize};

use crate::models::{OrderItemDraft, OrderSubmit, Product};

/// One cart line (product, quantity, optional note)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
    pub note: Option<String>,
}

/// Shopping cart, ordered by first-add time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one unit of a product (new line at quantity 1, or +1)
    pub fn add(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
                note: None,
            });
        }
    }

    /// Adjust a line's quantity by `delta`; dropping to 0 (or below)
    /// removes the line. Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: i64, delta: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = (line.quantity + delta).max(0);
        }
        self.lines.retain(|l| l.quantity > 0);
    }

    /// Attach a note to a line (ignored when the line does not exist)
    pub fn set_note(&mut self, product_id: i64, note: impl Into<String>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.note = Some(note.into());
        }
    }

    /// Remove a line outright
    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Display total from the prices the customer saw; the server
    /// recomputes from the live menu at submission time
    pub fn total_amount(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.product.price * l.quantity)
            .sum()
    }

    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Convert to the submission payload (no prices attached)
    pub fn to_submission(&self) -> OrderSubmit {
        OrderSubmit {
            items: self
                .lines
                .iter()
                .map(|l| OrderItemDraft {
                    product_id: l.product.id,
                    quantity: l.quantity,
                    note: l.note.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id,
            category_id: 1,
            name: format!("product-{id}"),
            price,
            base_cost: 0,
            image_url: None,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn add_is_keyed_by_product_id() {
        let mut cart = Cart::new();
        cart.add(product(1, 25_000));
        cart.add(product(1, 25_000));
        cart.add(product(2, 40_000));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn totals_follow_quantities() {
        let mut cart = Cart::new();
        cart.add(product(1, 25_000));
        cart.add(product(1, 25_000));
        cart.add(product(2, 40_000));

        // 2×Espresso (25,000) + 1×Latte (40,000)
        assert_eq!(cart.total_amount(), 90_000);
    }

    #[test]
    fn quantity_never_goes_negative() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000));
        cart.update_quantity(1, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000));
        cart.add(product(2, 2000));

        cart.update_quantity(1, -1);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product.id, 2);
    }

    #[test]
    fn update_unknown_product_is_ignored() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000));
        cart.update_quantity(99, 3);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn notes_survive_quantity_changes() {
        let mut cart = Cart::new();
        cart.add(product(1, 1000));
        cart.set_note(1, "no sugar");
        cart.update_quantity(1, 2);

        let submit = cart.to_submission();
        assert_eq!(submit.items.len(), 1);
        assert_eq!(submit.items[0].quantity, 3);
        assert_eq!(submit.items[0].note.as_deref(), Some("no sugar"));
    }

    #[test]
    fn submission_carries_no_prices() {
        let mut cart = Cart::new();
        cart.add(product(1, 25_000));
        let json = serde_json::to_string(&cart.to_submission()).unwrap();
        assert!(!json.contains("price"));
    }
}
