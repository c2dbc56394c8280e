//! Scanned quantities per product code.

use std::collections::HashMap;

/// Mutable per-session record of scanned quantities.
///
/// Entries keep the order in which each code was first scanned. Quantities
/// only ever grow; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    quantities: HashMap<String, u32>,
    order: Vec<String>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `code`, inserting it with quantity 1 if absent.
    ///
    /// Does not check the code against any catalog. Returns the new quantity.
    pub fn add(&mut self, code: &str) -> u32 {
        match self.quantities.get_mut(code) {
            Some(quantity) => {
                *quantity = quantity.saturating_add(1);
                *quantity
            }
            None => {
                self.quantities.insert(code.to_string(), 1);
                self.order.push(code.to_string());
                1
            }
        }
    }

    /// Quantity scanned for `code`, or 0.
    pub fn quantity(&self, code: &str) -> u32 {
        self.quantities.get(code).copied().unwrap_or(0)
    }

    /// `(code, quantity)` pairs in first-scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order
            .iter()
            .map(move |code| (code.as_str(), self.quantity(code)))
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
