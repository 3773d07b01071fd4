//! Shopping cart.

use serde::{Deserialize, Serialize};

use sportsgear_core::ProductId;

/// Products the visitor has added, in the order they were added.
///
/// The same product may appear more than once; each entry becomes one line
/// item at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    product_ids: Vec<ProductId>,
}

impl Cart {
    #[must_use]
    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }

    pub fn add(&mut self, id: ProductId) {
        self.product_ids.push(id);
    }

    /// Remove one occurrence of `id`. Returns whether anything was removed.
    pub fn remove_one(&mut self, id: ProductId) -> bool {
        match self.product_ids.iter().rposition(|existing| *existing == id) {
            Some(index) => {
                self.product_ids.remove(index);
                true
            }
            None => false,
        }
    }
}
