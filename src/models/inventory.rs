use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    pub product_id: i64,
    pub name: String,
    pub cost_price: f64,
}

/// Product catalogue keyed by product id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: HashMap<i64, InventoryItem>,
}

impl Inventory {
    pub fn get(&self, product_id: i64) -> Option<&InventoryItem> {
        self.items.get(&product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<InventoryItem> for Inventory {
    fn from_iter<I: IntoIterator<Item = InventoryItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|i| (i.product_id, i)).collect(),
        }
    }
}
