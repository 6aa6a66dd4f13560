//! Static food/shop item tables and the player inventory.
//!
//! Items are immutable descriptors: a name, stat deltas, and a shop
//! price. The controller applies the deltas in
//! [`crate::controller::PetController::consume_item`]; the session layer
//! gates purchases on the wallet and inventory space.

/// An immutable consumable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodItem {
    /// Display name.
    pub name: &'static str,
    /// Hunger restored when eaten.
    pub hunger: i64,
    /// Happiness granted when eaten.
    pub happiness: i64,
    /// Energy granted when eaten.
    pub energy: i64,
    /// Shop price in coins.
    pub price: i64,
}

/// The full shop catalog, in shelf order.
pub const CATALOG: &[FoodItem] = &[
    FoodItem {
        name: "Apple",
        hunger: 20,
        happiness: 5,
        energy: 2,
        price: 10,
    },
    FoodItem {
        name: "Banana",
        hunger: 25,
        happiness: 7,
        energy: 3,
        price: 15,
    },
    FoodItem {
        name: "Pizza",
        hunger: 50,
        happiness: 15,
        energy: 5,
        price: 30,
    },
    FoodItem {
        name: "Burger",
        hunger: 40,
        happiness: 12,
        energy: 4,
        price: 25,
    },
    FoodItem {
        name: "Ice Cream",
        hunger: 15,
        happiness: 20,
        energy: 1,
        price: 20,
    },
    FoodItem {
        name: "Energy Bar",
        hunger: 10,
        happiness: 5,
        energy: 25,
        price: 35,
    },
];

/// Look up a catalog item by name (case-sensitive).
#[must_use]
pub fn find_item(name: &str) -> Option<&'static FoodItem> {
    CATALOG.iter().find(|item| item.name == name)
}

/// Maximum number of items the inventory holds.
pub const INVENTORY_CAPACITY: usize = 6;

/// The player's food inventory: bought items waiting to be fed to the pet.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<&'static FoodItem>,
}

impl Inventory {
    /// Empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Fails (returns `false`) when the inventory is full.
    pub fn add(&mut self, item: &'static FoodItem) -> bool {
        if self.items.len() >= INVENTORY_CAPACITY {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove and return the item at `index`, or `None` if out of range.
    pub fn take(&mut self, index: usize) -> Option<&'static FoodItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Items currently held, in purchase order.
    #[must_use]
    pub fn items(&self) -> &[&'static FoodItem] {
        &self.items
    }

    /// Number of items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the inventory has no free slots.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= INVENTORY_CAPACITY
    }
}
