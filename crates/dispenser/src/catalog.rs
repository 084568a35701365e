//! The reference data a machine is built from: ingredients and drinks.

use baristamatic_core::{DomainResult, DrinkId, ensure_unique_ids};
use baristamatic_inventory::{Ingredient, Inventory};
use baristamatic_menu::Drink;

use crate::seed;

/// Ingredients (with their stock) and drinks, both in catalog order.
///
/// Drinks never change after construction. The inventory is only replaced
/// by the dispenser when it applies a dispense or restock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    inventory: Inventory,
    drinks: Vec<Drink>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ingredient or drink ids.
    ///
    /// Recipes may reference ingredients that are not in the list.
    pub fn new(ingredients: Vec<Ingredient>, drinks: Vec<Drink>) -> DomainResult<Self> {
        let inventory = Inventory::new(ingredients)?;
        ensure_unique_ids(&drinks, "drink")?;
        Ok(Self { inventory, drinks })
    }

    /// The fixed seed every machine starts from: 9 ingredients, 6 drinks,
    /// everything stocked to capacity.
    pub fn seed() -> Self {
        Self {
            inventory: seed::inventory(),
            drinks: seed::drinks(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn drink(&self, id: &DrinkId) -> Option<&Drink> {
        self.drinks.iter().find(|d| d.id_typed() == id)
    }

    pub(crate) fn replace_inventory(&mut self, inventory: Inventory) {
        self.inventory = inventory;
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}
