use serde::{Deserialize, Serialize};

use baristamatic_core::{Entity, IngredientId, Money};

use crate::stock::RESTOCK_CAPACITY;

/// A stocked raw material with a unit cost and a finite count.
///
/// `inventory` is signed: dispensing without checking availability first is
/// allowed and can drive it below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    id: IngredientId,
    name: String,
    unit_cost: Money,
    inventory: i64,
}

impl Ingredient {
    /// A fully stocked ingredient.
    pub fn new(id: IngredientId, name: impl Into<String>, unit_cost: Money) -> Self {
        Self {
            id,
            name: name.into(),
            unit_cost,
            inventory: RESTOCK_CAPACITY,
        }
    }

    /// Same ingredient with a different stock count.
    pub fn with_inventory(self, inventory: i64) -> Self {
        Self { inventory, ..self }
    }

    pub fn id_typed(&self) -> &IngredientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_cost(&self) -> Money {
        self.unit_cost
    }

    pub fn inventory(&self) -> i64 {
        self.inventory
    }

    /// Whether at least `amount` units are on hand.
    pub fn has_at_least(&self, amount: u32) -> bool {
        self.inventory >= i64::from(amount)
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
