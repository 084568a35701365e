//! Drink prices derived from ingredient costs.

use serde::{Deserialize, Serialize};

use baristamatic_core::{DrinkId, Money};
use baristamatic_inventory::Inventory;

use crate::drink::Drink;

/// A drink together with its computed price. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkWithPrice {
    #[serde(flatten)]
    drink: Drink,
    price: Money,
}

impl DrinkWithPrice {
    pub fn drink(&self) -> &Drink {
        &self.drink
    }

    pub fn id_typed(&self) -> &DrinkId {
        self.drink.id_typed()
    }

    pub fn name(&self) -> &str {
        self.drink.name()
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

/// Sum of `unit_cost * amount` over the recipe.
///
/// Lines naming an ingredient the inventory does not know contribute nothing.
pub fn price_of(drink: &Drink, inventory: &Inventory) -> Money {
    drink
        .recipe()
        .iter()
        .map(|line| {
            inventory
                .unit_cost(line.ingredient_id())
                .map_or(Money::ZERO, |cost| cost.times(line.amount()))
        })
        .sum()
}

/// Every drink, in the given order, with its price.
pub fn priced(drinks: &[Drink], inventory: &Inventory) -> Vec<DrinkWithPrice> {
    drinks
        .iter()
        .map(|drink| DrinkWithPrice {
            drink: drink.clone(),
            price: price_of(drink, inventory),
        })
        .collect()
}
