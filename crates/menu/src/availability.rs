//! Whether a drink can be made from current stock.

use baristamatic_inventory::Inventory;

use crate::drink::Drink;

/// True iff every recipe line names a known ingredient with enough stock.
///
/// Unlike pricing, a dangling ingredient reference fails its line. Each line
/// is checked on its own; duplicate lines are not summed.
pub fn is_available(drink: &Drink, inventory: &Inventory) -> bool {
    drink
        .recipe()
        .iter()
        .all(|line| inventory.has_at_least(line.ingredient_id(), line.amount()))
}
