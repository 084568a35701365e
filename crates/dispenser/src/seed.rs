//! Seed data loaded into every new machine.

use baristamatic_core::{DrinkId, IngredientId, Money};
use baristamatic_inventory::{Ingredient, Inventory};
use baristamatic_menu::{Drink, RecipeLine};

pub const COFFEE: &str = "e44c559f";
pub const DECAF_COFFEE: &str = "08209490";
pub const SUGAR: &str = "dd325a56";
pub const CREAM: &str = "32c52bf9";
pub const STEAMED_MILK: &str = "403b3098";
pub const FOAMED_MILK: &str = "cc5be15f";
pub const ESPRESSO: &str = "426c8315";
pub const COCOA: &str = "5c826d0d";
pub const WHIPPED_CREAM: &str = "1428bc90";

/// (id, name, unit cost in cents)
const INGREDIENTS: [(&str, &str, u64); 9] = [
    (COFFEE, "Coffee", 75),
    (DECAF_COFFEE, "Decaf Coffee", 75),
    (SUGAR, "Sugar", 25),
    (CREAM, "Cream", 25),
    (STEAMED_MILK, "Steamed Milk", 35),
    (FOAMED_MILK, "Foamed Milk", 35),
    (ESPRESSO, "Espresso", 110),
    (COCOA, "Cocoa", 90),
    (WHIPPED_CREAM, "Whipped Cream", 100),
];

/// (id, name, recipe)
const DRINKS: [(&str, &str, &[(&str, u32)]); 6] = [
    ("03ceb55d", "Coffee", &[(COFFEE, 3), (SUGAR, 1), (CREAM, 1)]),
    ("c62081e7", "Decaf Coffee", &[(DECAF_COFFEE, 3), (SUGAR, 1), (CREAM, 1)]),
    ("d6366ad9", "Caffe Latte", &[(ESPRESSO, 2), (STEAMED_MILK, 1)]),
    ("a8546312", "Caffe Americano", &[(ESPRESSO, 3)]),
    (
        "3d772282",
        "Caffe Mocha",
        &[(ESPRESSO, 1), (COCOA, 1), (STEAMED_MILK, 1), (WHIPPED_CREAM, 1)],
    ),
    (
        "45b0aaab",
        "Capuccino",
        &[(ESPRESSO, 2), (STEAMED_MILK, 1), (FOAMED_MILK, 1)],
    ),
];

pub(crate) fn inventory() -> Inventory {
    let ingredients = INGREDIENTS
        .iter()
        .map(|(id, name, cents)| {
            Ingredient::new(IngredientId::new(*id), *name, Money::from_cents(*cents))
        })
        .collect();
    Inventory::new(ingredients).unwrap_or_else(|err| unreachable!("seed ingredients: {err}"))
}

pub(crate) fn drinks() -> Vec<Drink> {
    DRINKS
        .iter()
        .map(|(id, name, recipe)| {
            let lines = recipe
                .iter()
                .map(|(ingredient, amount)| {
                    RecipeLine::new(IngredientId::new(*ingredient), *amount)
                        .unwrap_or_else(|err| unreachable!("seed recipe for {name}: {err}"))
                })
                .collect();
            Drink::new(DrinkId::new(*id), *name, lines)
        })
        .collect()
}
