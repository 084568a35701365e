//! Inventory domain module.
//!
//! Ingredients, their stock counts and the two rules that change those counts
//! (deduct for a dispensed drink, reset on restock). Pure domain logic only.

pub mod ingredient;
pub mod stock;

pub use ingredient::Ingredient;
pub use stock::{Inventory, RESTOCK_CAPACITY, StockDeduction};
