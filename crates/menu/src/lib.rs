//! Menu domain module.
//!
//! Drinks and their recipes, plus the two derived views computed against the
//! current inventory: pricing and availability. Nothing here holds state of
//! its own.

pub mod availability;
pub mod drink;
pub mod pricing;

pub use availability::is_available;
pub use drink::{Drink, RecipeLine};
pub use pricing::{DrinkWithPrice, price_of, priced};
