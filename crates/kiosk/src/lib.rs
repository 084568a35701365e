//! Terminal front end for the dispenser.
//!
//! Only reads the store's views and calls its two commands; all business
//! rules live in `baristamatic-dispenser`.

pub mod input;
pub mod screen;

pub use input::{Reply, Selection, respond};
pub use screen::{render, status_cleared};
