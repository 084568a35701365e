//! Inventory & dispense store for a single beverage machine.
//!
//! - [`Catalog`]: the seeded ingredients and drinks
//! - [`Dispenser`]: the aggregate deciding and applying dispense/restock/clear
//! - [`DispenserStore`]: the shell that owns the aggregate, publishes its
//!   events and schedules the deferred status clear
//!
//! ```ignore
//! let store = DispenserStore::new(Catalog::seed(), &DispenserConfig::from_env()?)?;
//! let coffee = store.drinks()[0].id_typed().clone();
//! if store.is_drink_available(&coffee) {
//!     store.dispense_drink(&coffee);
//! }
//! assert_eq!(store.dispensing_status(), "Coffee");
//! ```

pub mod catalog;
pub mod config;
pub mod machine;
pub mod seed;
pub mod store;
pub mod timer;

pub use catalog::Catalog;
pub use config::{ConfigError, DispenserConfig};
pub use machine::{
    ClearDispensing, Dispense, DispensePolicy, Dispenser, DispenserCommand, DispenserEvent,
    DispensingCleared, DrinkDispensed, InventoryRestocked, Restock,
};
pub use store::{DispenserEnvelope, DispenserStore};
pub use timer::{ClearTask, ClearTimer, ManualTimer, TimerError, TokioTimer};
