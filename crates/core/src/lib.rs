//! `baristamatic-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no timers, no IO).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::{Entity, ensure_unique_ids};
pub use error::{DomainError, DomainResult};
pub use id::{DrinkId, IngredientId, MachineId};
pub use money::Money;
pub use value_object::ValueObject;
