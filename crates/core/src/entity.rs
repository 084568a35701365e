//! Entity trait: identity + continuity across state changes.

use std::collections::HashSet;

use crate::error::{DomainError, DomainResult};

/// Entity marker + minimal interface.
///
/// Ingredients and drinks are entities: two ingredients with the same name are
/// still different ingredients if their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Reject a collection in which two entities share an id.
///
/// `kind` names the entity in the error ("ingredient", "drink").
pub fn ensure_unique_ids<'a, E>(entities: impl IntoIterator<Item = &'a E>, kind: &str) -> DomainResult<()>
where
    E: Entity + 'a,
    E::Id: core::fmt::Display,
{
    let mut seen = HashSet::new();
    for entity in entities {
        if !seen.insert(entity.id()) {
            return Err(DomainError::conflict(format!("duplicate {kind} id {}", entity.id())));
        }
    }
    Ok(())
}
