//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A recipe line asking for `3 x Coffee` is equal to any other
//! recipe line asking for `3 x Coffee`.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct RecipeLine {
///     ingredient_id: IngredientId,
///     amount: u32,
/// }
///
/// impl ValueObject for RecipeLine {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
