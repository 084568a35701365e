//! The ordered ingredient collection and its stock rules.

use serde::{Deserialize, Serialize};

use baristamatic_core::{DomainResult, IngredientId, Money, ValueObject, ensure_unique_ids};

use crate::ingredient::Ingredient;

/// Every ingredient is reset to this count on restock.
pub const RESTOCK_CAPACITY: i64 = 10;

/// One ingredient's share of a dispensed drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeduction {
    pub ingredient_id: IngredientId,
    pub amount: u32,
}

impl ValueObject for StockDeduction {}

/// Ingredients in catalog order.
///
/// Updates never mutate in place: `deducted` and `restocked` return a new
/// collection, so any snapshot a reader holds stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    ingredients: Vec<Ingredient>,
}

impl Inventory {
    /// Build an inventory, rejecting duplicate ingredient ids.
    pub fn new(ingredients: Vec<Ingredient>) -> DomainResult<Self> {
        ensure_unique_ids(&ingredients, "ingredient")?;
        Ok(Self { ingredients })
    }

    pub fn as_slice(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter()
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn get(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id_typed() == id)
    }

    /// Unit cost of an ingredient, `None` if the id is unknown.
    pub fn unit_cost(&self, id: &IngredientId) -> Option<Money> {
        self.get(id).map(Ingredient::unit_cost)
    }

    /// True iff the ingredient exists and has at least `amount` on hand.
    pub fn has_at_least(&self, id: &IngredientId, amount: u32) -> bool {
        self.get(id).is_some_and(|i| i.has_at_least(amount))
    }

    /// New inventory with each deduction subtracted from its ingredient.
    ///
    /// Stock is not checked: counts may go negative. Deductions naming an
    /// unknown ingredient are ignored; only the first deduction per ingredient
    /// applies.
    pub fn deducted(&self, deductions: &[StockDeduction]) -> Self {
        let ingredients = self
            .ingredients
            .iter()
            .map(|ingredient| {
                match deductions.iter().find(|d| &d.ingredient_id == ingredient.id_typed()) {
                    Some(d) => ingredient
                        .clone()
                        .with_inventory(ingredient.inventory().saturating_sub(i64::from(d.amount))),
                    None => ingredient.clone(),
                }
            })
            .collect();
        Self { ingredients }
    }

    /// New inventory with every count set to `capacity`.
    pub fn restocked(&self, capacity: i64) -> Self {
        let ingredients = self
            .ingredients
            .iter()
            .map(|ingredient| ingredient.clone().with_inventory(capacity))
            .collect();
        Self { ingredients }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baristamatic_core::DomainError;
    use proptest::prelude::*;

    fn ingredient(id: &str, name: &str, cents: u64) -> Ingredient {
        Ingredient::new(IngredientId::new(id), name, Money::from_cents(cents))
    }

    fn sample() -> Inventory {
        Inventory::new(vec![
            ingredient("coffee", "Coffee", 75),
            ingredient("sugar", "Sugar", 25),
            ingredient("cream", "Cream", 25),
        ])
        .unwrap()
    }

    fn deduction(id: &str, amount: u32) -> StockDeduction {
        StockDeduction {
            ingredient_id: IngredientId::new(id),
            amount,
        }
    }

    #[test]
    fn new_ingredients_start_full() {
        assert!(sample().iter().all(|i| i.inventory() == RESTOCK_CAPACITY));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Inventory::new(vec![
            ingredient("coffee", "Coffee", 75),
            ingredient("coffee", "Other Coffee", 80),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn duplicate_names_are_fine() {
        let inventory = Inventory::new(vec![
            ingredient("a", "Milk", 35),
            ingredient("b", "Milk", 35),
        ])
        .unwrap();
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn deducted_touches_only_referenced_ingredients() {
        let before = sample();
        let after = before.deducted(&[deduction("coffee", 3), deduction("cream", 1)]);

        assert_eq!(after.get(&IngredientId::new("coffee")).unwrap().inventory(), 7);
        assert_eq!(after.get(&IngredientId::new("sugar")).unwrap().inventory(), 10);
        assert_eq!(after.get(&IngredientId::new("cream")).unwrap().inventory(), 9);
        // The earlier snapshot is untouched.
        assert_eq!(before, sample());
    }

    #[test]
    fn deducted_can_go_negative_and_ignores_unknown_ids() {
        let inventory = sample().with_count("coffee", 2);
        let after = inventory.deducted(&[deduction("coffee", 3), deduction("ghost", 5)]);

        assert_eq!(after.get(&IngredientId::new("coffee")).unwrap().inventory(), -1);
        assert_eq!(after.len(), 3);
    }

    #[test]
    fn deducted_saturates_at_the_lowest_count() {
        let inventory = sample().with_count("coffee", i64::MIN);
        let after = inventory.deducted(&[deduction("coffee", u32::MAX)]);

        assert_eq!(after.get(&IngredientId::new("coffee")).unwrap().inventory(), i64::MIN);
    }

    #[test]
    fn has_at_least_is_false_for_unknown_ingredient() {
        let inventory = sample();
        assert!(inventory.has_at_least(&IngredientId::new("coffee"), 10));
        assert!(!inventory.has_at_least(&IngredientId::new("coffee"), 11));
        assert!(!inventory.has_at_least(&IngredientId::new("ghost"), 0));
    }

    #[test]
    fn order_is_preserved() {
        let names: Vec<_> = sample()
            .deducted(&[deduction("sugar", 1)])
            .restocked(RESTOCK_CAPACITY)
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, ["Coffee", "Sugar", "Cream"]);
    }

    impl Inventory {
        fn with_count(&self, id: &str, count: i64) -> Self {
            let ingredients = self
                .iter()
                .map(|i| {
                    if i.id_typed().as_str() == id {
                        i.clone().with_inventory(count)
                    } else {
                        i.clone()
                    }
                })
                .collect();
            Self { ingredients }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: restock resets every count to capacity regardless of history.
        #[test]
        fn restock_resets_every_count(
            amounts in prop::collection::vec((0usize..3, 0u32..15), 0..20)
        ) {
            let ids = ["coffee", "sugar", "cream"];
            let mut inventory = sample();
            for (idx, amount) in amounts {
                inventory = inventory.deducted(&[deduction(ids[idx], amount)]);
            }

            let restocked = inventory.restocked(RESTOCK_CAPACITY);
            prop_assert!(restocked.iter().all(|i| i.inventory() == RESTOCK_CAPACITY));
            prop_assert_eq!(restocked.restocked(RESTOCK_CAPACITY), restocked);
        }
    }
}
