use serde::{Deserialize, Serialize};

use baristamatic_core::{DomainError, DomainResult, DrinkId, Entity, IngredientId, ValueObject};
use baristamatic_inventory::{Inventory, StockDeduction};

/// An (ingredient, quantity) pair required to make a drink.
///
/// The ingredient may not exist in the inventory. Such a line is tolerated:
/// it costs nothing and makes the drink unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecipeLineRecord")]
pub struct RecipeLine {
    ingredient_id: IngredientId,
    amount: u32,
}

impl RecipeLine {
    pub fn new(ingredient_id: IngredientId, amount: u32) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation(format!(
                "recipe amount for {ingredient_id} must be positive"
            )));
        }
        Ok(Self {
            ingredient_id,
            amount,
        })
    }

    pub fn ingredient_id(&self) -> &IngredientId {
        &self.ingredient_id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl ValueObject for RecipeLine {}

/// Unvalidated wire shape of a recipe line.
#[derive(Deserialize)]
struct RecipeLineRecord {
    ingredient_id: IngredientId,
    amount: u32,
}

impl TryFrom<RecipeLineRecord> for RecipeLine {
    type Error = DomainError;

    fn try_from(record: RecipeLineRecord) -> DomainResult<Self> {
        Self::new(record.ingredient_id, record.amount)
    }
}

/// A named product defined by an ordered recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    id: DrinkId,
    name: String,
    recipe: Vec<RecipeLine>,
}

impl Drink {
    pub fn new(id: DrinkId, name: impl Into<String>, recipe: Vec<RecipeLine>) -> Self {
        Self {
            id,
            name: name.into(),
            recipe,
        }
    }

    pub fn id_typed(&self) -> &DrinkId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe(&self) -> &[RecipeLine] {
        &self.recipe
    }

    /// What dispensing this drink takes out of `inventory`.
    ///
    /// Walks the inventory in order and, for each ingredient the recipe
    /// mentions, takes the amount of the first matching line. Dangling lines
    /// produce nothing; repeated lines for one ingredient are not added up.
    pub fn deductions(&self, inventory: &Inventory) -> Vec<StockDeduction> {
        inventory
            .iter()
            .filter_map(|ingredient| {
                self.recipe
                    .iter()
                    .find(|line| line.ingredient_id() == ingredient.id_typed())
                    .map(|line| StockDeduction {
                        ingredient_id: line.ingredient_id().clone(),
                        amount: line.amount(),
                    })
            })
            .collect()
    }
}

impl Entity for Drink {
    type Id = DrinkId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baristamatic_core::Money;
    use baristamatic_inventory::Ingredient;

    fn line(id: &str, amount: u32) -> RecipeLine {
        RecipeLine::new(IngredientId::new(id), amount).unwrap()
    }

    fn inventory() -> Inventory {
        Inventory::new(vec![
            Ingredient::new(IngredientId::new("coffee"), "Coffee", Money::from_cents(75)),
            Ingredient::new(IngredientId::new("sugar"), "Sugar", Money::from_cents(25)),
            Ingredient::new(IngredientId::new("cream"), "Cream", Money::from_cents(25)),
        ])
        .unwrap()
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = RecipeLine::new(IngredientId::new("coffee"), 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deductions_follow_inventory_order() {
        let drink = Drink::new(
            DrinkId::new("coffee"),
            "Coffee",
            vec![line("cream", 1), line("coffee", 3), line("sugar", 1)],
        );

        let ids: Vec<_> = drink
            .deductions(&inventory())
            .into_iter()
            .map(|d| (d.ingredient_id.to_string(), d.amount))
            .collect();

        assert_eq!(
            ids,
            [
                ("coffee".to_string(), 3),
                ("sugar".to_string(), 1),
                ("cream".to_string(), 1)
            ]
        );
    }

    #[test]
    fn deductions_skip_dangling_and_take_first_duplicate() {
        let drink = Drink::new(
            DrinkId::new("odd"),
            "Odd",
            vec![line("ghost", 4), line("sugar", 2), line("sugar", 5)],
        );

        let deductions = drink.deductions(&inventory());

        assert_eq!(
            deductions,
            vec![StockDeduction {
                ingredient_id: IngredientId::new("sugar"),
                amount: 2
            }]
        );
    }

    #[test]
    fn recipe_lines_serialize_with_field_names() {
        let json = serde_json::to_value(line("coffee", 3)).unwrap();
        assert_eq!(json, serde_json::json!({ "ingredient_id": "coffee", "amount": 3 }));
    }

    #[test]
    fn deserializing_a_zero_amount_fails() {
        let result: Result<RecipeLine, _> =
            serde_json::from_value(serde_json::json!({ "ingredient_id": "coffee", "amount": 0 }));
        assert!(result.is_err());
    }
}
