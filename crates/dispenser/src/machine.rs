//! The dispenser aggregate: decides what a command does, then applies it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use baristamatic_core::{Aggregate, AggregateRoot, DomainError, DrinkId, MachineId};
use baristamatic_events::Event;
use baristamatic_inventory::{Ingredient, RESTOCK_CAPACITY, StockDeduction};
use baristamatic_menu::{Drink, DrinkWithPrice, is_available, priced};

use crate::catalog::Catalog;

/// How a dispense treats a drink that cannot be made from current stock.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispensePolicy {
    /// Dispense anyway; stock may go negative. Callers are expected to check
    /// availability first.
    #[default]
    Permissive,
    /// Reject with `DomainError::InvariantViolation` and change nothing.
    Strict,
}

/// Aggregate root: Dispenser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispenser {
    id: MachineId,
    catalog: Catalog,
    dispensing: Option<String>,
    policy: DispensePolicy,
    version: u64,
}

impl Dispenser {
    pub fn new(id: MachineId, catalog: Catalog, policy: DispensePolicy) -> Self {
        Self {
            id,
            catalog,
            dispensing: None,
            policy,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> MachineId {
        self.id
    }

    pub fn policy(&self) -> DispensePolicy {
        self.policy
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.catalog.inventory().as_slice()
    }

    pub fn drinks(&self) -> &[Drink] {
        self.catalog.drinks()
    }

    pub fn drinks_with_prices(&self) -> Vec<DrinkWithPrice> {
        priced(self.catalog.drinks(), self.catalog.inventory())
    }

    /// Name of the drink being prepared, or `""` when idle.
    pub fn dispensing_status(&self) -> &str {
        self.dispensing.as_deref().unwrap_or("")
    }

    /// False for unknown drinks; otherwise whether stock covers every line.
    pub fn is_drink_available(&self, drink_id: &DrinkId) -> bool {
        self.catalog
            .drink(drink_id)
            .is_some_and(|drink| is_available(drink, self.catalog.inventory()))
    }
}

impl AggregateRoot for Dispenser {
    type Id = MachineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: Dispense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispense {
    pub drink_id: DrinkId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Restock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restock {
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearDispensing. Issued by the deferred timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearDispensing {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispenserCommand {
    Dispense(Dispense),
    Restock(Restock),
    ClearDispensing(ClearDispensing),
}

/// Event: DrinkDispensed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkDispensed {
    pub drink_id: DrinkId,
    pub drink_name: String,
    pub deductions: Vec<StockDeduction>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: InventoryRestocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRestocked {
    pub capacity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DispensingCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispensingCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispenserEvent {
    DrinkDispensed(DrinkDispensed),
    InventoryRestocked(InventoryRestocked),
    DispensingCleared(DispensingCleared),
}

impl Event for DispenserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DispenserEvent::DrinkDispensed(_) => "dispenser.drink.dispensed",
            DispenserEvent::InventoryRestocked(_) => "dispenser.inventory.restocked",
            DispenserEvent::DispensingCleared(_) => "dispenser.status.cleared",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DispenserEvent::DrinkDispensed(e) => e.occurred_at,
            DispenserEvent::InventoryRestocked(e) => e.occurred_at,
            DispenserEvent::DispensingCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Dispenser {
    type Command = DispenserCommand;
    type Event = DispenserEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DispenserEvent::DrinkDispensed(e) => {
                self.dispensing = Some(e.drink_name.clone());
                let inventory = self.catalog.inventory().deducted(&e.deductions);
                self.catalog.replace_inventory(inventory);
            }
            DispenserEvent::InventoryRestocked(e) => {
                let inventory = self.catalog.inventory().restocked(e.capacity);
                self.catalog.replace_inventory(inventory);
            }
            DispenserEvent::DispensingCleared(_) => {
                self.dispensing = None;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            DispenserCommand::Dispense(cmd) => self.handle_dispense(cmd),
            DispenserCommand::Restock(cmd) => Ok(vec![DispenserEvent::InventoryRestocked(
                InventoryRestocked {
                    capacity: RESTOCK_CAPACITY,
                    occurred_at: cmd.occurred_at,
                },
            )]),
            DispenserCommand::ClearDispensing(cmd) => Ok(vec![DispenserEvent::DispensingCleared(
                DispensingCleared {
                    occurred_at: cmd.occurred_at,
                },
            )]),
        }
    }
}

impl Dispenser {
    fn handle_dispense(&self, cmd: &Dispense) -> Result<Vec<DispenserEvent>, DomainError> {
        // Unknown drinks are a silent no-op, not an error.
        let Some(drink) = self.catalog.drink(&cmd.drink_id) else {
            return Ok(Vec::new());
        };

        if self.policy == DispensePolicy::Strict && !is_available(drink, self.catalog.inventory()) {
            return Err(DomainError::invariant(format!(
                "insufficient inventory for {}",
                drink.name()
            )));
        }

        Ok(vec![DispenserEvent::DrinkDispensed(DrinkDispensed {
            drink_id: drink.id_typed().clone(),
            drink_name: drink.name().to_string(),
            deductions: drink.deductions(self.catalog.inventory()),
            occurred_at: cmd.occurred_at,
        })])
    }
}
