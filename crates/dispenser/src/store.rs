//! The inventory & dispense store: the one place that owns mutable state.
//!
//! Every command runs the same pipeline:
//!
//! ```text
//! Command
//!   ↓
//! 1. Handle (pure decision on the current Dispenser, produces events)
//!   ↓
//! 2. Apply each event (state + version advance, under the lock)
//!   ↓
//! 3. Publish envelopes to subscribers (best effort, outside the lock)
//!   ↓
//! 4. Schedule follow-up work (the deferred status clear after a dispense)
//! ```
//!
//! Reads take the lock only long enough to compute the view, so derived data
//! is always recomputed from current state.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::Utc;

use baristamatic_core::{Aggregate, AggregateRoot, DomainResult, DrinkId, MachineId};
use baristamatic_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use baristamatic_inventory::Ingredient;
use baristamatic_menu::{Drink, DrinkWithPrice};

use crate::catalog::Catalog;
use crate::config::DispenserConfig;
use crate::machine::{
    ClearDispensing, Dispense, Dispenser, DispenserCommand, DispenserEvent, Restock,
};
use crate::timer::{ClearTimer, TimerError, TokioTimer};

pub type DispenserEnvelope = EventEnvelope<DispenserEvent>;

struct StoreInner {
    machine: Mutex<Dispenser>,
    bus: InMemoryEventBus<DispenserEnvelope>,
    timer: Arc<dyn ClearTimer>,
    dispense_delay: Duration,
}

/// Cheaply cloneable handle to a single dispensing machine.
#[derive(Clone)]
pub struct DispenserStore {
    inner: Arc<StoreInner>,
}

impl DispenserStore {
    /// A store whose status clears run on the current tokio runtime.
    pub fn new(catalog: Catalog, config: &DispenserConfig) -> Result<Self, TimerError> {
        let timer = TokioTimer::try_current()?;
        Ok(Self::with_timer(catalog, config, Arc::new(timer)))
    }

    /// A store that schedules status clears on `timer`.
    pub fn with_timer(catalog: Catalog, config: &DispenserConfig, timer: Arc<dyn ClearTimer>) -> Self {
        let machine = Dispenser::new(MachineId::new(), catalog, config.policy);
        tracing::info!(
            "Dispenser {} ready with {} ingredients and {} drinks ({:?} dispensing)",
            machine.id_typed(),
            machine.ingredients().len(),
            machine.drinks().len(),
            config.policy
        );

        Self {
            inner: Arc::new(StoreInner {
                machine: Mutex::new(machine),
                bus: InMemoryEventBus::new(),
                timer,
                dispense_delay: config.dispense_delay,
            }),
        }
    }

    pub fn machine_id(&self) -> MachineId {
        self.read(|m| m.id_typed())
    }

    /// Number of events applied so far; changes on every mutation.
    pub fn version(&self) -> u64 {
        self.read(|m| m.version())
    }

    /// Snapshot of all ingredients in catalog order.
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.read(|m| m.ingredients().to_vec())
    }

    /// Snapshot of all drinks in catalog order, without prices.
    pub fn drinks(&self) -> Vec<Drink> {
        self.read(|m| m.drinks().to_vec())
    }

    pub fn drinks_with_prices(&self) -> Vec<DrinkWithPrice> {
        self.read(Dispenser::drinks_with_prices)
    }

    /// Name of the drink being prepared; empty when idle.
    pub fn dispensing_status(&self) -> String {
        self.read(|m| m.dispensing_status().to_string())
    }

    pub fn is_drink_available(&self, drink_id: &DrinkId) -> bool {
        self.read(|m| m.is_drink_available(drink_id))
    }

    /// Fire-and-forget dispense.
    ///
    /// Unknown drinks are ignored. Under the strict policy an unavailable
    /// drink is rejected and only logged.
    pub fn dispense_drink(&self, drink_id: &DrinkId) {
        if let Err(err) = self.try_dispense_drink(drink_id) {
            tracing::warn!("Dispense of {} rejected: {}", drink_id, err);
        }
    }

    /// Dispense, reporting what happened.
    ///
    /// `Ok(false)` means the drink id matched nothing and nothing changed.
    pub fn try_dispense_drink(&self, drink_id: &DrinkId) -> DomainResult<bool> {
        let events = self.execute(DispenserCommand::Dispense(Dispense {
            drink_id: drink_id.clone(),
            occurred_at: Utc::now(),
        }))?;

        if events.is_empty() {
            tracing::debug!("No drink with id {}; nothing dispensed", drink_id);
            return Ok(false);
        }

        self.schedule_clear();
        Ok(true)
    }

    /// Reset every ingredient to full capacity.
    pub fn restock_inventory(&self) {
        let command = DispenserCommand::Restock(Restock {
            occurred_at: Utc::now(),
        });
        if let Err(err) = self.execute(command) {
            tracing::warn!("Restock failed: {}", err);
        }
    }

    /// Receive an envelope for every event applied from now on.
    pub fn subscribe(&self) -> Subscription<DispenserEnvelope> {
        self.inner.bus.subscribe()
    }

    fn read<T>(&self, view: impl FnOnce(&Dispenser) -> T) -> T {
        view(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Dispenser> {
        // A panic while holding the lock cannot leave a half-applied event.
        self.inner
            .machine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn execute(&self, command: DispenserCommand) -> DomainResult<Vec<DispenserEvent>> {
        let (events, envelopes) = {
            let mut machine = self.lock();
            let events = machine.handle(&command)?;

            let mut envelopes = Vec::with_capacity(events.len());
            for event in &events {
                machine.apply(event);
                envelopes.push(EventEnvelope::new(
                    machine.id_typed(),
                    machine.version(),
                    event.clone(),
                ));
            }
            (events, envelopes)
        };

        for envelope in envelopes {
            log_applied(envelope.payload());
            if let Err(err) = self.inner.bus.publish(envelope) {
                tracing::warn!("Failed to publish dispenser event: {:?}", err);
            }
        }

        Ok(events)
    }

    fn schedule_clear(&self) {
        // The pending clear must not keep the store alive.
        let inner: Weak<StoreInner> = Arc::downgrade(&self.inner);
        let delay = self.inner.dispense_delay;

        tracing::debug!("Dispensing status clears in {:?}", delay);
        self.inner.timer.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    DispenserStore { inner }.clear_dispensing();
                }
            }),
        );
    }

    fn clear_dispensing(&self) {
        let command = DispenserCommand::ClearDispensing(ClearDispensing {
            occurred_at: Utc::now(),
        });
        if let Err(err) = self.execute(command) {
            tracing::warn!("Clearing dispensing status failed: {}", err);
        }
    }
}

fn log_applied(event: &DispenserEvent) {
    let event_type = event.event_type();
    let occurred_at = event.occurred_at();
    match event {
        DispenserEvent::DrinkDispensed(e) => tracing::info!(
            event_type,
            %occurred_at,
            "Dispensing {} ({} ingredients used)",
            e.drink_name,
            e.deductions.len()
        ),
        DispenserEvent::InventoryRestocked(e) => {
            tracing::info!(event_type, %occurred_at, "Inventory restocked to {}", e.capacity)
        }
        DispenserEvent::DispensingCleared(_) => {
            tracing::debug!(event_type, %occurred_at, "Dispensing status cleared")
        }
    }
}

impl core::fmt::Debug for DispenserStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let machine = self.lock();
        f.debug_struct("DispenserStore")
            .field("machine_id", &machine.id_typed())
            .field("version", &machine.version())
            .field("dispensing", &machine.dispensing_status())
            .field("dispense_delay", &self.inner.dispense_delay)
            .finish()
    }
}
