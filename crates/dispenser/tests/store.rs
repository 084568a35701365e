//! Black-box tests of the store's public contract.

use std::sync::Arc;
use std::time::Duration;

use baristamatic_core::{DrinkId, IngredientId, Money};
use baristamatic_dispenser::seed::{COFFEE, CREAM, SUGAR};
use baristamatic_dispenser::{
    Catalog, DispensePolicy, DispenserConfig, DispenserEvent, DispenserStore, ManualTimer,
};
use baristamatic_events::Event;
use baristamatic_inventory::{Ingredient, RESTOCK_CAPACITY};
use baristamatic_menu::{Drink, RecipeLine};
use proptest::prelude::*;

const DELAY: Duration = Duration::from_millis(3000);

fn manual_store(config: DispenserConfig) -> (DispenserStore, Arc<ManualTimer>) {
    let timer = Arc::new(ManualTimer::new());
    let store = DispenserStore::with_timer(Catalog::seed(), &config, timer.clone());
    (store, timer)
}

fn stock(store: &DispenserStore, id: &str) -> i64 {
    store
        .ingredients()
        .into_iter()
        .find(|i| i.id_typed().as_str() == id)
        .map(|i| i.inventory())
        .unwrap()
}

fn drink_id(store: &DispenserStore, name: &str) -> DrinkId {
    store
        .drinks()
        .into_iter()
        .find(|d| d.name() == name)
        .map(|d| d.id_typed().clone())
        .unwrap()
}

#[test]
fn initial_state_matches_seed() {
    let (store, _timer) = manual_store(DispenserConfig::default());

    let ingredients = store.ingredients();
    assert_eq!(ingredients.len(), 9);
    assert_eq!(ingredients[0].name(), "Coffee");
    assert!(ingredients.iter().all(|i| i.inventory() == 10));

    let drinks = store.drinks();
    assert_eq!(drinks.len(), 6);
    assert_eq!(drinks[0].name(), "Coffee");
    assert_eq!(drinks[0].recipe().len(), 3);

    assert_eq!(store.dispensing_status(), "");
}

#[test]
fn seeded_prices() {
    let (store, _timer) = manual_store(DispenserConfig::default());

    let prices: Vec<_> = store
        .drinks_with_prices()
        .iter()
        .map(|d| (d.name().to_string(), d.price().cents()))
        .collect();

    assert_eq!(
        prices,
        [
            ("Coffee".to_string(), 275),
            ("Decaf Coffee".to_string(), 275),
            ("Caffe Latte".to_string(), 255),
            ("Caffe Americano".to_string(), 330),
            ("Caffe Mocha".to_string(), 335),
            ("Capuccino".to_string(), 290),
        ]
    );
}

#[test]
fn coffee_scenario() {
    let (store, timer) = manual_store(DispenserConfig::default());
    let coffee = drink_id(&store, "Coffee");

    assert_eq!(store.drinks_with_prices()[0].price(), Money::from_cents(275));
    assert!(store.is_drink_available(&coffee));

    store.dispense_drink(&coffee);

    assert_eq!(store.dispensing_status(), "Coffee");
    assert_eq!(stock(&store, COFFEE), 7);
    assert_eq!(stock(&store, SUGAR), 9);
    assert_eq!(stock(&store, CREAM), 9);
    // Unreferenced ingredients are untouched.
    assert_eq!(
        store.ingredients().iter().filter(|i| i.inventory() == 10).count(),
        6
    );

    store.restock_inventory();
    assert!(store.ingredients().iter().all(|i| i.inventory() == RESTOCK_CAPACITY));

    timer.advance(DELAY);
    assert_eq!(store.dispensing_status(), "");
}

#[test]
fn availability_tracks_stock() {
    let (store, _timer) = manual_store(DispenserConfig::default());
    let americano = drink_id(&store, "Caffe Americano");
    let latte = drink_id(&store, "Caffe Latte");

    // 10 espresso: three americanos leave 1, enough for neither.
    for _ in 0..3 {
        store.dispense_drink(&americano);
    }

    assert!(!store.is_drink_available(&americano));
    assert!(!store.is_drink_available(&latte));
    assert!(store.is_drink_available(&drink_id(&store, "Caffe Mocha")));
    assert!(!store.is_drink_available(&DrinkId::new("non-existent")));
}

#[test]
fn unknown_drink_changes_nothing() {
    let (store, timer) = manual_store(DispenserConfig::default());
    let events = store.subscribe();
    let before = store.ingredients();

    store.dispense_drink(&DrinkId::new("non-existent-id"));

    assert_eq!(store.dispensing_status(), "");
    assert_eq!(store.ingredients(), before);
    assert_eq!(store.version(), 0);
    assert_eq!(timer.pending(), 0);
    assert!(events.drain().is_empty());
}

#[test]
fn status_clears_after_delay() {
    let (store, timer) = manual_store(DispenserConfig::default());
    store.dispense_drink(&drink_id(&store, "Coffee"));

    timer.advance(DELAY - Duration::from_millis(1));
    assert_eq!(store.dispensing_status(), "Coffee");

    timer.advance(Duration::from_millis(1));
    assert_eq!(store.dispensing_status(), "");
}

#[test]
fn earlier_clear_wipes_a_later_status() {
    let (store, timer) = manual_store(DispenserConfig::default());

    store.dispense_drink(&drink_id(&store, "Coffee"));
    timer.advance(Duration::from_millis(1000));
    store.dispense_drink(&drink_id(&store, "Caffe Latte"));
    assert_eq!(store.dispensing_status(), "Caffe Latte");

    // The first clear fires at 3000 ms and clears the latte's status too.
    timer.advance(Duration::from_millis(2000));
    assert_eq!(store.dispensing_status(), "");
    assert_eq!(timer.pending(), 1);

    timer.advance(Duration::from_millis(1000));
    assert_eq!(timer.pending(), 0);
    assert_eq!(store.dispensing_status(), "");
}

#[test]
fn permissive_dispense_can_go_negative() {
    let (store, _timer) = manual_store(DispenserConfig::default());
    let coffee = drink_id(&store, "Coffee");

    for _ in 0..4 {
        store.dispense_drink(&coffee);
    }

    assert_eq!(stock(&store, COFFEE), -2);
    assert_eq!(store.dispensing_status(), "Coffee");
}

#[test]
fn strict_dispense_rejects_and_keeps_state() {
    let config = DispenserConfig {
        policy: DispensePolicy::Strict,
        ..DispenserConfig::default()
    };
    let (store, timer) = manual_store(config);
    let coffee = drink_id(&store, "Coffee");

    for _ in 0..3 {
        assert!(store.try_dispense_drink(&coffee).unwrap());
    }
    timer.advance(DELAY);
    let version = store.version();

    assert!(store.try_dispense_drink(&coffee).is_err());
    store.dispense_drink(&coffee);

    assert_eq!(stock(&store, COFFEE), 1);
    assert_eq!(store.dispensing_status(), "");
    assert_eq!(store.version(), version);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn events_are_published_in_order() {
    let (store, timer) = manual_store(DispenserConfig::default());
    let events = store.subscribe();

    store.dispense_drink(&drink_id(&store, "Coffee"));
    store.restock_inventory();
    timer.advance(DELAY);

    let received = events.drain();
    let types: Vec<_> = received.iter().map(|e| e.payload().event_type()).collect();
    assert_eq!(
        types,
        [
            "dispenser.drink.dispensed",
            "dispenser.inventory.restocked",
            "dispenser.status.cleared"
        ]
    );

    let sequence: Vec<_> = received.iter().map(|e| e.sequence_number()).collect();
    assert_eq!(sequence, [1, 2, 3]);
    assert_eq!(store.version(), 3);

    match received[0].payload() {
        DispenserEvent::DrinkDispensed(e) => assert_eq!(e.drink_name, "Coffee"),
        other => panic!("Expected DrinkDispensed, got {other:?}"),
    }
}

#[test]
fn custom_catalog_with_dangling_reference() {
    let water = Ingredient::new(IngredientId::new("water"), "Water", Money::from_cents(10));
    let drink = Drink::new(
        DrinkId::new("mystery"),
        "Mystery",
        vec![
            RecipeLine::new(IngredientId::new("water"), 2).unwrap(),
            RecipeLine::new(IngredientId::new("unobtainium"), 1).unwrap(),
        ],
    );
    let catalog = Catalog::new(vec![water], vec![drink]).unwrap();
    let timer = Arc::new(ManualTimer::new());
    let store = DispenserStore::with_timer(catalog, &DispenserConfig::default(), timer);
    let mystery = DrinkId::new("mystery");

    assert_eq!(store.drinks_with_prices()[0].price(), Money::from_cents(20));
    assert!(!store.is_drink_available(&mystery));

    // Permissive dispense still takes the water.
    store.dispense_drink(&mystery);
    assert_eq!(store.ingredients()[0].inventory(), 8);
    assert_eq!(store.dispensing_status(), "Mystery");
}

#[tokio::test(start_paused = true)]
async fn tokio_store_clears_after_delay() {
    let store = DispenserStore::new(Catalog::seed(), &DispenserConfig::default()).unwrap();
    let coffee = drink_id(&store, "Coffee");

    store.dispense_drink(&coffee);
    assert_eq!(store.dispensing_status(), "Coffee");

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(store.dispensing_status(), "Coffee");

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(store.dispensing_status(), "");
}

#[tokio::test(start_paused = true)]
async fn tokio_store_uses_configured_delay() {
    let config = DispenserConfig {
        dispense_delay: Duration::from_millis(500),
        ..DispenserConfig::default()
    };
    let store = DispenserStore::new(Catalog::seed(), &config).unwrap();

    store.dispense_drink(&drink_id(&store, "Capuccino"));
    tokio::time::sleep(Duration::from_millis(501)).await;

    assert_eq!(store.dispensing_status(), "");
}

/// A kiosk step: order the n-th menu entry, or restock.
#[derive(Debug, Clone)]
enum Step {
    Order(usize),
    Restock,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (0usize..6).prop_map(Step::Order),
        1 => Just(Step::Restock),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Checking availability before every dispense keeps all counts non-negative.
    #[test]
    fn checked_dispenses_never_go_negative(
        steps in prop::collection::vec(step(), 0..60),
        tick_ms in 0u64..4000,
    ) {
        let (store, timer) = manual_store(DispenserConfig::default());
        let drinks = store.drinks();

        for step in steps {
            match step {
                Step::Order(n) => {
                    let id = drinks[n].id_typed();
                    if store.is_drink_available(id) {
                        store.dispense_drink(id);
                    }
                }
                Step::Restock => store.restock_inventory(),
            }
            timer.advance(Duration::from_millis(tick_ms));

            for ingredient in store.ingredients() {
                prop_assert!(
                    (0..=RESTOCK_CAPACITY).contains(&ingredient.inventory()),
                    "{} at {}",
                    ingredient.name(),
                    ingredient.inventory()
                );
            }
        }
    }
}
