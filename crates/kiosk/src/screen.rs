use std::fmt::Write;

use baristamatic_dispenser::{DispenserEnvelope, DispenserEvent, DispenserStore};

/// The full screen: inventory, numbered menu, then the status line if a drink
/// is being prepared.
///
/// ```text
/// Inventory:
/// Coffee,10
/// ...
/// Menu:
/// 1,Coffee,$2.75,true
/// ...
/// ```
pub fn render(store: &DispenserStore) -> String {
    let mut out = String::from("Inventory:\n");
    for ingredient in store.ingredients() {
        let _ = writeln!(out, "{},{}", ingredient.name(), ingredient.inventory());
    }

    out.push_str("Menu:\n");
    for (n, drink) in store.drinks_with_prices().iter().enumerate() {
        let available = store.is_drink_available(drink.id_typed());
        let _ = writeln!(out, "{},{},{},{}", n + 1, drink.name(), drink.price(), available);
    }

    let status = store.dispensing_status();
    if !status.is_empty() {
        let _ = writeln!(out, "Dispensing {status}...");
    }
    out
}

/// True if any of `envelopes` cleared the dispensing status, meaning a screen
/// drawn before them still shows a stale status line.
pub fn status_cleared(envelopes: impl IntoIterator<Item = DispenserEnvelope>) -> bool {
    envelopes
        .into_iter()
        .any(|envelope| matches!(envelope.payload(), DispenserEvent::DispensingCleared(_)))
}
