use baristamatic_dispenser::DispenserStore;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Menu entry, 1-based.
    Order(usize),
    Restock,
    Quit,
    /// Blank line: just redraw.
    Redraw,
    Invalid(String),
}

impl Selection {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "" => Selection::Redraw,
            "q" | "Q" => Selection::Quit,
            "r" | "R" => Selection::Restock,
            _ => match trimmed.parse::<usize>() {
                Ok(n) if n > 0 => Selection::Order(n),
                _ => Selection::Invalid(trimmed.to_string()),
            },
        }
    }
}

/// What the front end should do after a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: Option<String>,
    pub quit: bool,
}

impl Reply {
    fn redraw() -> Self {
        Self {
            message: None,
            quit: false,
        }
    }

    fn say(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            quit: false,
        }
    }
}

/// Apply one line of input to the store.
///
/// Orders are checked for availability first, the way a disabled button
/// would stop them, so the store only ever sees dispensable drinks from here.
pub fn respond(store: &DispenserStore, input: &str) -> Reply {
    match Selection::parse(input) {
        Selection::Quit => Reply {
            message: None,
            quit: true,
        },
        Selection::Redraw => Reply::redraw(),
        Selection::Restock => {
            store.restock_inventory();
            Reply::redraw()
        }
        Selection::Invalid(raw) => Reply::say(format!("Invalid selection: {raw}")),
        Selection::Order(n) => {
            let drinks = store.drinks();
            let Some(drink) = drinks.get(n - 1) else {
                return Reply::say(format!("Invalid selection: {n}"));
            };
            if !store.is_drink_available(drink.id_typed()) {
                tracing::debug!("Refusing order for {}: out of stock", drink.name());
                return Reply::say(format!("Out of stock: {}", drink.name()));
            }
            store.dispense_drink(drink.id_typed());
            Reply::redraw()
        }
    }
}
