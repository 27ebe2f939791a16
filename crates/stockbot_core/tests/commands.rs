use stockbot_core::{
    BatchError, CommandError, CommandOutcome, CommandService, Invocation, LedgerError,
    LedgerStore, StockItem,
};

fn run(store: &LedgerStore, line: &str) -> Result<CommandOutcome, CommandError> {
    let invocation = Invocation::parse(line).unwrap();
    CommandService::new(store).execute(&invocation)
}

#[test]
fn addsku_joins_middle_arguments_into_name() {
    let store = LedgerStore::open_in_memory().unwrap();

    let outcome = run(&store, "/addsku ABC123 Blue   Silk Saree 10").unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Added {
            item: StockItem::new("ABC123", "Blue Silk Saree", 10),
            delta: 10,
        }
    );
}

#[test]
fn addsku_validates_arity_and_quantity() {
    let store = LedgerStore::open_in_memory().unwrap();

    let usage = run(&store, "/addsku ABC123 10").unwrap_err();
    assert!(matches!(
        usage,
        CommandError::Usage { usage } if usage == "/addsku <SKU> <name> <qty>"
    ));

    let quantity = run(&store, "/addsku ABC123 Blue ten").unwrap_err();
    assert!(matches!(quantity, CommandError::InvalidQuantity { raw } if raw == "ten"));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn stock_and_sell_round_through_the_ledger() {
    let store = LedgerStore::open_in_memory().unwrap();
    run(&store, "/addsku A Blue Saree 10").unwrap();

    assert_eq!(
        run(&store, "/sell A 2").unwrap(),
        CommandOutcome::Sold {
            sku: "A".to_string(),
            amount: 2,
            quantity: 8,
        }
    );
    assert_eq!(
        run(&store, "/stock A").unwrap(),
        CommandOutcome::Stock(StockItem::new("A", "Blue Saree", 8))
    );

    let oversell = run(&store, "/sell A 9").unwrap_err();
    assert!(matches!(
        oversell,
        CommandError::Ledger(LedgerError::InsufficientStock { current: 8, .. })
    ));
}

#[test]
fn sell_rejects_negative_quantity_before_touching_ledger() {
    let store = LedgerStore::open_in_memory().unwrap();
    run(&store, "/addsku A Thing 1").unwrap();

    let err = run(&store, "/sell A -5").unwrap_err();
    assert!(matches!(err, CommandError::InvalidQuantity { raw } if raw == "-5"));
    assert_eq!(store.lookup("A").unwrap().quantity, 1);
}

#[test]
fn single_sku_commands_require_exactly_one_argument() {
    let store = LedgerStore::open_in_memory().unwrap();
    for line in ["/stock", "/stock A B", "/delete", "/sell A"] {
        assert!(
            matches!(run(&store, line).unwrap_err(), CommandError::Usage { .. }),
            "{line} should be a usage error"
        );
    }
}

#[test]
fn list_distinguishes_empty_ledger_from_not_found() {
    let store = LedgerStore::open_in_memory().unwrap();
    assert_eq!(run(&store, "/list").unwrap(), CommandOutcome::Listing(Vec::new()));

    run(&store, "/addsku B Bee 1").unwrap();
    run(&store, "/addsku A Ay 2").unwrap();
    let CommandOutcome::Listing(items) = run(&store, "/list").unwrap() else {
        panic!("expected listing");
    };
    assert_eq!(
        items.iter().map(|item| item.sku.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );
}

#[test]
fn bulk_commands_receive_unsplit_payload() {
    let store = LedgerStore::open_in_memory().unwrap();

    let CommandOutcome::Batch(report) =
        run(&store, "/addbulk ABC123|Blue Saree|10; DEF456|Red Saree|5").unwrap()
    else {
        panic!("expected batch outcome");
    };
    assert_eq!(report.applied_count(), 2);
    assert_eq!(store.lookup("ABC123").unwrap().name, "Blue Saree");

    let CommandOutcome::Batch(report) = run(&store, "/sellbulk ABC123|2; DEF456|9").unwrap()
    else {
        panic!("expected batch outcome");
    };
    assert_eq!(report.applied_count(), 1);
    assert_eq!(report.rejected_count(), 1);
}

#[test]
fn bulk_commands_without_payload_show_usage_and_blank_entries_are_empty_batch() {
    let store = LedgerStore::open_in_memory().unwrap();

    assert!(matches!(
        run(&store, "/sellbulk").unwrap_err(),
        CommandError::Usage { .. }
    ));
    assert!(matches!(
        run(&store, "/addbulk ; ;").unwrap_err(),
        CommandError::Batch(BatchError::EmptyBatch { .. })
    ));
}

#[test]
fn delete_then_stock_is_not_found() {
    let store = LedgerStore::open_in_memory().unwrap();
    run(&store, "/addsku A Thing 1").unwrap();

    assert_eq!(
        run(&store, "/delete A").unwrap(),
        CommandOutcome::Deleted {
            sku: "A".to_string()
        }
    );
    assert!(matches!(
        run(&store, "/stock A").unwrap_err(),
        CommandError::Ledger(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        run(&store, "/delete A").unwrap_err(),
        CommandError::Ledger(LedgerError::NotFound(_))
    ));
}

#[test]
fn unknown_commands_and_help() {
    let store = LedgerStore::open_in_memory().unwrap();

    assert!(matches!(
        run(&store, "/restock A 1").unwrap_err(),
        CommandError::UnknownCommand(name) if name == "restock"
    ));
    let CommandOutcome::Help(commands) = run(&store, "/help").unwrap() else {
        panic!("expected help");
    };
    assert!(commands.iter().any(|help| help.name == "sellbulk"));
    assert_eq!(run(&store, "/start").unwrap(), CommandOutcome::Welcome);
}

#[test]
fn invocation_new_hands_bulk_payload_through_unsplit() {
    let store = LedgerStore::open_in_memory().unwrap();
    let invocation = Invocation::new("AddBulk", "A|Blue   Saree|3; B|Red Saree|1");

    let outcome = CommandService::new(&store).execute(&invocation).unwrap();
    assert!(matches!(outcome, CommandOutcome::Batch(report) if report.applied_count() == 2));
    assert_eq!(store.lookup("A").unwrap().name, "Blue   Saree");
    assert_eq!(store.lookup("B").unwrap().name, "Red Saree");
}
