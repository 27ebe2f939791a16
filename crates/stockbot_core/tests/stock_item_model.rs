use stockbot_core::StockItem;

#[test]
fn stock_item_serializes_with_plain_field_names() {
    let item = StockItem::new("ABC123", "Blue Saree", 10);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["sku"], "ABC123");
    assert_eq!(json["name"], "Blue Saree");
    assert_eq!(json["quantity"], 10);

    let decoded: StockItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn negative_quantity_survives_serialization() {
    let item = StockItem::new("R1", "Returned", -2);
    let json = serde_json::to_string(&item).unwrap();
    assert!(json.contains("\"quantity\":-2"));
}
