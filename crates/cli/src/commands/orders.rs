//! Order commands.

use serde_json::Value;
use tracing::{info, warn};
use travel_planner_core::{Order, OrderId, OrderStore, Storage, is_reserved_field};
use uuid::Uuid;

use super::emit;
use crate::config::CliConfig;

/// Parse a `key=value` order field.
///
/// The value is parsed as JSON when possible (`2`, `true`, `{"a":1}`), and
/// kept as a plain string otherwise.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty, or if the key
/// would shadow `id` or `date`.
pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid field '{raw}': expected key=value"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid field '{raw}': key is empty"));
    }
    if is_reserved_field(key) {
        return Err(format!("use --{key} instead of --field {key}=..."));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Turn a command-line id into an [`OrderId`].
///
/// Stored ids may be strings or numbers. A string id equal to `raw` wins;
/// otherwise an all-digit `raw` is taken as a numeric id.
pub fn resolve_id<S: Storage>(orders: &OrderStore<S>, raw: &str) -> OrderId {
    let text = OrderId::from(raw);
    if orders.get(&text).is_some() {
        return text;
    }
    raw.parse::<u64>().map_or(text, OrderId::from)
}

/// Add an order.
///
/// # Errors
///
/// Returns an error if the order cannot be stored.
pub fn add(
    config: &CliConfig,
    id: Option<String>,
    date: String,
    fields: Vec<(String, Value)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut order = Order::new(id, date);
    if order.timestamp().is_none() {
        warn!(date = %order.date, "Order date is not a recognized timestamp; it will sort last");
    }
    for (key, value) in fields {
        order = order.with_field(key, value);
    }

    let storage = config.storage();
    let mut orders = OrderStore::new(&storage);
    let id = order.id.clone();
    orders.add_order(order)?;

    info!(order_id = %id, total = orders.total_orders(), "Order added");
    emit(id)?;
    Ok(())
}

/// Print every order as one JSON line, most recent first.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    let orders = OrderStore::new(&storage);

    for order in orders.user_orders() {
        emit(serde_json::to_string(order)?)?;
    }
    Ok(())
}

/// Print one order.
///
/// # Errors
///
/// Returns an error if no order has this id.
pub fn show(config: &CliConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    let orders = OrderStore::new(&storage);

    let order = orders
        .get(&resolve_id(&orders, id))
        .ok_or_else(|| format!("order not found: {id}"))?;
    emit(serde_json::to_string_pretty(order)?)?;
    Ok(())
}

/// Delete every order with this id.
///
/// # Errors
///
/// Returns an error if the collection cannot be stored.
pub fn delete(config: &CliConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    let mut orders = OrderStore::new(&storage);

    let removed = orders.delete_order(resolve_id(&orders, id))?;
    if removed == 0 {
        warn!(order_id = %id, "No orders matched");
    } else {
        info!(order_id = %id, removed, "Orders deleted");
    }
    Ok(())
}

/// Print the number of orders.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn count(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage = config.storage();
    emit(OrderStore::new(&storage).total_orders())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use travel_planner_core::MemoryStorage;

    use super::*;

    #[test]
    fn test_parse_field_json_values() {
        assert_eq!(parse_field("nights=2").unwrap(), ("nights".to_string(), json!(2)));
        assert_eq!(parse_field("paid=true").unwrap(), ("paid".to_string(), json!(true)));
        assert_eq!(
            parse_field(r#"room={"beds":2}"#).unwrap(),
            ("room".to_string(), json!({"beds": 2}))
        );
    }

    #[test]
    fn test_parse_field_falls_back_to_string() {
        assert_eq!(
            parse_field("hotel=Grand Budapest").unwrap(),
            ("hotel".to_string(), json!("Grand Budapest"))
        );
        assert_eq!(parse_field("note=").unwrap(), ("note".to_string(), json!("")));
        assert_eq!(parse_field("expr=a=b").unwrap(), ("expr".to_string(), json!("a=b")));
    }

    #[test]
    fn test_parse_field_rejects_bad_input() {
        assert!(parse_field("no-equals").is_err());
        assert!(parse_field("=value").is_err());
        assert!(parse_field("id=5").is_err());
        assert!(parse_field("date=2024-01-01").is_err());
    }

    #[test]
    fn test_resolve_id_prefers_stored_string_id() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "orders",
                r#"[{"id":"42","date":"2024-01-01"},{"id":1714000000000,"date":"2024-01-02"}]"#,
            )
            .unwrap();
        let orders = OrderStore::new(&storage);

        assert_eq!(resolve_id(&orders, "42"), OrderId::from("42"));
        assert_eq!(resolve_id(&orders, "1714000000000"), OrderId::from(1_714_000_000_000_u64));
        assert_eq!(resolve_id(&orders, "trip-1"), OrderId::from("trip-1"));
    }
}
