//! Structural validation of untrusted JSON.
//!
//! These functions coerce arbitrary `serde_json::Value` input into typed
//! items and envelopes. They never coerce a record that fails a
//! required-field check (`id`, `name`, `quantity`, `location`); optional
//! fields default when absent, and unrecognized fields are stripped.
//!
//! Every check runs even after the first failure, so the resulting
//! [`ValidationError`] enumerates all violated fields at once.

use crate::envelope::Envelope;
use crate::error::{ValidationError, Violations};
use crate::item::InventoryItem;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Validate arbitrary JSON against the item shape.
///
/// Returns an item built from exactly the recognized fields. Missing
/// timestamps default to now; all other optional fields default to `None`.
///
/// # Errors
///
/// [`ValidationError`] listing every missing, wrongly-typed, or
/// out-of-range field.
pub fn validate_item(input: &Value) -> Result<InventoryItem, ValidationError> {
    let obj = match input.as_object() {
        Some(obj) => obj,
        None => return Err(ValidationError::single("item", "must be an object")),
    };
    let mut v = Violations::new();

    let id = match obj.get("id") {
        None | Some(Value::Null) => {
            v.push("id", "is required");
            None
        }
        Some(Value::String(s)) => match Uuid::parse_str(s) {
            Ok(id) => Some(id),
            Err(_) => {
                v.push("id", "must be a UUID string");
                None
            }
        },
        Some(_) => {
            v.push("id", "must be a UUID string");
            None
        }
    };

    let name = required_string(obj.get("name"), "name", &mut v);
    let quantity = required_non_negative(obj.get("quantity"), "quantity", &mut v);
    let location = required_string(obj.get("location"), "location", &mut v);

    let category = optional_string(obj.get("category"), "category", &mut v);
    let tags = optional_tags(obj.get("tags"), &mut v);
    let date_added = optional_timestamp(obj.get("dateAdded"), "dateAdded", &mut v);
    let date_updated = optional_timestamp(obj.get("dateUpdated"), "dateUpdated", &mut v);
    let low_stock_threshold =
        optional_non_negative(obj.get("lowStockThreshold"), "lowStockThreshold", &mut v);
    let value = optional_non_negative(obj.get("value"), "value", &mut v);

    v.finish()?;

    let now = Utc::now();
    match (id, name, quantity, location) {
        (Some(id), Some(name), Some(quantity), Some(location)) => Ok(InventoryItem {
            id,
            name,
            quantity,
            location,
            category,
            tags,
            date_added: date_added.unwrap_or(now),
            date_updated: date_updated.unwrap_or(now),
            low_stock_threshold,
            value,
        }),
        // Unreachable: a missing required field always records a violation.
        _ => Err(ValidationError::single("item", "missing required fields")),
    }
}

/// Validate arbitrary JSON against the envelope wrapper shape, recursively
/// validating every contained item.
///
/// # Errors
///
/// [`ValidationError`] if `schemaVersion` is not a positive integer,
/// `revision` is not a non-negative integer, `items` is not an array, or
/// any contained item fails [`validate_item`] (those violations are
/// prefixed with `items[i]`).
pub fn validate_envelope(input: &Value) -> Result<Envelope, ValidationError> {
    let obj = match input.as_object() {
        Some(obj) => obj,
        None => return Err(ValidationError::single("envelope", "must be an object")),
    };
    let mut v = Violations::new();

    let schema_version = match obj.get("schemaVersion").and_then(Value::as_u64) {
        Some(n) if n >= 1 && n <= u64::from(u32::MAX) => Some(n as u32),
        _ => {
            v.push("schemaVersion", "must be a positive integer");
            None
        }
    };
    let revision = match obj.get("revision").and_then(Value::as_u64) {
        Some(n) => Some(n),
        None => {
            v.push("revision", "must be a non-negative integer");
            None
        }
    };

    let mut items = Vec::new();
    match obj.get("items").and_then(Value::as_array) {
        Some(raw_items) => {
            for (idx, raw) in raw_items.iter().enumerate() {
                match validate_item(raw) {
                    Ok(item) => items.push(item),
                    Err(err) => v.extend_prefixed(&format!("items[{}]", idx), err),
                }
            }
        }
        None => v.push("items", "must be an array"),
    }

    v.finish()?;

    match (schema_version, revision) {
        (Some(schema_version), Some(revision)) => Ok(Envelope {
            schema_version,
            revision,
            items,
        }),
        _ => Err(ValidationError::single("envelope", "missing required fields")),
    }
}

fn required_string(raw: Option<&Value>, field: &str, v: &mut Violations) -> Option<String> {
    match raw {
        None | Some(Value::Null) => {
            v.push(field, "is required");
            None
        }
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            v.push(field, "must be a non-empty string");
            None
        }
        Some(_) => {
            v.push(field, "must be a non-empty string");
            None
        }
    }
}

fn required_non_negative(raw: Option<&Value>, field: &str, v: &mut Violations) -> Option<f64> {
    match raw {
        None | Some(Value::Null) => {
            v.push(field, "is required");
            None
        }
        Some(value) => match value.as_f64() {
            Some(n) if n >= 0.0 => Some(n),
            _ => {
                v.push(field, "must be a number >= 0");
                None
            }
        },
    }
}

fn optional_string(raw: Option<&Value>, field: &str, v: &mut Violations) -> Option<String> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(field, "must be a string");
            None
        }
    }
}

fn optional_tags(raw: Option<&Value>, v: &mut Violations) -> Option<Vec<String>> {
    let arr = match raw {
        None | Some(Value::Null) => return None,
        Some(Value::Array(arr)) => arr,
        Some(_) => {
            v.push("tags", "must be an array of strings");
            return None;
        }
    };
    let mut tags = Vec::with_capacity(arr.len());
    for el in arr {
        match el.as_str() {
            Some(s) => tags.push(s.to_string()),
            None => {
                v.push("tags", "must be an array of strings");
                return None;
            }
        }
    }
    Some(tags)
}

fn optional_timestamp(
    raw: Option<&Value>,
    field: &str,
    v: &mut Violations,
) -> Option<DateTime<Utc>> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match s.parse::<DateTime<Utc>>() {
            Ok(ts) => Some(ts),
            Err(_) => {
                v.push(field, "must be an ISO-8601 timestamp");
                None
            }
        },
        Some(_) => {
            v.push(field, "must be an ISO-8601 timestamp");
            None
        }
    }
}

fn optional_non_negative(raw: Option<&Value>, field: &str, v: &mut Violations) -> Option<f64> {
    match raw {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_f64() {
            Some(n) if n >= 0.0 => Some(n),
            _ => {
                v.push(field, "must be a number >= 0");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_item_json() -> Value {
        json!({
            "id": "7f2c1b8e-4a3d-4e6f-9b0a-1c2d3e4f5a6b",
            "name": "Milk",
            "quantity": 2,
            "location": "Fridge",
            "category": "Dairy",
            "tags": ["breakfast", "perishable"],
            "dateAdded": "2026-01-01T08:00:00Z",
            "dateUpdated": "2026-01-02T08:00:00Z",
            "lowStockThreshold": 1,
            "value": 3.49
        })
    }

    #[test]
    fn accepts_complete_item() {
        let item = validate_item(&valid_item_json()).unwrap();
        assert_eq!(item.name, "Milk");
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.tags.as_ref().map(Vec::len), Some(2));
        assert_eq!(item.low_stock_threshold, Some(1.0));
    }

    #[test]
    fn strips_unrecognized_fields() {
        let mut raw = valid_item_json();
        raw["shoppingListed"] = json!(true);
        raw["barcode"] = json!("0123456789");
        let item = validate_item(&raw).unwrap();
        let round = serde_json::to_value(&item).unwrap();
        assert!(round.get("shoppingListed").is_none());
        assert!(round.get("barcode").is_none());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let raw = json!({
            "id": "7f2c1b8e-4a3d-4e6f-9b0a-1c2d3e4f5a6b",
            "name": "Flour",
            "quantity": 1,
            "location": "Pantry"
        });
        let item = validate_item(&raw).unwrap();
        assert!(item.category.is_none());
        assert!(item.tags.is_none());
        assert!(item.low_stock_threshold.is_none());
        assert!(item.value.is_none());
        // Missing timestamps default to now, and both are set together.
        assert_eq!(item.date_added, item.date_updated);
    }

    #[test]
    fn rejects_and_enumerates_every_violation() {
        let raw = json!({
            "name": "",
            "quantity": -1,
            "location": ""
        });
        let err = validate_item(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["id", "name", "quantity", "location"]);
    }

    #[test]
    fn rejects_non_uuid_id() {
        let mut raw = valid_item_json();
        raw["id"] = json!("item-1");
        let err = validate_item(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["id"]);
    }

    #[test]
    fn rejects_wrongly_typed_optionals() {
        let mut raw = valid_item_json();
        raw["category"] = json!(12);
        raw["tags"] = json!(["ok", 3]);
        raw["dateAdded"] = json!("yesterday");
        let err = validate_item(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["category", "tags", "dateAdded"]);
    }

    #[test]
    fn rejects_non_object_item() {
        assert!(validate_item(&json!(null)).is_err());
        assert!(validate_item(&json!([1, 2])).is_err());
        assert!(validate_item(&json!("milk")).is_err());
    }

    #[test]
    fn validation_is_idempotent() {
        let first = validate_item(&valid_item_json()).unwrap();
        let second = validate_item(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn accepts_envelope_with_items() {
        let raw = json!({
            "schemaVersion": 1,
            "revision": 4,
            "items": [valid_item_json()]
        });
        let env = validate_envelope(&raw).unwrap();
        assert_eq!(env.schema_version, 1);
        assert_eq!(env.revision, 4);
        assert_eq!(env.items.len(), 1);
    }

    #[test]
    fn rejects_bad_envelope_wrapper() {
        let raw = json!({
            "schemaVersion": 0,
            "revision": -3,
            "items": "nope"
        });
        let err = validate_envelope(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["schemaVersion", "revision", "items"]);
    }

    #[test]
    fn envelope_item_violations_are_prefixed() {
        let raw = json!({
            "schemaVersion": 1,
            "revision": 0,
            "items": [valid_item_json(), {"name": "Eggs"}]
        });
        let err = validate_envelope(&raw).unwrap_err();
        let fields = err.fields();
        assert!(fields.contains(&"items[1].id"));
        assert!(fields.contains(&"items[1].quantity"));
        assert!(fields.contains(&"items[1].location"));
    }

    #[test]
    fn rejects_fractional_revision() {
        let raw = json!({
            "schemaVersion": 1,
            "revision": 1.5,
            "items": []
        });
        let err = validate_envelope(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["revision"]);
    }
}
