//! Best-effort migration of previously-persisted data.
//!
//! Whatever was stored under the inventory key — a current envelope, the
//! legacy bare-array format, or garbage — [`migrate`] turns it into a valid
//! [`Envelope`]. It never fails; unrecoverable input degrades to the empty
//! envelope, and invalid legacy records are dropped with a warning rather
//! than corrected.

use crate::envelope::{Envelope, SCHEMA_VERSION};
use crate::validate::{validate_envelope, validate_item};
use serde_json::Value;

/// Convert raw persisted data into a valid [`Envelope`].
///
/// Rules, in order:
/// 1. Input with the envelope shape (`schemaVersion`, `revision`, `items`
///    all present) is run through [`validate_envelope`]; a failure is
///    logged and falls through to the next rule.
/// 2. A bare JSON array (the legacy un-wrapped format) is treated as a list
///    of candidate items; each element is validated independently and
///    invalid elements are skipped with a warning. Survivors are wrapped in
///    a fresh envelope with `revision = 0`.
/// 3. Anything else (no stored value, parse failure, unrecognized shape)
///    yields [`Envelope::empty`].
pub fn migrate(raw: Option<&str>) -> Envelope {
    let raw = match raw {
        Some(raw) => raw,
        None => return Envelope::empty(),
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "stored inventory is not valid JSON, starting fresh");
            return Envelope::empty();
        }
    };

    if has_envelope_shape(&value) {
        match validate_envelope(&value) {
            Ok(envelope) => return envelope,
            Err(err) => {
                tracing::warn!(error = %err, "stored envelope failed validation");
            }
        }
    }

    if let Some(raw_items) = value.as_array() {
        let mut items = Vec::with_capacity(raw_items.len());
        for (idx, raw_item) in raw_items.iter().enumerate() {
            match validate_item(raw_item) {
                Ok(item) => items.push(item),
                Err(err) => {
                    tracing::warn!(index = idx, error = %err, "dropping invalid legacy item");
                }
            }
        }
        return Envelope {
            schema_version: SCHEMA_VERSION,
            revision: 0,
            items,
        };
    }

    tracing::warn!("stored inventory has an unrecognized shape, starting fresh");
    Envelope::empty()
}

fn has_envelope_shape(value: &Value) -> bool {
    value.get("schemaVersion").is_some()
        && value.get("revision").is_some()
        && value.get("items").is_some()
}
