//! Stored cart layout and migrations.
//!
//! Version 1 is `{"version":1,"items":[...]}`. The unversioned layout is a
//! bare array of the same item objects and is read as version 0. Version 0
//! prices are whole currency units and are scaled to minor units on read.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::{LineItem, MAX_QUANTITY_PER_ITEM, MAX_UNIT_PRICE};
use crate::error::RestoreError;
use crate::money::{Currency, Money};

/// Newest payload version this crate writes and reads.
pub const PAYLOAD_VERSION: u32 = 1;

/// Payload written to storage.
#[derive(Debug, Serialize)]
pub(crate) struct PayloadRef<'a> {
    pub version: u32,
    pub items: &'a [LineItem],
}

impl<'a> PayloadRef<'a> {
    pub fn new(items: &'a [LineItem]) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    items: Vec<LineItem>,
}

/// Decoded and sanitised payload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Restored {
    pub items: Vec<LineItem>,
    pub version: u32,
    pub dropped: usize,
}

/// Decode a stored payload of any supported version.
pub(crate) fn decode(raw: &str, currency: Currency) -> Result<Restored, RestoreError> {
    let value: Value = serde_json::from_str(raw)?;

    let (version, items, overflowed) = match value {
        Value::Array(_) => {
            let (items, overflowed) =
                migrate_legacy(serde_json::from_value::<Vec<LineItem>>(value)?, currency);
            (0, items, overflowed)
        }
        Value::Object(ref map) => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| corrupt("missing or invalid version field"))?;
            if version > PAYLOAD_VERSION {
                return Err(RestoreError::UnsupportedVersion {
                    found: version,
                    supported: PAYLOAD_VERSION,
                });
            }
            (version, serde_json::from_value::<Payload>(value)?.items, 0)
        }
        _ => return Err(corrupt("expected an array or object")),
    };

    let (items, dropped) = sanitize(items);
    Ok(Restored {
        items,
        version,
        dropped: dropped + overflowed,
    })
}

/// Scale whole-unit prices to minor units, dropping entries that overflow.
fn migrate_legacy(items: Vec<LineItem>, currency: Currency) -> (Vec<LineItem>, usize) {
    let total = items.len();
    let migrated: Vec<LineItem> = items
        .into_iter()
        .filter_map(|mut item| {
            let money = Money::from_major(item.unit_price, currency)?;
            item.unit_price = money.amount_minor;
            Some(item)
        })
        .collect();

    let overflowed = total - migrated.len();
    (migrated, overflowed)
}

fn corrupt(msg: &str) -> RestoreError {
    RestoreError::Corrupt(<serde_json::Error as serde::de::Error>::custom(msg))
}

/// Enforce store invariants on restored items.
///
/// Drops entries with blank ids, zero quantity, oversized prices or a
/// repeated id (first occurrence wins). Quantities above the limit are
/// clamped.
fn sanitize(items: Vec<LineItem>) -> (Vec<LineItem>, usize) {
    let total = items.len();
    let mut seen = HashSet::new();

    let kept: Vec<LineItem> = items
        .into_iter()
        .filter(|item| {
            !item.id.is_blank()
                && item.quantity > 0
                && item.unit_price <= MAX_UNIT_PRICE as u64
                && seen.insert(item.id.clone())
        })
        .map(|mut item| {
            item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
            item
        })
        .collect();

    let dropped = total - kept.len();
    (kept, dropped)
}
