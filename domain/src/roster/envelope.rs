//! Envelope normalization.
//!
//! Backend list endpoints disagree on how they wrap collections: some return
//! the array bare, some under `data`, some under `data.data`, some under
//! `items`. Every response passes through here before records are read.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The closed set of wrapping shapes a list endpoint responds with.
///
/// Anything else falls into [`Envelope::Other`] and normalizes to an empty
/// collection. Unwrapping never fails and preserves record order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// A bare JSON array of records.
    Records(Vec<Value>),
    /// `{"data": ...}`, possibly nested (`{"data": {"data": [...]}}`).
    Data { data: Box<Envelope> },
    /// `{"items": [...]}`.
    Items { items: Vec<Value> },
    /// Null, or a shape carrying no collection.
    Other(Value),
}

impl Envelope {
    pub fn from_value(value: Value) -> Self {
        // the Other variant absorbs every unmatched shape
        serde_json::from_value(value).unwrap_or(Envelope::Other(Value::Null))
    }

    /// The innermost record sequence, in the order the backend sent it.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            Envelope::Records(records) => records,
            Envelope::Data { data } => data.into_records(),
            Envelope::Items { items } => items,
            Envelope::Other(_) => Vec::new(),
        }
    }
}

/// Normalize a response envelope into typed records.
///
/// Records that fail to deserialize (e.g. missing an id) are skipped rather
/// than failing the collection.
pub fn unwrap_collection<T: DeserializeOwned>(value: Value) -> Vec<T> {
    Envelope::from_value(value)
        .into_records()
        .into_iter()
        .filter_map(|record| serde_json::from_value(record).ok())
        .collect()
}

/// Peel a single non-null `data` wrapper, the `res.data ?? res` read the
/// dashboard applies before selecting a named collection.
pub fn strip_data_wrapper(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    match map.remove("data") {
        Some(inner) if !inner.is_null() => inner,
        removed => {
            if let Some(data) = removed {
                map.insert("data".to_string(), data);
            }
            Value::Object(map)
        }
    }
}
