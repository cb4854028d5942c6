//! JSON rendering of stored documents for API clients.
//!
//! Documents keep `ObjectId`s in storage, but clients receive them as plain
//! 24-char hex strings and dates as RFC 3339 strings. Everything else follows
//! relaxed extended JSON, so numbers stay numbers.

use bson::Bson;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Convert a BSON value into client JSON.
pub fn client_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, client_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(client_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Serialize a model through BSON and render it as client JSON.
pub fn to_client_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    bson::to_bson(value)
        .map(client_json)
        .map_err(|e| AppError::Internal(format!("Failed to encode response: {e}")))
}
