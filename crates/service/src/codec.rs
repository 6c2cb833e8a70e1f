//! Row (de)serialization at the store boundary.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use stockbook_core::{InventoryError, InventoryResult};
use stockbook_infra::StoreError;

pub(crate) fn to_transport(err: StoreError) -> InventoryError {
    InventoryError::transport(err.to_string())
}

pub(crate) fn encode<T: Serialize>(value: &T) -> InventoryResult<JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| InventoryError::transport(format!("could not encode row: {e}")))
}

pub(crate) fn decode<T: DeserializeOwned>(row: JsonValue) -> InventoryResult<T> {
    serde_json::from_value(row)
        .map_err(|e| InventoryError::transport(format!("could not decode row: {e}")))
}

pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<JsonValue>) -> InventoryResult<Vec<T>> {
    rows.into_iter().map(decode).collect()
}
