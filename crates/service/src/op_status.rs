//! Per-operation status registry.
//!
//! Every mutating operation exposes an in-flight indicator and a last-error
//! slot the presentation layer can poll. Errors are the display-ready
//! `InventoryError` messages, never raw collaborator payloads.

use std::collections::HashMap;
use std::sync::Mutex;

use stockbook_core::InventoryResult;

/// Names of the tracked mutating operations.
pub mod ops {
    pub const DICTIONARY_ADD: &str = "dictionary.add";
    pub const DICTIONARY_REMOVE: &str = "dictionary.remove";
    pub const PRODUCT_CREATE: &str = "product.create";
    pub const PRODUCT_SET_LOW_STOCK_LEVEL: &str = "product.set_low_stock_level";
    pub const MOVEMENT_APPEND: &str = "movement.append";
}

/// Snapshot of one operation's status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpState {
    pub in_flight: bool,
    pub last_error: Option<String>,
}

/// Registry of per-operation states, shared by the services of one
/// [`crate::InventoryService`] instance.
#[derive(Debug, Default)]
pub struct OpStatus {
    inner: Mutex<HashMap<&'static str, OpState>>,
}

impl OpStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, op: &'static str) {
        if let Ok(mut map) = self.inner.lock() {
            map.entry(op).or_default().in_flight = true;
        }
    }

    /// Record completion. A success clears the last-error slot; a failure
    /// replaces it.
    pub fn complete(&self, op: &'static str, error: Option<String>) {
        if let Ok(mut map) = self.inner.lock() {
            let state = map.entry(op).or_default();
            state.in_flight = false;
            state.last_error = error;
        }
    }

    pub fn get(&self, op: &'static str) -> OpState {
        self.inner
            .lock()
            .ok()
            .and_then(|map| map.get(op).cloned())
            .unwrap_or_default()
    }
}

pub(crate) fn error_message<T>(result: &InventoryResult<T>) -> Option<String> {
    result.as_ref().err().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_complete_track_state() {
        let status = OpStatus::new();
        assert_eq!(status.get(ops::PRODUCT_CREATE), OpState::default());

        status.begin(ops::PRODUCT_CREATE);
        assert!(status.get(ops::PRODUCT_CREATE).in_flight);

        status.complete(ops::PRODUCT_CREATE, Some("boom".to_string()));
        let state = status.get(ops::PRODUCT_CREATE);
        assert!(!state.in_flight);
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        // Next success clears the slot.
        status.begin(ops::PRODUCT_CREATE);
        status.complete(ops::PRODUCT_CREATE, None);
        assert_eq!(status.get(ops::PRODUCT_CREATE).last_error, None);
    }
}
