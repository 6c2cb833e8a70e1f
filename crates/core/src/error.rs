//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the inventory domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory error taxonomy.
///
/// Every variant renders as a message fit for direct display to a user;
/// collaborator payloads are never surfaced raw.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Input failed validation before any store call was made.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A dictionary entry with the same name already exists.
    #[error("an entry named \"{0}\" already exists")]
    Duplicate(String),

    /// The targeted record does not exist in the persisted store.
    #[error("{0} not found")]
    NotFound(String),

    /// The product row was persisted but its stock movement was not.
    ///
    /// Carries the created product id so the caller can retry the ledger
    /// step or flag the record for manual reconciliation.
    #[error("product {product_id} was created, but recording its stock movement failed: {message}")]
    PartialFailure { product_id: ProductId, message: String },

    /// The backing store was unreachable or errored; no local side effect.
    #[error("inventory store request failed: {0}")]
    Transport(String),
}

impl InventoryError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::Duplicate(name.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn partial_failure(product_id: ProductId, message: impl Into<String>) -> Self {
        Self::PartialFailure {
            product_id,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// The created product id, when this error is a partial failure.
    pub fn created_product_id(&self) -> Option<ProductId> {
        match self {
            Self::PartialFailure { product_id, .. } => Some(*product_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_exposes_created_product_id() {
        let id = ProductId::new();
        let err = InventoryError::partial_failure(id, "insert failed");
        assert_eq!(err.created_product_id(), Some(id));

        let other = InventoryError::not_found("product");
        assert_eq!(other.created_product_id(), None);
    }

    #[test]
    fn messages_are_displayable() {
        let err = InventoryError::validation("name", "cannot be empty");
        assert_eq!(err.to_string(), "invalid name: cannot be empty");

        let err = InventoryError::duplicate("500ml");
        assert_eq!(err.to_string(), "an entry named \"500ml\" already exists");
    }
}
