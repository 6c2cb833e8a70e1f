use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{InventoryError, InventoryResult, MovementId, ProductId};

/// Direction of a stock movement.
///
/// Closed enumeration: extend only by adding new tags, never by overloading
/// an existing one. The sign of a movement is implied by this tag; the
/// stored quantity is always a positive magnitude.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    Add,
    Remove,
}

impl MovementType {
    /// Apply this direction to a magnitude.
    pub fn signed(self, magnitude: i64) -> i64 {
        match self {
            MovementType::Add => magnitude,
            MovementType::Remove => -magnitude,
        }
    }
}

/// Why a movement happened.
///
/// Only `Restock` is written by the product creation path today; the other
/// tags exist for corrective and sales flows. New reasons are new variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementReason {
    Restock,
    Sale,
    Adjustment,
    Spoilage,
}

/// One row of the movement ledger.
///
/// Rows are append-only: never updated, never deleted. Corrections are made
/// by appending an offsetting movement, preserving full audit history. The
/// `product_*` fields are a denormalized snapshot taken when the movement was
/// recorded, so historical rows stay meaningful even if the product or the
/// dictionaries later change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_category: String,
    pub product_packaging: String,
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub reason: MovementReason,
    /// Strictly positive magnitude; direction comes from `kind`.
    pub quantity: i64,
    /// Whether user-facing history views show this row.
    pub is_display: bool,
    pub occurred_at: DateTime<Utc>,
}

/// A movement that has not been appended yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftMovement {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_category: String,
    pub product_packaging: String,
    pub kind: MovementType,
    pub reason: MovementReason,
    pub quantity: i64,
    pub is_display: bool,
}

impl DraftMovement {
    /// Reject zero or negative magnitudes.
    ///
    /// A removal of 3 units is `{kind: Remove, quantity: 3}`, never a signed
    /// `-3`.
    pub fn validate(&self) -> InventoryResult<()> {
        if self.quantity <= 0 {
            return Err(InventoryError::validation(
                "quantity",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn into_movement(self, id: MovementId, occurred_at: DateTime<Utc>) -> Movement {
        Movement {
            id,
            product_id: self.product_id,
            product_name: self.product_name,
            product_category: self.product_category,
            product_packaging: self.product_packaging,
            kind: self.kind,
            reason: self.reason,
            quantity: self.quantity,
            is_display: self.is_display,
            occurred_at,
        }
    }
}

/// Replay movements in the given (insertion) order and return the running
/// quantity: increments for `Add`, decrements for `Remove`.
///
/// This is the reconciliation primitive: for a consistent product,
/// `replay(all movements of the product) == product.quantity`.
pub fn replay<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> i64 {
    movements
        .into_iter()
        .fold(0, |total, m| total + m.kind.signed(m.quantity))
}
