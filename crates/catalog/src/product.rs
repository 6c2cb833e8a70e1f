use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{EntryId, InventoryError, InventoryResult, ProductId};

/// A catalog product.
///
/// `quantity` is a derived field: it must equal the replay of all movement
/// ledger rows for this product. It is written once at creation time (equal
/// to the initial stock movement) and never mutated directly afterwards;
/// `low_stock_level` is the only other field that changes after creation.
///
/// `category` and `packaging` hold dictionary entry **identifiers**. Display
/// names are denormalized onto ledger rows at movement time, nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: EntryId,
    pub packaging: EntryId,
    pub quantity: i64,
    /// Selling price in smallest currency unit (e.g., cents).
    pub price: i64,
    /// Advisory threshold; `quantity <= low_stock_level` means low stock.
    pub low_stock_level: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product is at or below its low-stock threshold.
    ///
    /// Products without a threshold are never considered low. No automatic
    /// action follows from this; it only drives alerting reads.
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_level.is_some_and(|level| self.quantity <= level)
    }
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: EntryId,
    pub packaging: EntryId,
    pub initial_quantity: i64,
    /// Selling price in smallest currency unit (e.g., cents).
    pub selling_price: i64,
}

impl NewProduct {
    /// Check fields in declared order; the first violated rule wins.
    ///
    /// Runs before any persistence, so a failure here guarantees zero writes.
    pub fn validate(&self) -> InventoryResult<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        if self.initial_quantity < 0 {
            return Err(InventoryError::validation(
                "initial_quantity",
                "must be zero or greater",
            ));
        }
        if self.selling_price < 0 {
            return Err(InventoryError::validation(
                "selling_price",
                "must be zero or greater",
            ));
        }
        Ok(())
    }

    /// Build the persisted product, with trimmed text and the assigned
    /// identity fields. `quantity` starts equal to the initial movement.
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            packaging: self.packaging,
            quantity: self.initial_quantity,
            price: self.selling_price,
            low_stock_level: None,
            created_at,
        }
    }
}

/// Validate a low-stock threshold value.
pub fn validate_low_stock_level(level: i64) -> InventoryResult<()> {
    if level < 0 {
        return Err(InventoryError::validation(
            "low_stock_level",
            "must be zero or greater",
        ));
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> InventoryResult<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::validation(field, "cannot be empty"));
    }
    Ok(())
}
