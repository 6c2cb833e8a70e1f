//! Movement ledger service over the `InventoryMovementLine` collection.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use stockbook_core::{InventoryResult, MovementId, ProductId};
use stockbook_infra::{Filter, RowStore, Selection, collections};
use stockbook_ledger::{DraftMovement, Movement, replay};

use crate::codec::{decode_rows, encode, to_transport};
use crate::op_status::{OpStatus, error_message, ops};

/// Append-only ledger of stock movements.
///
/// Append is the only mutation; there is no update or delete here by design.
/// Corrections are offsetting appends, which keeps the audit history whole.
pub struct MovementLedger<S> {
    store: S,
    status: Arc<OpStatus>,
}

impl<S: RowStore> MovementLedger<S> {
    pub(crate) fn new(store: S, status: Arc<OpStatus>) -> Self {
        Self { store, status }
    }

    pub async fn append(&self, draft: DraftMovement) -> InventoryResult<Movement> {
        self.status.begin(ops::MOVEMENT_APPEND);
        let result = self.append_inner(draft).await;
        self.status.complete(ops::MOVEMENT_APPEND, error_message(&result));
        result
    }

    async fn append_inner(&self, draft: DraftMovement) -> InventoryResult<Movement> {
        draft.validate()?;

        let movement = draft.into_movement(MovementId::new(), Utc::now());
        self.store
            .insert(collections::INVENTORY_MOVEMENT_LINE, encode(&movement)?)
            .await
            .map_err(to_transport)?;

        info!(
            product_id = %movement.product_id,
            quantity = movement.quantity,
            "movement appended"
        );
        Ok(movement)
    }

    /// All movements for one product, in insertion order.
    pub async fn list_for_product(&self, product_id: ProductId) -> InventoryResult<Vec<Movement>> {
        let rows = self
            .store
            .select(
                collections::INVENTORY_MOVEMENT_LINE,
                Selection::all().filter(Filter::eq("product_id", product_id.to_string())),
            )
            .await
            .map_err(to_transport)?;
        decode_rows(rows)
    }

    /// User-facing history: displayed movements only, newest first.
    pub async fn history(&self, product_id: ProductId) -> InventoryResult<Vec<Movement>> {
        let mut movements = self.list_for_product(product_id).await?;
        movements.retain(|m| m.is_display);
        movements.reverse();
        Ok(movements)
    }

    /// Replay all movements for a product and return the computed quantity.
    ///
    /// This is the audit operation backing the catalog invariant: for a
    /// consistent product it equals the cached `quantity` field. It reads the
    /// ledger only, so repeated calls with no intervening append return the
    /// same value.
    pub async fn reconcile(&self, product_id: ProductId) -> InventoryResult<i64> {
        let movements = self.list_for_product(product_id).await?;
        Ok(replay(&movements))
    }
}
