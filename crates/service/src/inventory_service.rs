//! Inventory service facade and the two-step creation protocol.

use std::sync::Arc;

use tracing::warn;

use stockbook_catalog::{DictionaryKind, NewProduct, Product};
use stockbook_core::{InventoryError, InventoryResult, ProductId};
use stockbook_infra::RowStore;
use stockbook_ledger::{DraftMovement, MovementReason, MovementType};

use crate::dictionary_store::DictionaryStore;
use crate::movement_ledger::MovementLedger;
use crate::op_status::OpStatus;
use crate::product_catalog::ProductCatalog;

/// Facade over the dictionaries, catalog and ledger, all sharing one row
/// store and one per-operation status registry.
pub struct InventoryService<S> {
    dictionaries: DictionaryStore<S>,
    catalog: ProductCatalog<S>,
    ledger: MovementLedger<S>,
    status: Arc<OpStatus>,
}

impl<S: RowStore + Clone> InventoryService<S> {
    pub fn new(store: S) -> Self {
        let status = Arc::new(OpStatus::new());
        Self {
            dictionaries: DictionaryStore::new(store.clone(), Arc::clone(&status)),
            catalog: ProductCatalog::new(store.clone(), Arc::clone(&status)),
            ledger: MovementLedger::new(store, Arc::clone(&status)),
            status,
        }
    }

    pub fn dictionaries(&self) -> &DictionaryStore<S> {
        &self.dictionaries
    }

    pub fn catalog(&self) -> &ProductCatalog<S> {
        &self.catalog
    }

    pub fn ledger(&self) -> &MovementLedger<S> {
        &self.ledger
    }

    pub fn status(&self) -> &OpStatus {
        &self.status
    }

    /// Create a product and, when it starts with stock, its founding ledger
    /// entry, as one logical unit.
    ///
    /// The store offers no multi-collection transaction, so this is an
    /// explicit two-step sequence:
    ///
    /// 1. validate input — a failure here or in the dictionary lookups is
    ///    terminal with zero writes;
    /// 2. persist the product with `quantity = initial_quantity` — a failure
    ///    here is terminal, the ledger is never reached;
    /// 3. if `initial_quantity > 0`, append one `Add`/`Restock` movement
    ///    mirroring the product snapshot — a failure here leaves the product
    ///    row without its founding entry and is surfaced as
    ///    [`InventoryError::PartialFailure`] carrying the created id.
    ///
    /// None of the steps is retried automatically; `reconcile` detects the
    /// partial-failure gap until an operator repairs it.
    pub async fn create_product_with_initial_stock(
        &self,
        input: NewProduct,
    ) -> InventoryResult<Product> {
        input.validate()?;

        // Denormalization point: capture display names for the ledger
        // snapshot before any write. Unknown references fail here.
        let category = self
            .dictionaries
            .entry_name(DictionaryKind::Category, input.category)
            .await?;
        let packaging = self
            .dictionaries
            .entry_name(DictionaryKind::UnitOfMeasure, input.packaging)
            .await?;

        let product = self.catalog.create(input).await?;

        if product.quantity > 0 {
            let draft = DraftMovement {
                product_id: product.id,
                product_name: product.name.clone(),
                product_category: category,
                product_packaging: packaging,
                kind: MovementType::Add,
                reason: MovementReason::Restock,
                quantity: product.quantity,
                is_display: true,
            };

            if let Err(err) = self.ledger.append(draft).await {
                warn!(
                    product_id = %product.id,
                    error = %err,
                    "movement append failed after product creation"
                );
                return Err(InventoryError::partial_failure(product.id, err.to_string()));
            }
        }

        Ok(product)
    }

    /// Recompute a product's quantity from its ledger rows.
    pub async fn reconcile(&self, product_id: ProductId) -> InventoryResult<i64> {
        self.ledger.reconcile(product_id).await
    }
}
