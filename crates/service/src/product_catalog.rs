//! Product catalog service: reads plus the non-ledger mutations.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use stockbook_catalog::{NewProduct, Product, validate_low_stock_level};
use stockbook_core::{InventoryError, InventoryResult, ProductId};
use stockbook_infra::{Filter, Order, RowStore, Selection, collections};

use crate::codec::{decode, decode_rows, encode, to_transport};
use crate::op_status::{OpStatus, error_message, ops};

/// Product catalog over the `Products` collection.
///
/// Writes `quantity` only on the creation path; all later quantity changes
/// belong to the movement ledger. That split is enforced by convention here
/// (this service simply has no quantity mutation), not by a store constraint.
pub struct ProductCatalog<S> {
    store: S,
    status: Arc<OpStatus>,
}

impl<S: RowStore> ProductCatalog<S> {
    pub(crate) fn new(store: S, status: Arc<OpStatus>) -> Self {
        Self { store, status }
    }

    /// Validate and persist a product.
    ///
    /// Validation runs before the insert, so a rejected input performs zero
    /// writes. The returned product carries the assigned id and timestamp.
    pub async fn create(&self, input: NewProduct) -> InventoryResult<Product> {
        self.status.begin(ops::PRODUCT_CREATE);
        let result = self.create_inner(input).await;
        self.status.complete(ops::PRODUCT_CREATE, error_message(&result));
        result
    }

    async fn create_inner(&self, input: NewProduct) -> InventoryResult<Product> {
        input.validate()?;

        let product = input.into_product(ProductId::new(), Utc::now());
        self.store
            .insert(collections::PRODUCTS, encode(&product)?)
            .await
            .map_err(to_transport)?;

        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: ProductId) -> InventoryResult<Option<Product>> {
        let rows = self
            .store
            .select(
                collections::PRODUCTS,
                Selection::all().filter(Filter::eq("id", id.to_string())),
            )
            .await
            .map_err(to_transport)?;

        rows.into_iter().next().map(decode).transpose()
    }

    /// All products, alphabetically by name.
    pub async fn list(&self) -> InventoryResult<Vec<Product>> {
        let rows = self
            .store
            .select(collections::PRODUCTS, Selection::all().order(Order::asc("name")))
            .await
            .map_err(to_transport)?;
        decode_rows(rows)
    }

    /// Products at or below their low-stock threshold, for alerting views.
    pub async fn list_low_stock(&self) -> InventoryResult<Vec<Product>> {
        let mut products = self.list().await?;
        products.retain(Product::is_low_stock);
        Ok(products)
    }

    /// Update only the low-stock threshold; quantity is untouched.
    pub async fn set_low_stock_level(&self, id: ProductId, level: i64) -> InventoryResult<()> {
        self.status.begin(ops::PRODUCT_SET_LOW_STOCK_LEVEL);
        let result = self.set_low_stock_level_inner(id, level).await;
        self.status
            .complete(ops::PRODUCT_SET_LOW_STOCK_LEVEL, error_message(&result));
        result
    }

    async fn set_low_stock_level_inner(&self, id: ProductId, level: i64) -> InventoryResult<()> {
        validate_low_stock_level(level)?;

        let affected = self
            .store
            .update(
                collections::PRODUCTS,
                json!({ "low_stock_level": level }),
                &[Filter::eq("id", id.to_string())],
            )
            .await
            .map_err(to_transport)?;

        if affected == 0 {
            return Err(InventoryError::not_found(format!("product {id}")));
        }

        info!(product_id = %id, level, "low stock threshold updated");
        Ok(())
    }
}
