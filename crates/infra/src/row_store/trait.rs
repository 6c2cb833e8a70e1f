use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;

/// Collection names used by the inventory service.
pub mod collections {
    pub const PRODUCTS: &str = "Products";
    pub const CATEGORIES: &str = "Categories";
    pub const UNIT_OF_MEASURE: &str = "UnitOfMeasure";
    pub const INVENTORY_MOVEMENT_LINE: &str = "InventoryMovementLine";
}

/// Equality match on one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: JsonValue,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Sort specification for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

/// Row window for a select (0-based offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub offset: usize,
    pub limit: usize,
}

/// Full select specification: column projection, equality filters, sort
/// order, row window. Default selects everything in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// `None` means all columns.
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub range: Option<Range>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Row store operation error.
///
/// Infrastructure failures only (transport, malformed payloads); domain
/// outcomes like "nothing matched" are reported through affected-row counts.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(String),

    #[error("malformed row: {0}")]
    MalformedRow(String),
}

/// Asynchronous row store over named collections of JSON rows.
///
/// ## Semantics
///
/// - `select` returns matching rows; filters are conjunctive equality
///   matches; rows come back in insertion order unless an `Order` is given.
/// - `insert` persists one row and echoes the stored row back.
/// - `update` merges the object `patch` into every matching row and returns
///   the number of rows affected; zero is a valid outcome, not an error.
/// - `delete` removes matching rows and returns the number removed.
///
/// Once a mutating call has been issued its outcome is authoritative; callers
/// must not retry automatically (a retried insert would double-apply).
#[async_trait]
pub trait RowStore: Send + Sync {
    async fn select(
        &self,
        collection: &str,
        selection: Selection,
    ) -> Result<Vec<JsonValue>, StoreError>;

    async fn insert(&self, collection: &str, row: JsonValue) -> Result<JsonValue, StoreError>;

    async fn update(
        &self,
        collection: &str,
        patch: JsonValue,
        filters: &[Filter],
    ) -> Result<u64, StoreError>;

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64, StoreError>;
}

#[async_trait]
impl<S> RowStore for Arc<S>
where
    S: RowStore + ?Sized,
{
    async fn select(
        &self,
        collection: &str,
        selection: Selection,
    ) -> Result<Vec<JsonValue>, StoreError> {
        (**self).select(collection, selection).await
    }

    async fn insert(&self, collection: &str, row: JsonValue) -> Result<JsonValue, StoreError> {
        (**self).insert(collection, row).await
    }

    async fn update(
        &self,
        collection: &str,
        patch: JsonValue,
        filters: &[Filter],
    ) -> Result<u64, StoreError> {
        (**self).update(collection, patch, filters).await
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64, StoreError> {
        (**self).delete(collection, filters).await
    }
}
