use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

use super::r#trait::{Direction, Filter, RowStore, Selection, StoreError};

/// In-memory row store.
///
/// Intended for tests/dev. Preserves per-collection insertion order, which is
/// the order the ledger relies on for replay. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    collections: RwLock<HashMap<String, Vec<JsonValue>>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(row: &JsonValue, filters: &[Filter]) -> bool {
        filters
            .iter()
            .all(|f| row.get(f.column.as_str()) == Some(&f.value))
    }

    fn compare(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => match (a, b) {
                (JsonValue::Number(x), JsonValue::Number(y)) => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
                (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
                (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
                _ => a.to_string().cmp(&b.to_string()),
            },
        }
    }

    fn project(row: &JsonValue, columns: &[String]) -> JsonValue {
        let mut out = Map::new();
        for column in columns {
            if let Some(value) = row.get(column.as_str()) {
                out.insert(column.clone(), value.clone());
            }
        }
        JsonValue::Object(out)
    }
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn select(
        &self,
        collection: &str,
        selection: Selection,
    ) -> Result<Vec<JsonValue>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::Transport("lock poisoned".to_string()))?;

        let mut rows: Vec<JsonValue> = collections
            .get(collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| Self::matches(row, &selection.filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &selection.order {
            rows.sort_by(|a, b| {
                let ord = Self::compare(a.get(order.column.as_str()), b.get(order.column.as_str()));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        if let Some(range) = selection.range {
            rows = rows
                .into_iter()
                .skip(range.offset)
                .take(range.limit)
                .collect();
        }

        if let Some(columns) = &selection.columns {
            rows = rows.iter().map(|row| Self::project(row, columns)).collect();
        }

        Ok(rows)
    }

    async fn insert(&self, collection: &str, row: JsonValue) -> Result<JsonValue, StoreError> {
        if !row.is_object() {
            return Err(StoreError::MalformedRow("row must be an object".to_string()));
        }

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Transport("lock poisoned".to_string()))?;

        collections
            .entry(collection.to_string())
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn update(
        &self,
        collection: &str,
        patch: JsonValue,
        filters: &[Filter],
    ) -> Result<u64, StoreError> {
        let patch = patch
            .as_object()
            .ok_or_else(|| StoreError::MalformedRow("patch must be an object".to_string()))?;

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Transport("lock poisoned".to_string()))?;

        let mut affected = 0u64;
        if let Some(rows) = collections.get_mut(collection) {
            for row in rows.iter_mut() {
                if !Self::matches(row, filters) {
                    continue;
                }
                if let Some(fields) = row.as_object_mut() {
                    for (key, value) in patch {
                        fields.insert(key.clone(), value.clone());
                    }
                    affected += 1;
                }
            }
        }

        Ok(affected)
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Transport("lock poisoned".to_string()))?;

        let Some(rows) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = rows.len();
        rows.retain(|row| !Self::matches(row, filters));
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::super::r#trait::{Order, Range};
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn select_preserves_insertion_order_by_default() {
        let store = InMemoryRowStore::new();
        store.insert("Rows", json!({"n": 3})).await.unwrap();
        store.insert("Rows", json!({"n": 1})).await.unwrap();
        store.insert("Rows", json!({"n": 2})).await.unwrap();

        let rows = store.select("Rows", Selection::all()).await.unwrap();
        let ns: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn filters_are_conjunctive() {
        let store = InMemoryRowStore::new();
        store
            .insert("Rows", json!({"kind": "a", "live": true}))
            .await
            .unwrap();
        store
            .insert("Rows", json!({"kind": "a", "live": false}))
            .await
            .unwrap();
        store
            .insert("Rows", json!({"kind": "b", "live": true}))
            .await
            .unwrap();

        let rows = store
            .select(
                "Rows",
                Selection::all()
                    .filter(Filter::eq("kind", "a"))
                    .filter(Filter::eq("live", true)),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn order_range_and_projection() {
        let store = InMemoryRowStore::new();
        for (name, n) in [("b", 2), ("c", 3), ("a", 1)] {
            store
                .insert("Rows", json!({"name": name, "n": n}))
                .await
                .unwrap();
        }

        let rows = store
            .select(
                "Rows",
                Selection::all()
                    .order(Order::asc("name"))
                    .range(Range { offset: 1, limit: 2 })
                    .columns(["n"]),
            )
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({"n": 2}), json!({"n": 3})]);
    }

    #[tokio::test]
    async fn update_merges_patch_and_reports_affected_rows() {
        let store = InMemoryRowStore::new();
        store
            .insert("Rows", json!({"id": "x", "level": null}))
            .await
            .unwrap();

        let affected = store
            .update("Rows", json!({"level": 5}), &[Filter::eq("id", "x")])
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let missed = store
            .update("Rows", json!({"level": 9}), &[Filter::eq("id", "y")])
            .await
            .unwrap();
        assert_eq!(missed, 0);

        let rows = store
            .select("Rows", Selection::all().filter(Filter::eq("id", "x")))
            .await
            .unwrap();
        assert_eq!(rows[0]["level"], json!(5));
    }

    #[tokio::test]
    async fn delete_reports_removed_rows() {
        let store = InMemoryRowStore::new();
        store.insert("Rows", json!({"id": "x"})).await.unwrap();
        store.insert("Rows", json!({"id": "y"})).await.unwrap();

        assert_eq!(
            store.delete("Rows", &[Filter::eq("id", "x")]).await.unwrap(),
            1
        );
        assert_eq!(
            store.delete("Rows", &[Filter::eq("id", "x")]).await.unwrap(),
            0
        );
        assert_eq!(store.select("Rows", Selection::all()).await.unwrap().len(), 1);
    }
}
