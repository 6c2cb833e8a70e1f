//! Dictionary store: the Categories and UnitOfMeasure reference sets.

use std::sync::Arc;

use tracing::info;

use stockbook_catalog::{DictionaryEntry, DictionaryKind, normalize_entry_name, sort_entries};
use stockbook_core::{EntryId, InventoryError, InventoryResult};
use stockbook_infra::{Filter, Order, RowStore, Selection};

use crate::codec::{decode, decode_rows, encode, to_transport};
use crate::op_status::{OpStatus, error_message, ops};

/// Manages the two classification dictionaries.
///
/// Mutations are optimistic against whatever snapshot the caller last
/// fetched; the persisted store is authoritative. Uniqueness is checked
/// client-side against a fresh fetch, so two near-simultaneous adds with the
/// same name can both land. That race is an accepted eventual-consistency
/// gap, not something this layer engineers around.
pub struct DictionaryStore<S> {
    store: S,
    status: Arc<OpStatus>,
}

impl<S: RowStore> DictionaryStore<S> {
    pub(crate) fn new(store: S, status: Arc<OpStatus>) -> Self {
        Self { store, status }
    }

    /// All entries of one dictionary, alphabetically by name.
    ///
    /// An empty dictionary yields an empty vec, never an error.
    pub async fn list(&self, kind: DictionaryKind) -> InventoryResult<Vec<DictionaryEntry>> {
        let rows = self
            .store
            .select(kind.collection(), Selection::all().order(Order::asc("name")))
            .await
            .map_err(to_transport)?;

        let mut entries: Vec<DictionaryEntry> = decode_rows(rows)?;
        // The store's ordering may be case-sensitive; the pickers want
        // case-insensitive alphabetical.
        sort_entries(&mut entries);
        Ok(entries)
    }

    pub async fn add(&self, kind: DictionaryKind, name: &str) -> InventoryResult<DictionaryEntry> {
        self.status.begin(ops::DICTIONARY_ADD);
        let result = self.add_inner(kind, name).await;
        self.status.complete(ops::DICTIONARY_ADD, error_message(&result));
        result
    }

    async fn add_inner(&self, kind: DictionaryKind, name: &str) -> InventoryResult<DictionaryEntry> {
        let name = normalize_entry_name(name)?;

        let existing = self.list(kind).await?;
        if existing.iter().any(|e| e.name_matches(&name)) {
            return Err(InventoryError::duplicate(name));
        }

        let entry = DictionaryEntry {
            id: EntryId::new(),
            name,
        };
        self.store
            .insert(kind.collection(), encode(&entry)?)
            .await
            .map_err(to_transport)?;

        info!(kind = kind.label(), name = %entry.name, "dictionary entry added");
        Ok(entry)
    }

    /// Remove one entry by id.
    ///
    /// Fails with `NotFound` when the persisted store has no such row.
    /// Referencing products are left untouched; dangling references are an
    /// accepted limitation of the dictionaries.
    pub async fn remove(&self, kind: DictionaryKind, id: EntryId) -> InventoryResult<()> {
        self.status.begin(ops::DICTIONARY_REMOVE);
        let result = self.remove_inner(kind, id).await;
        self.status
            .complete(ops::DICTIONARY_REMOVE, error_message(&result));
        result
    }

    async fn remove_inner(&self, kind: DictionaryKind, id: EntryId) -> InventoryResult<()> {
        let removed = self
            .store
            .delete(kind.collection(), &[Filter::eq("id", id.to_string())])
            .await
            .map_err(to_transport)?;

        if removed == 0 {
            return Err(InventoryError::not_found(format!("{} {id}", kind.label())));
        }

        info!(kind = kind.label(), id = %id, "dictionary entry removed");
        Ok(())
    }

    /// Display name of one entry, for snapshot denormalization.
    pub(crate) async fn entry_name(
        &self,
        kind: DictionaryKind,
        id: EntryId,
    ) -> InventoryResult<String> {
        let rows = self
            .store
            .select(
                kind.collection(),
                Selection::all().filter(Filter::eq("id", id.to_string())),
            )
            .await
            .map_err(to_transport)?;

        let Some(row) = rows.into_iter().next() else {
            return Err(InventoryError::not_found(format!("{} {id}", kind.label())));
        };
        let entry: DictionaryEntry = decode(row)?;
        Ok(entry.name)
    }
}
