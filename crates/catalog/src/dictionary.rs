use serde::{Deserialize, Serialize};

use stockbook_core::{EntryId, InventoryError, InventoryResult};

/// The two reference sets used to classify products.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryKind {
    Category,
    UnitOfMeasure,
}

impl DictionaryKind {
    /// Name of the backing collection in the row store.
    pub fn collection(self) -> &'static str {
        match self {
            DictionaryKind::Category => "Categories",
            DictionaryKind::UnitOfMeasure => "UnitOfMeasure",
        }
    }

    /// Human-readable label for error messages.
    pub fn label(self) -> &'static str {
        match self {
            DictionaryKind::Category => "category",
            DictionaryKind::UnitOfMeasure => "unit of measure",
        }
    }
}

/// One entry of a dictionary. Names are unique case-insensitively within
/// their kind; deleting an entry does not cascade to products referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: EntryId,
    pub name: String,
}

impl DictionaryEntry {
    /// Case-insensitive name match, the dictionary uniqueness rule.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

/// Trim a candidate entry name, rejecting blank input.
pub fn normalize_entry_name(raw: &str) -> InventoryResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::validation("name", "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Alphabetical order by name, case-insensitive, as the pickers display it.
pub fn sort_entries(entries: &mut [DictionaryEntry]) {
    entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> DictionaryEntry {
        DictionaryEntry {
            id: EntryId::new(),
            name: name.to_string(),
        }
    }

    #[test]
    fn name_matching_ignores_case() {
        let existing = entry("500ml");
        assert!(existing.name_matches("500ml"));
        assert!(existing.name_matches("500ML"));
        assert!(!existing.name_matches("250ml"));
    }

    #[test]
    fn normalization_trims_and_rejects_blank() {
        assert_eq!(normalize_entry_name("  Hair Care ").unwrap(), "Hair Care");
        assert!(normalize_entry_name("   ").is_err());
    }

    #[test]
    fn sorting_is_case_insensitive() {
        let mut entries = vec![entry("toner"), entry("Conditioner"), entry("shampoo")];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Conditioner", "shampoo", "toner"]);
    }
}
