//! Column visibility for the contract table

use super::contract::Contract;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column that may be protected from being hidden
pub const STATUS_COLUMN: &str = "status";

/// Fixed table gutters that carry no record data and are never exported
pub const NON_DATA_COLUMNS: [&str; 2] = ["expand", "actions"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

impl ColumnDefinition {
    pub fn new(id: &str, label: &str, visible: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            visible,
        }
    }
}

/// Ordered column definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<ColumnDefinition>,
    /// When set, the status column cannot be hidden
    pub protect_status: bool,
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::standard(true)
    }
}

impl ColumnSet {
    /// The standard record columns
    pub fn standard(protect_status: bool) -> Self {
        Self {
            columns: vec![
                ColumnDefinition::new("name", "Contract Name", true),
                ColumnDefinition::new("type", "Type", true),
                ColumnDefinition::new("dateUploaded", "Date Uploaded", true),
                ColumnDefinition::new(STATUS_COLUMN, "Status", true),
                ColumnDefinition::new("currency", "Currency", false),
                ColumnDefinition::new("value", "Value", true),
                ColumnDefinition::new("parties", "Parties", false),
                ColumnDefinition::new("restrictions", "Restrictions", false),
            ],
            protect_status,
        }
    }

    /// Standard columns plus one hidden column per extra term in the dataset
    pub fn for_dataset(contracts: &[Contract], protect_status: bool) -> Self {
        let mut set = Self::standard(protect_status);
        let term_keys: BTreeSet<&String> = contracts.iter().flat_map(|c| c.terms.keys()).collect();
        for key in term_keys {
            if !set.contains(key) {
                set.columns.push(ColumnDefinition::new(key, key, false));
            }
        }
        set
    }

    pub fn all(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn contains(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Visible data columns in display order
    pub fn visible(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|c| c.visible && !NON_DATA_COLUMNS.contains(&c.id.as_str()))
            .collect()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| c.visible)
    }

    pub fn is_protected(&self, id: &str) -> bool {
        self.protect_status && id == STATUS_COLUMN
    }

    /// Columns offered by the customize dialog
    pub fn toggleable(&self) -> Vec<&ColumnDefinition> {
        self.columns
            .iter()
            .filter(|c| !self.is_protected(&c.id))
            .collect()
    }

    /// Flip a column's visibility; protected and unknown ids are ignored
    ///
    /// Returns whether anything changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_protected(id) {
            return false;
        }
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) => {
                column.visible = !column.visible;
                true
            }
            None => false,
        }
    }
}

/// Locally staged column changes, applied on confirm
#[derive(Debug, Clone, Default)]
pub struct ColumnDraft {
    staged: Option<ColumnSet>,
}

impl ColumnDraft {
    pub fn begin(&mut self, current: &ColumnSet) {
        self.staged = Some(current.clone());
    }

    pub fn columns(&self) -> Option<&ColumnSet> {
        self.staged.as_ref()
    }

    pub fn toggle(&mut self, id: &str) {
        if let Some(ref mut staged) = self.staged {
            staged.toggle(id);
        }
    }

    /// Take the staged set, ending the draft
    pub fn commit(&mut self) -> Option<ColumnSet> {
        self.staged.take()
    }

    pub fn discard(&mut self) {
        self.staged = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_data::sample_contracts;

    #[test]
    fn test_toggle_flips_visibility() {
        let mut set = ColumnSet::default();
        let before = set.visible().len();
        assert!(!set.is_visible("parties"));

        assert!(set.toggle("parties"));
        assert!(set.is_visible("parties"));
        assert_eq!(set.visible().len(), before + 1);

        assert!(set.toggle("parties"));
        assert_eq!(set.visible().len(), before);
    }

    #[test]
    fn test_status_column_is_protected() {
        let mut set = ColumnSet::standard(true);
        assert!(!set.toggle(STATUS_COLUMN));
        assert!(set.is_visible(STATUS_COLUMN));
        assert!(set.toggleable().iter().all(|c| c.id != STATUS_COLUMN));

        let mut open = ColumnSet::standard(false);
        assert!(open.toggle(STATUS_COLUMN));
        assert!(!open.is_visible(STATUS_COLUMN));
    }

    #[test]
    fn test_unknown_column_is_ignored() {
        let mut set = ColumnSet::default();
        let before = set.clone();
        assert!(!set.toggle("nope"));
        assert_eq!(set, before);
    }

    #[test]
    fn test_dataset_terms_become_hidden_columns() {
        let set = ColumnSet::for_dataset(&sample_contracts(), true);
        let governing = set.get("Governing Law").unwrap();
        assert!(!governing.visible);
        assert_eq!(governing.label, "Governing Law");
        // Standard columns keep their order at the front
        assert_eq!(set.all()[0].id, "name");
    }

    #[test]
    fn test_draft_changes_apply_only_on_commit() {
        let mut current = ColumnSet::default();
        let mut draft = ColumnDraft::default();
        draft.begin(&current);
        draft.toggle("currency");
        assert!(!current.is_visible("currency"));

        current = draft.commit().unwrap();
        assert!(current.is_visible("currency"));
        assert!(draft.columns().is_none());

        draft.begin(&current);
        draft.toggle("currency");
        draft.discard();
        assert!(current.is_visible("currency"));
    }
}
