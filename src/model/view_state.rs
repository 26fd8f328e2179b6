//! Contract list view state
//!
//! Everything that decides what the contract table shows lives here:
//! free-text query, filter group, sort, columns and expanded rows.
//! Changes go through `ViewState::reduce`, which consumes the old state and
//! returns the new one, so the whole flow is testable without a terminal.

use super::columns::ColumnSet;
use super::contract::Contract;
use super::filter::{record_matches, FilterCondition, FilterGroup, FilterNode, FilterOperator, Logic};
use super::sort::{cycle_sort, sort_rows, SortConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of rows whose detail panel is open
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpandedRows(BTreeSet<u32>);

impl ExpandedRows {
    pub fn toggle(&mut self, id: u32) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// A single change to the view state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChange {
    SetQuery(String),
    QueryInput(char),
    QueryBackspace,
    AddCondition(FilterCondition),
    RemoveCondition(usize),
    ToggleConditionLogic(usize),
    ToggleGroupLogic,
    /// Replace any `equals` condition on the field; None removes it
    SetSimpleFilter { field: String, value: Option<String> },
    ClearFilters,
    SortBy(String),
    ClearSort,
    ToggleColumn(String),
    ReplaceColumns(ColumnSet),
    ToggleExpanded(u32),
    CollapseAll,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub query: String,
    pub filters: FilterGroup,
    pub sort: Option<SortConfig>,
    pub columns: ColumnSet,
    pub expanded: ExpandedRows,
}

impl ViewState {
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Apply one change and return the resulting state
    pub fn reduce(mut self, change: ViewChange) -> Self {
        match change {
            ViewChange::SetQuery(query) => self.query = query,
            ViewChange::QueryInput(c) => self.query.push(c),
            ViewChange::QueryBackspace => {
                self.query.pop();
            }
            ViewChange::AddCondition(condition) => {
                self.filters.conditions.push(FilterNode::Condition(condition));
            }
            ViewChange::RemoveCondition(index) => {
                if index < self.filters.conditions.len() {
                    self.filters.conditions.remove(index);
                }
            }
            ViewChange::ToggleConditionLogic(index) => {
                let group_logic = self.filters.logic;
                if let Some(FilterNode::Condition(c)) = self.filters.conditions.get_mut(index) {
                    c.logic = Some(c.logic.unwrap_or(group_logic).toggled());
                }
            }
            ViewChange::ToggleGroupLogic => {
                self.filters.logic = self.filters.logic.toggled();
            }
            ViewChange::SetSimpleFilter { field, value } => {
                self.filters.conditions.retain(|node| {
                    !matches!(node, FilterNode::Condition(c)
                        if c.field == field && c.operator == FilterOperator::Equals)
                });
                if let Some(value) = value {
                    self.filters
                        .conditions
                        .push(FilterNode::Condition(FilterCondition::equals(&field, &value)));
                }
            }
            ViewChange::ClearFilters => {
                self.filters = FilterGroup::new(Logic::And);
            }
            ViewChange::SortBy(key) => {
                self.sort = cycle_sort(self.sort.as_ref(), &key);
            }
            ViewChange::ClearSort => self.sort = None,
            ViewChange::ToggleColumn(id) => {
                self.columns.toggle(&id);
            }
            ViewChange::ReplaceColumns(columns) => self.columns = columns,
            ViewChange::ToggleExpanded(id) => self.expanded.toggle(id),
            ViewChange::CollapseAll => self.expanded.clear(),
        }
        self
    }

    /// Rows to display: `sort(filter(dataset, query, filters))`
    pub fn visible_rows<'a>(&self, dataset: &'a [Contract]) -> Vec<&'a Contract> {
        let filtered: Vec<&Contract> = dataset
            .iter()
            .filter(|c| record_matches(c, &self.query, &self.filters))
            .collect();
        sort_rows(&filtered, self.sort.as_ref())
    }

    pub fn has_active_filters(&self) -> bool {
        !self.query.is_empty() || !self.filters.is_empty()
    }
}

/// Label/value pairs for an expanded row's detail panel
///
/// Lists every record field that is not a visible column, followed by the
/// extra terms that are not visible columns.
pub fn expansion_details(contract: &Contract, columns: &ColumnSet) -> Vec<(String, String)> {
    let mut details = Vec::new();

    for column in ColumnSet::standard(false).all() {
        if columns.is_visible(&column.id) {
            continue;
        }
        if let Some(value) = contract.field(&column.id) {
            let text = value.display();
            if !text.is_empty() {
                details.push((column.label.clone(), text));
            }
        }
    }

    for (key, value) in &contract.terms {
        if !columns.is_visible(key) {
            details.push((key.clone(), value.clone()));
        }
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contract::{ContractStatus, ContractType};
    use crate::model::sample_data::sample_contracts;

    fn three() -> Vec<Contract> {
        sample_contracts().into_iter().take(3).collect()
    }

    fn ids(rows: &[&Contract]) -> Vec<u32> {
        rows.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_default_state_shows_dataset_in_order() {
        let contracts = sample_contracts();
        let state = ViewState::default();
        assert_eq!(ids(&state.visible_rows(&contracts)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_status_equals_active_scenario() {
        let contracts = three();
        let statuses: Vec<ContractStatus> = contracts.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![ContractStatus::Active, ContractStatus::Pending, ContractStatus::Draft]
        );

        let state = ViewState::default()
            .reduce(ViewChange::AddCondition(FilterCondition::equals("status", "Active")));
        assert_eq!(state.filters.logic, Logic::And);
        assert!(state.query.is_empty());
        assert_eq!(ids(&state.visible_rows(&contracts)), vec![1]);
    }

    #[test]
    fn test_filter_then_sort_leaves_dataset_untouched() {
        let contracts = sample_contracts();
        let snapshot = contracts.clone();
        let state = ViewState::default()
            .reduce(ViewChange::SetQuery("nda".to_string()))
            .reduce(ViewChange::SortBy("name".to_string()))
            .reduce(ViewChange::SortBy("name".to_string()));
        assert_eq!(ids(&state.visible_rows(&contracts)), vec![6, 2]);
        assert_eq!(contracts, snapshot);
    }

    #[test]
    fn test_query_editing() {
        let state = ViewState::default()
            .reduce(ViewChange::QueryInput('n'))
            .reduce(ViewChange::QueryInput('x'))
            .reduce(ViewChange::QueryBackspace);
        assert_eq!(state.query, "n");
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_simple_filter_replaces_previous_value() {
        let contracts = three();
        let state = ViewState::default()
            .reduce(ViewChange::SetSimpleFilter {
                field: "type".to_string(),
                value: Some("NDA".to_string()),
            })
            .reduce(ViewChange::SetSimpleFilter {
                field: "type".to_string(),
                value: Some("Employment".to_string()),
            });
        assert_eq!(state.filters.conditions.len(), 1);
        assert_eq!(ids(&state.visible_rows(&contracts)), vec![3]);

        let cleared = state.reduce(ViewChange::SetSimpleFilter {
            field: "type".to_string(),
            value: None,
        });
        assert!(cleared.filters.is_empty());
    }

    #[test]
    fn test_condition_editing() {
        let state = ViewState::default()
            .reduce(ViewChange::AddCondition(FilterCondition::equals("status", "Active")))
            .reduce(ViewChange::AddCondition(FilterCondition::equals("status", "Draft")))
            .reduce(ViewChange::ToggleConditionLogic(1));
        let FilterNode::Condition(second) = &state.filters.conditions[1] else {
            panic!("expected a condition");
        };
        assert_eq!(second.logic, Some(Logic::Or));
        assert_eq!(ids(&state.visible_rows(&three())), vec![1, 3]);

        let state = state
            .reduce(ViewChange::RemoveCondition(0))
            .reduce(ViewChange::RemoveCondition(9));
        assert_eq!(state.filters.conditions.len(), 1);

        let state = state.reduce(ViewChange::ToggleGroupLogic);
        assert_eq!(state.filters.logic, Logic::Or);
        let state = state.reduce(ViewChange::ClearFilters);
        assert!(state.filters.is_empty());
        assert_eq!(state.filters.logic, Logic::And);
    }

    #[test]
    fn test_column_toggle_keeps_rows() {
        let contracts = three();
        let state = ViewState::default().reduce(ViewChange::SortBy("name".to_string()));
        let rows_before = ids(&state.visible_rows(&contracts));
        let columns_before = state.columns.visible().len();

        let state = state.reduce(ViewChange::ToggleColumn("parties".to_string()));
        assert_eq!(state.columns.visible().len(), columns_before + 1);
        assert_eq!(ids(&state.visible_rows(&contracts)), rows_before);
    }

    #[test]
    fn test_expand_then_collapse_leaves_no_state() {
        let state = ViewState::default().reduce(ViewChange::ToggleExpanded(2));
        assert!(state.expanded.is_expanded(2));
        assert!(!state.expanded.is_expanded(1));

        let state = state.reduce(ViewChange::ToggleExpanded(2));
        assert!(!state.expanded.is_expanded(2));
        assert!(state.expanded.is_empty());
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_state_serializes() {
        let state = ViewState::default()
            .reduce(ViewChange::AddCondition(FilterCondition::equals("status", "Active")))
            .reduce(ViewChange::SortBy("value".to_string()))
            .reduce(ViewChange::ToggleExpanded(4));
        let json = serde_json::to_string(&state).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_expansion_details_list_hidden_fields_and_terms() {
        let contract = Contract {
            contract_type: ContractType::Nda,
            ..sample_contracts().remove(0)
        };
        let columns = ColumnSet::default();
        let details = expansion_details(&contract, &columns);
        let labels: Vec<&str> = details.iter().map(|(l, _)| l.as_str()).collect();

        assert!(labels.contains(&"Currency"));
        assert!(labels.contains(&"Parties"));
        assert!(labels.contains(&"Restrictions"));
        assert!(labels.contains(&"Governing Law"));
        // Visible columns are not repeated
        assert!(!labels.contains(&"Contract Name"));
        assert!(!labels.contains(&"Value"));
    }
}
