//! Column sorting for the contract list

use super::contract::Contract;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort: a field id and a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn asc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: &str) -> Self {
        Self {
            key: key.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// Next sort state after clicking `key`: unsorted → asc → desc → unsorted
///
/// Clicking a different key always starts again at ascending.
pub fn cycle_sort(current: Option<&SortConfig>, key: &str) -> Option<SortConfig> {
    match current {
        Some(sort) if sort.key == key => match sort.direction {
            SortDirection::Asc => Some(SortConfig::desc(key)),
            SortDirection::Desc => None,
        },
        _ => Some(SortConfig::asc(key)),
    }
}

/// Locale-style string comparison
///
/// Case-insensitive first; strings differing only in case put the lowercase
/// form first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Return a sorted copy of `rows`; the input order is kept when `sort` is None
///
/// The sort is stable. Rows without the field go last in both directions.
pub fn sort_rows<'a>(rows: &[&'a Contract], sort: Option<&SortConfig>) -> Vec<&'a Contract> {
    let mut sorted = rows.to_vec();
    let Some(sort) = sort else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        let left = a.field(&sort.key).map(|v| v.sort_key());
        let right = b.field(&sort.key).map(|v| v.sort_key());
        match (left, right) {
            (Some(l), Some(r)) => {
                let ord = locale_compare(&l, &r);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_data::sample_contracts;

    fn ids(rows: &[&Contract]) -> Vec<u32> {
        rows.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_cycle_is_tri_state() {
        let first = cycle_sort(None, "name");
        assert_eq!(first, Some(SortConfig::asc("name")));
        let second = cycle_sort(first.as_ref(), "name");
        assert_eq!(second, Some(SortConfig::desc("name")));
        let third = cycle_sort(second.as_ref(), "name");
        assert_eq!(third, None);
    }

    #[test]
    fn test_switching_key_restarts_at_ascending() {
        let current = SortConfig::desc("name");
        assert_eq!(cycle_sort(Some(&current), "status"), Some(SortConfig::asc("status")));
    }

    #[test]
    fn test_three_clicks_restore_original_order() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();
        let original = ids(&rows);

        let mut sort = None;
        for _ in 0..3 {
            sort = cycle_sort(sort.as_ref(), "name");
        }
        assert_eq!(ids(&sort_rows(&rows, sort.as_ref())), original);
    }

    #[test]
    fn test_sort_by_name_both_directions() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();

        let asc = sort_rows(&rows, Some(&SortConfig::asc("name")));
        assert_eq!(ids(&asc), vec![5, 3, 2, 6, 1, 4]);

        let desc = sort_rows(&rows, Some(&SortConfig::desc("name")));
        assert_eq!(ids(&desc), vec![4, 1, 6, 2, 3, 5]);
    }

    #[test]
    fn test_sort_is_stable_and_does_not_mutate_input() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();
        let sorted = sort_rows(&rows, Some(&SortConfig::asc("type")));

        // NDA rows 2 and 6 tie and keep insertion order
        let nda: Vec<u32> = sorted
            .iter()
            .filter(|c| c.contract_type.label() == "NDA")
            .map(|c| c.id)
            .collect();
        assert_eq!(nda, vec![2, 6]);
        assert_eq!(ids(&rows), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();
        let sort = SortConfig::desc("dateUploaded");
        let once = sort_rows(&rows, Some(&sort));
        let twice = sort_rows(&once, Some(&sort));
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(ids(&once), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();

        for sort in [SortConfig::asc("currency"), SortConfig::desc("currency")] {
            let sorted = sort_rows(&rows, Some(&sort));
            let tail: Vec<u32> = sorted.iter().rev().take(2).map(|c| c.id).collect();
            assert!(tail.contains(&2) && tail.contains(&6));
        }
    }

    #[test]
    fn test_locale_compare_ignores_case_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("NDA", "NDA"), Ordering::Equal);
    }
}
