//! Domain state - business/data state separate from UI concerns

use super::contract::{Contract, ContractStatus};
use super::feedback::FeedbackBook;
use super::filter::parse_date;
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;

/// Term holding a contract's expiration date
pub const EXPIRATION_TERM: &str = "Expiration Date";

/// Contracts expiring within this many days count as "expiring soon"
pub const EXPIRING_SOON_DAYS: i64 = 90;

/// Where the loaded contracts came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSource {
    #[default]
    Sample,
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Sample => "sample data".to_string(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }
}

/// Counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub active: usize,
    pub pending: usize,
    pub expiring_soon: usize,
}

/// An item in the notifications panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub time: &'static str,
    /// Extraction progress in percent; None once the file is uploaded
    pub progress: Option<u16>,
}

pub const NOTIFICATIONS: [Notification; 2] = [
    Notification {
        title: "Service Agreement.pdf",
        time: "2 minutes ago",
        progress: Some(45),
    },
    Notification {
        title: "NDA Contract.pdf",
        time: "5 minutes ago",
        progress: None,
    },
];

/// Domain state containing all business data
#[derive(Debug, Default)]
pub struct DomainState {
    /// Loaded contracts, in insertion order
    pub contracts: Vec<Contract>,
    pub source: DatasetSource,
    pub feedback: FeedbackBook,
}

impl DomainState {
    pub fn new(contracts: Vec<Contract>, source: DatasetSource) -> Self {
        Self {
            contracts,
            source,
            feedback: FeedbackBook::default(),
        }
    }

    pub fn find(&self, id: u32) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        let count = |status| self.contracts.iter().filter(|c| c.status == status).count();
        let horizon = today + Duration::days(EXPIRING_SOON_DAYS);
        let expiring_soon = self
            .contracts
            .iter()
            .filter_map(|c| c.terms.get(EXPIRATION_TERM).and_then(|d| parse_date(d)))
            .filter(|date| *date >= today && *date <= horizon)
            .count();

        DashboardStats {
            active: count(ContractStatus::Active),
            pending: count(ContractStatus::Pending),
            expiring_soon,
        }
    }

    /// Most recently uploaded contracts, newest first
    pub fn recent(&self, limit: usize) -> Vec<&Contract> {
        let mut recent: Vec<&Contract> = self.contracts.iter().collect();
        recent.sort_by(|a, b| b.date_uploaded.cmp(&a.date_uploaded));
        recent.truncate(limit);
        recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_data::sample_contracts;

    fn domain() -> DomainState {
        DomainState::new(sample_contracts(), DatasetSource::Sample)
    }

    #[test]
    fn test_stats_count_statuses_and_expiring_contracts() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let stats = domain().stats(today);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.pending, 1);
        // Jan 31 and Feb 28 2025 are both within 90 days
        assert_eq!(stats.expiring_soon, 2);

        let later = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        assert_eq!(domain().stats(later).expiring_soon, 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let domain = domain();
        let ids: Vec<u32> = domain.recent(3).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_find_by_id() {
        let domain = domain();
        assert_eq!(domain.find(4).map(|c| c.name.as_str()), Some("Software License - CloudBase"));
        assert!(domain.find(99).is_none());
    }
}
